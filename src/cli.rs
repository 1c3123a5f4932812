use clap::Parser;
use std::path::PathBuf;

use crate::transfer::TransferConfig;

#[derive(Parser, Debug)]
#[command(name = "carve")]
#[command(version)]
#[command(about = "Extract a contiguous byte range from a file", long_about = None)]
#[command(after_help = "Examples:\n  \
  carve -i firmware.bin -s 0x800 -l 4096 -o header.bin\n  \
  carve -i dump.img -s 512               copy from byte 512 to EOF into `outfile`")]
pub struct Cli {
    /// Input file to read from
    #[arg(short = 'i', value_name = "INFILE")]
    pub infile: PathBuf,

    /// Output file to write to
    #[arg(short = 'o', value_name = "OUTFILE", default_value = "outfile")]
    pub outfile: PathBuf,

    /// Byte offset into the input file (0x../0o../leading-0 prefixes accepted)
    #[arg(short = 's', value_name = "OFFSET", default_value = "0", value_parser = parse_integer)]
    pub offset: u64,

    /// Number of bytes to copy (0 = read to end of file)
    #[arg(short = 'l', value_name = "LENGTH", default_value = "0", value_parser = parse_integer)]
    pub length: u64,
}

impl Cli {
    /// Turn parsed arguments into a transfer config. A length of zero means
    /// "copy the whole remaining file".
    pub fn into_config(self) -> TransferConfig {
        let read_to_end = self.length == 0;
        TransferConfig {
            source: self.infile,
            destination: self.outfile,
            offset: self.offset,
            length: self.length,
            read_to_end,
        }
    }
}

/// Parse a non-negative integer with `strtol`-base-0 semantics: `0x`/`0X`
/// for hex, `0o`/`0O` or a leading `0` for octal, decimal otherwise.
fn parse_integer(arg: &str) -> Result<u64, String> {
    let arg = arg.trim();
    let (digits, radix) = if let Some(hex) = arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(oct) = arg.strip_prefix("0o").or_else(|| arg.strip_prefix("0O")) {
        (oct, 8)
    } else if arg.len() > 1 && arg.starts_with('0') {
        (&arg[1..], 8)
    } else {
        (arg, 10)
    };
    u64::from_str_radix(digits, radix).map_err(|e| format!("invalid number `{arg}`: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_hex_and_octal() {
        assert_eq!(parse_integer("4096"), Ok(4096));
        assert_eq!(parse_integer("0x1000"), Ok(4096));
        assert_eq!(parse_integer("0X10"), Ok(16));
        assert_eq!(parse_integer("0o17"), Ok(15));
        assert_eq!(parse_integer("010"), Ok(8));
        assert_eq!(parse_integer("0"), Ok(0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_integer("abc").is_err());
        assert!(parse_integer("0xZZ").is_err());
        assert!(parse_integer("-5").is_err());
        assert!(parse_integer("").is_err());
        assert!(parse_integer("12x").is_err());
    }

    #[test]
    fn defaults_apply() {
        let cli = Cli::try_parse_from(["carve", "-i", "in.bin"]).unwrap();
        assert_eq!(cli.outfile, PathBuf::from("outfile"));
        assert_eq!(cli.offset, 0);
        assert_eq!(cli.length, 0);
    }

    #[test]
    fn infile_is_required() {
        assert!(Cli::try_parse_from(["carve"]).is_err());
    }

    #[test]
    fn numeric_options_accept_base_prefixes() {
        let cli = Cli::try_parse_from(["carve", "-i", "in.bin", "-s", "0x10", "-l", "0755"]).unwrap();
        assert_eq!(cli.offset, 16);
        assert_eq!(cli.length, 0o755);
    }

    #[test]
    fn zero_length_means_read_to_end() {
        let config = Cli::try_parse_from(["carve", "-i", "in.bin"])
            .unwrap()
            .into_config();
        assert!(config.read_to_end);

        let config = Cli::try_parse_from(["carve", "-i", "in.bin", "-l", "100"])
            .unwrap()
            .into_config();
        assert!(!config.read_to_end);
        assert_eq!(config.length, 100);
    }
}
