//! Main entry point for the carve CLI application.
//!
//! Parses command-line arguments into a transfer config and hands it to the
//! transfer engine. All diagnostics go to standard error; on failure the
//! process exits with a non-zero status and the partially written
//! destination file, if any, is left in place.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use carve::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // `{:#}` flattens the error chain onto one line, e.g.
            // `carve: open: No such file or directory (os error 2)`.
            eprintln!("carve: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config();
    carve::run(&config)?;
    Ok(())
}
