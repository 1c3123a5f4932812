//! # carve
//!
//! Extract a contiguous byte range from a file into a new file.
//!
//! Given a source path, a byte offset and a length, `carve` streams the
//! requested range into a destination file through a fixed-size buffer.
//! Leaving the length out (or passing 0) copies everything from the offset
//! to the end of the source. Typical uses are splitting firmware images and
//! pulling embedded payloads out of larger binaries.
//!
//! The copy loop tolerates short reads and retries short writes a bounded
//! number of times; reaching end-of-file before the requested length is
//! normal completion, not an error.
//!
//! ## Example
//!
//! ```no_run
//! use carve::{run, TransferConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     // Copy 4 KiB starting at offset 0x800 of firmware.bin into header.bin
//!     let config = TransferConfig {
//!         source: "firmware.bin".into(),
//!         destination: "header.bin".into(),
//!         offset: 0x800,
//!         length: 4096,
//!         read_to_end: false,
//!     };
//!     let copied = run(&config)?;
//!     println!("copied {copied} bytes");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod transfer;

pub use cli::Cli;
pub use transfer::{copy_range, run, TransferConfig, TransferError};
