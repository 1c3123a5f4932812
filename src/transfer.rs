//! The bounded transfer engine: copies a byte range from a source file to a
//! destination file through a fixed-size buffer, with a bounded retry policy
//! for short writes.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Size of the reusable copy buffer. A conventional I/O chunk size; the copy
/// loop is correct for any non-zero value.
pub const READ_BUFFER_SIZE: usize = 0x1000;

/// How many write calls a single chunk gets before a short write is treated
/// as unrecoverable.
pub const MAX_WRITE_ATTEMPTS: usize = 2;

#[derive(thiserror::Error, Debug)]
pub enum TransferError {
    /// The source path names a directory, not a regular file.
    #[error("{}: Is a directory", path.display())]
    IsADirectory { path: PathBuf },
    /// The read cursor did not land exactly at the requested offset. Offsets
    /// past the end of the source are reported here too, even though the
    /// underlying seek would permit them.
    #[error("seek: cursor at {actual}, wanted {wanted}")]
    SeekMismatch { wanted: u64, actual: u64 },
    /// The write-attempt budget was exhausted with part of a chunk still
    /// unwritten.
    #[error("could not recover from incomplete write ({remaining} bytes left in chunk)")]
    IncompleteWrite { remaining: usize },
    /// A platform I/O failure, tagged with the operation that hit it.
    #[error("{op}")]
    Io {
        op: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl TransferError {
    fn io(op: &'static str) -> impl FnOnce(std::io::Error) -> TransferError {
        move |source| TransferError::Io { op, source }
    }
}

pub type Result<T> = std::result::Result<T, TransferError>;

/// A validated transfer request: where to read, where to write, and how much.
///
/// If `read_to_end` is set, `length` is not a bound and the copy runs until
/// source EOF. Otherwise the copy stops after `length` bytes have been read,
/// or earlier if the source runs out.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub offset: u64,
    pub length: u64,
    pub read_to_end: bool,
}

/// Open the source for reading and verify it is not a directory.
///
/// Opening a directory read-only succeeds on some platforms and only fails at
/// the first read, so the check happens here, before any read is attempted.
fn open_source(path: &Path) -> Result<File> {
    let file = File::open(path).map_err(TransferError::io("open"))?;
    let meta = file.metadata().map_err(TransferError::io("stat"))?;
    if meta.is_dir() {
        return Err(TransferError::IsADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(file)
}

/// Open (creating or truncating) the destination for writing.
fn open_destination(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        // rw-rw-r--, intersected with the process umask as usual.
        options.mode(0o664);
    }

    options.open(path).map_err(TransferError::io("open"))
}

/// Move the read cursor to `offset` bytes from the start of the file.
///
/// Strict policy: an offset beyond the end of the source is a hard failure,
/// not something to clamp or quietly let the first read turn into EOF.
fn position(file: &mut File, offset: u64) -> Result<()> {
    let len = file.metadata().map_err(TransferError::io("stat"))?.len();
    if offset > len {
        return Err(TransferError::SeekMismatch {
            wanted: offset,
            actual: len,
        });
    }
    let pos = file
        .seek(SeekFrom::Start(offset))
        .map_err(TransferError::io("seek"))?;
    if pos != offset {
        return Err(TransferError::SeekMismatch {
            wanted: offset,
            actual: pos,
        });
    }
    Ok(())
}

/// Copy up to `length` bytes (or everything until EOF, if `read_to_end`) from
/// `source` to `destination` through a fixed-size buffer.
///
/// Returns the number of bytes actually copied. Reaching source EOF before
/// `length` bytes is normal termination, not an error. A short write is
/// retried from the unwritten remainder of the chunk for at most
/// [`MAX_WRITE_ATTEMPTS`] write calls; if the chunk still is not fully
/// written the transfer fails rather than retrying forever. Any read or
/// write error aborts immediately.
pub fn copy_range<R: Read, W: Write>(
    mut source: R,
    mut destination: W,
    length: u64,
    read_to_end: bool,
) -> Result<u64> {
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    let mut bytes_read_total: u64 = 0;

    while bytes_read_total < length || read_to_end {
        let want = if read_to_end {
            buffer.len()
        } else {
            (length - bytes_read_total).min(buffer.len() as u64) as usize
        };

        let bytes_read = source
            .read(&mut buffer[..want])
            .map_err(TransferError::io("read"))?;
        if bytes_read == 0 {
            break;
        }
        bytes_read_total += bytes_read as u64;

        let mut written = 0;
        for _ in 0..MAX_WRITE_ATTEMPTS {
            if written == bytes_read {
                break;
            }
            let n = destination
                .write(&buffer[written..bytes_read])
                .map_err(TransferError::io("write"))?;
            written += n;
        }
        if written < bytes_read {
            return Err(TransferError::IncompleteWrite {
                remaining: bytes_read - written,
            });
        }
    }

    destination.flush().map_err(TransferError::io("flush"))?;
    Ok(bytes_read_total)
}

/// Run one complete transfer described by `config`.
///
/// The destination is created (or truncated) before the offset check, so a
/// failed seek still leaves an empty destination file behind; a fatal error
/// mid-copy leaves it partially written. There is no rollback. Both file
/// handles are dropped, and therefore closed, on every exit path.
pub fn run(config: &TransferConfig) -> Result<u64> {
    let mut source = open_source(&config.source)?;
    let destination = open_destination(&config.destination)?;
    position(&mut source, config.offset)?;
    copy_range(source, destination, config.length, config.read_to_end)
}
