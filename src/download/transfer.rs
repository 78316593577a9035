use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use indicatif::ProgressBar;

use crate::error::{Error, Result};

/// Copy `body` into a freshly truncated `dest`, `chunk_size` bytes at a time.
///
/// When `expected` is known a shorter body is an error, so a dropped
/// connection never reaches the tagging stage. Returns the number of bytes written.
pub(super) fn copy_to_file<R: Read>(
    mut body: R,
    expected: Option<u64>,
    dest: &Path,
    chunk_size: usize,
    bar: &ProgressBar,
) -> Result<u64> {
    let mut file = File::create(dest)?;
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut written: u64 = 0;

    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        file.write_all(&buf[..n])?;
        written += n as u64;
        bar.set_position(written);
    }

    file.flush()?;
    file.sync_all()?;

    if let Some(expected) = expected {
        if written < expected {
            return Err(Error::Truncated {
                expected,
                received: written,
            });
        }
    }

    Ok(written)
}
