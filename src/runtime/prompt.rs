use std::io::{BufRead, Write};

use crate::cli::normalize_handle;
use crate::error::{Error, Result};

const PROMPT: &str = "\nPlease enter the user's SoundCloud permalink\n\
(a.k.a. the link to their profile, without the \"https://soundcloud.com/\" at the start).\n\
e.g. chainsawpolice, diplo, skrillex, etc.\n";

/// Ask for a handle on `output` and read one line from `input`.
pub fn ask_handle<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<String> {
    write!(output, "{PROMPT}\n> ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    normalize_handle(&line).ok_or(Error::NoHandle)
}

/// Block until the user presses Enter.
pub fn pause<R: BufRead, W: Write>(mut input: R, mut output: W) {
    let _ = write!(output, "Press enter to continue...");
    let _ = output.flush();
    let mut line = String::new();
    let _ = input.read_line(&mut line);
}
