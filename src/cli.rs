use std::path::PathBuf;

use clap::Parser;

/// Download a SoundCloud user's music. All of it.
#[derive(Parser, Debug)]
#[command(name = "sc-archive", version, about)]
pub struct CliArgs {
    /// The user's SoundCloud permalink (the part after "soundcloud.com/"),
    /// e.g. chainsawpolice. Prompted for when omitted.
    #[arg(value_name = "HANDLE")]
    pub handle: Option<String>,

    /// Same as HANDLE.
    #[arg(short = 'u', long = "user", value_name = "HANDLE", conflicts_with = "handle")]
    pub user: Option<String>,

    /// Config file to read instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref().or(self.user.as_deref())
    }
}

/// Accept either a bare permalink or a pasted profile URL.
///
/// Returns `None` when nothing usable is left.
pub fn normalize_handle(input: &str) -> Option<String> {
    let mut s = input.trim();
    for prefix in ["https://", "http://"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest;
        }
    }
    for host in ["www.soundcloud.com/", "m.soundcloud.com/", "soundcloud.com/"] {
        if let Some(rest) = s.strip_prefix(host) {
            s = rest;
            break;
        }
    }

    let handle = s.split(['/', '?', '#']).next().unwrap_or("").trim();
    if handle.is_empty() {
        None
    } else {
        Some(handle.to_string())
    }
}
