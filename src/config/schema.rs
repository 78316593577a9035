use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/sc-archive/config.toml` or `~/.config/sc-archive/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SC_ARCHIVE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub download: DownloadSettings,
    pub filter: FilterSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Public API credential appended as `client_id` to every request.
    /// There is no built-in value; it must come from the config file or
    /// `SC_ARCHIVE__API__CLIENT_ID`.
    pub client_id: Option<String>,
    /// Endpoint that translates a profile page URL into an API resource.
    pub resolve_url: String,
    /// Public site root used to build profile page URLs.
    pub site_url: String,
    /// Timeout for API requests (seconds). Media streams only get a connect timeout.
    pub timeout_secs: u64,
    /// Number of tracks requested per catalog page.
    pub page_size: u32,
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            resolve_url: "https://api.soundcloud.com/resolve.json".to_string(),
            site_url: "https://soundcloud.com".to_string(),
            timeout_secs: 30,
            page_size: 200,
            user_agent: concat!("sc-archive/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadSettings {
    /// Root directory; each profile is archived under `<root>/<handle>/`.
    pub root: PathBuf,
    /// Size of the buffer used to copy a response body to disk (bytes).
    pub chunk_size: usize,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("soundcloud-downloads"),
            chunk_size: 8192,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Tracks this short or shorter are skipped (milliseconds, inclusive).
    pub min_duration_ms: u64,
    /// Case-insensitive pattern; titles matching it are skipped.
    pub skip_pattern: String,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            min_duration_ms: 121_000,
            skip_pattern: r"[\[{(](clip|preview|forthcoming)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Whether to draw progress bars.
    pub progress: bool,
    /// Wait for Enter before exiting (handy when launched from a file manager).
    pub pause_on_exit: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            progress: true,
            pause_on_exit: cfg!(windows),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default `tracing` filter, used when `RUST_LOG` is unset.
    ///
    /// Example: "info" or "sc_archive=debug"
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
