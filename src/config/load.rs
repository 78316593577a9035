use std::{
    env,
    path::{Path, PathBuf},
};

use regex::RegexBuilder;

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `SC_ARCHIVE__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from the resolved config path and the environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Load settings from an explicit (optional) config file and the environment.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SC_ARCHIVE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.api.page_size == 0 {
            return Err("api.page_size must be >= 1".to_string());
        }
        if self.download.chunk_size == 0 {
            return Err("download.chunk_size must be >= 1".to_string());
        }
        if let Err(e) = RegexBuilder::new(&self.filter.skip_pattern)
            .case_insensitive(true)
            .build()
        {
            return Err(format!("filter.skip_pattern is not a valid pattern: {e}"));
        }
        Ok(())
    }
}

/// Resolve the config path from `SC_ARCHIVE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SC_ARCHIVE_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/sc-archive/config.toml`
/// or `~/.config/sc-archive/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("sc-archive").join("config.toml"))
}
