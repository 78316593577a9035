use std::path::Path;

use crate::config;

pub fn load_settings(explicit: Option<&Path>) -> config::Settings {
    let loaded = match explicit {
        Some(path) => config::Settings::load_from(Some(path)),
        None => config::Settings::load(),
    };

    match loaded {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("sc-archive: invalid config, using defaults: {msg}");
                defaults_keeping_credential(s)
            } else {
                s
            }
        }
        Err(e) => {
            eprintln!("sc-archive: failed to load config, using defaults: {e}");
            // A broken file fails the whole build, env included; read env alone.
            match config::Settings::load_from(None) {
                Ok(env_only) => defaults_keeping_credential(env_only),
                Err(_) => config::Settings::default(),
            }
        }
    }
}

/// The credential is the one setting without a usable default, so an otherwise
/// broken config should not take it down too.
fn defaults_keeping_credential(broken: config::Settings) -> config::Settings {
    let mut s = config::Settings::default();
    s.api.client_id = broken.api.client_id;
    s
}
