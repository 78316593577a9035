//! Fixtures shared by the HTTP-backed and environment-mutating tests.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock};

use lofty::prelude::*;
use lofty::probe::Probe;
use serde_json::{Value, json};

use crate::config::ApiSettings;

pub const CLIENT_ID: &str = "test-client-id";

/// Forty zero-filled MPEG-1 Layer III frames (128 kbit/s, 44.1 kHz),
/// enough for tag libraries to recognise the data as MP3.
pub fn fake_mp3() -> Vec<u8> {
    const HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
    const FRAME_LEN: usize = 417;
    const FRAMES: usize = 40;

    let mut out = Vec::with_capacity(FRAME_LEN * FRAMES);
    for _ in 0..FRAMES {
        out.extend_from_slice(&HEADER);
        out.resize(out.len() + FRAME_LEN - HEADER.len(), 0);
    }
    out
}

/// API settings pointing every endpoint at a mock server.
pub fn api_settings(server_uri: &str) -> ApiSettings {
    ApiSettings {
        client_id: Some(CLIENT_ID.to_string()),
        resolve_url: format!("{server_uri}/resolve.json"),
        site_url: "https://soundcloud.com".to_string(),
        timeout_secs: 5,
        ..ApiSettings::default()
    }
}

/// One catalog entry as the listing endpoint returns it.
pub fn track_json(title: &str, duration: u64, stream_url: Option<&str>) -> Value {
    json!({
        "id": 1,
        "title": title,
        "duration": duration,
        "genre": "House",
        "stream_url": stream_url,
        "user": { "username": "testuser" },
    })
}

/// Title, artist and genre from the primary tag of the file at `path`.
pub fn read_tags(path: &Path) -> (Option<String>, Option<String>, Option<String>) {
    let tagged = Probe::open(path)
        .unwrap()
        .guess_file_type()
        .unwrap()
        .read()
        .unwrap();
    let tag = tagged.primary_tag().expect("file has a primary tag");
    (
        tag.title().map(|s| s.into_owned()),
        tag.artist().map(|s| s.into_owned()),
        tag.genre().map(|s| s.into_owned()),
    )
}

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Serializes tests that touch process environment variables.
pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

/// Sets or removes one variable and restores the previous value on drop.
pub struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    pub fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    pub fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}
