use serde::Deserialize;

/// One entry of a user's catalog listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    /// Track length in milliseconds.
    pub duration: u64,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub stream_url: Option<String>,
    pub user: TrackUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackUser {
    pub username: String,
}

impl TrackRecord {
    /// Display name of the uploading user, written as the artist tag.
    pub fn artist(&self) -> &str {
        &self.user.username
    }

    /// Genre, or an empty string when the platform has none.
    pub fn genre(&self) -> &str {
        self.genre.as_deref().unwrap_or("")
    }
}

/// The resolved target of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub handle: String,
    /// Catalog-listing endpoint; `limit`/`offset` are appended per page.
    pub tracks_url: String,
    pub track_count: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiError {
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Body of the resolve endpoint: either a `location` or a list of `errors`.
#[derive(Debug, Deserialize)]
pub(super) struct ResolveBody {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileBody {
    #[serde(default)]
    pub track_count: Option<u64>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

impl ApiError {
    pub(super) fn first_message(errors: &[ApiError]) -> Option<String> {
        errors.first().map(|e| {
            e.error_message
                .clone()
                .unwrap_or_else(|| "unknown error".to_string())
        })
    }
}
