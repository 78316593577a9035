use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiSettings;
use crate::error::{Error, Result};
use crate::progress::Progress;

use super::model::{ApiError, Profile, ProfileBody, ResolveBody, TrackRecord};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the SoundCloud public API.
pub struct SoundCloudClient {
    /// Never follows redirects: the resolve endpoint answers with one.
    resolver: Client,
    /// Follows redirects; media streams end up on a CDN.
    http: Client,
    client_id: String,
    resolve_url: String,
    site_url: String,
    timeout: Duration,
    page_size: u32,
}

impl SoundCloudClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client_id = settings
            .client_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "api.client_id is not set (config file or SC_ARCHIVE__API__CLIENT_ID)"
                        .to_string(),
                )
            })?
            .to_string();

        let timeout = Duration::from_secs(settings.timeout_secs);

        let resolver = Client::builder()
            .user_agent(&settings.user_agent)
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;

        // No whole-request timeout here: a long track can take minutes to stream.
        let http = Client::builder()
            .user_agent(&settings.user_agent)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self {
            resolver,
            http,
            client_id,
            resolve_url: settings.resolve_url.clone(),
            site_url: settings.site_url.trim_end_matches('/').to_string(),
            timeout,
            page_size: settings.page_size.max(1),
        })
    }

    /// Resolve `handle` to its catalog-listing URL and track count.
    ///
    /// An unknown handle yields [`Error::UserNotFound`].
    pub fn resolve_profile(&self, handle: &str) -> Result<Profile> {
        let tracks_url = self.resolve(handle, &format!("{handle}/tracks"))?;
        let profile_url = self.resolve(handle, handle)?;

        debug!(url = %profile_url, "fetching profile");
        let response = self
            .http
            .get(self.with_credential(&profile_url)?)
            .timeout(self.timeout)
            .send()?;
        let status = response.status();
        let text = response.text()?;

        let body: ProfileBody = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(Error::Status {
                    url: profile_url,
                    status,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(message) = ApiError::first_message(&body.errors) {
            return Err(Error::UserNotFound {
                handle: handle.to_string(),
                message,
            });
        }
        if !status.is_success() {
            return Err(Error::Status {
                url: profile_url,
                status,
            });
        }

        let track_count = body
            .track_count
            .ok_or_else(|| Error::UnexpectedResponse {
                url: profile_url.clone(),
                reason: "profile has no track_count".to_string(),
            })?;

        Ok(Profile {
            handle: handle.to_string(),
            tracks_url,
            track_count,
        })
    }

    /// Ask the resolve endpoint where `<site>/<page>` lives in the API.
    fn resolve(&self, handle: &str, page: &str) -> Result<String> {
        let target = format!("{}/{}", self.site_url, page);
        debug!(%target, "resolving");

        let response = self
            .resolver
            .get(&self.resolve_url)
            .query(&[("url", target.as_str()), ("client_id", self.client_id.as_str())])
            .send()?;
        let status = response.status();

        if status.is_redirection() {
            if let Some(location) = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
            {
                return Ok(location.to_string());
            }
        }

        let text = response.text()?;
        let body: ResolveBody = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() && !status.is_redirection() => {
                return Err(Error::Status {
                    url: self.resolve_url.clone(),
                    status,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(message) = ApiError::first_message(&body.errors) {
            return Err(Error::UserNotFound {
                handle: handle.to_string(),
                message,
            });
        }

        body.location.ok_or_else(|| Error::UnexpectedResponse {
            url: self.resolve_url.clone(),
            reason: format!("status {status} without a location"),
        })
    }

    /// Fetch every track of `profile`, paging when the catalog is larger than one page.
    ///
    /// Pages are concatenated in request order. Any failed page aborts the whole fetch.
    pub fn fetch_tracks(&self, profile: &Profile, progress: &Progress) -> Result<Vec<TrackRecord>> {
        let page_size = u64::from(self.page_size);

        if profile.track_count <= page_size {
            return self.fetch_page(&profile.tracks_url, None);
        }

        let pages = profile.track_count.div_ceil(page_size);
        let bar = progress.pages(pages);
        let mut tracks = Vec::new();

        for page in 0..pages {
            let mut batch = self.fetch_page(&profile.tracks_url, Some(page * page_size))?;
            tracks.append(&mut batch);
            bar.inc(1);
        }
        bar.finish_and_clear();

        debug!(pages, fetched = tracks.len(), "catalog fetched");
        Ok(tracks)
    }

    fn fetch_page(&self, tracks_url: &str, offset: Option<u64>) -> Result<Vec<TrackRecord>> {
        let url = self.with_credential(tracks_url)?;
        debug!(url = %tracks_url, ?offset, "fetching catalog page");

        let mut request = self
            .http
            .get(url)
            .timeout(self.timeout)
            .query(&[("limit", self.page_size)]);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        read_json(tracks_url, request.send()?)
    }

    /// Open the media stream behind a track's `stream_url`.
    ///
    /// Returns an error for transport failures and for non-2xx answers, so a
    /// caller never sees a response it should not read from.
    pub fn open_stream(&self, stream_url: &str) -> Result<Response> {
        let url = self.with_credential(stream_url)?;
        debug!(url = %stream_url, "opening stream");

        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: stream_url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    /// Append `client_id` unless the URL already carries one.
    fn with_credential(&self, raw: &str) -> Result<Url> {
        let mut url = Url::parse(raw).map_err(|e| Error::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if !url.query_pairs().any(|(k, _)| k == "client_id") {
            url.query_pairs_mut().append_pair("client_id", &self.client_id);
        }
        Ok(url)
    }
}

fn read_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status,
        });
    }
    Ok(response.json()?)
}
