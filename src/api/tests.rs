use super::*;
use crate::config::ApiSettings;
use crate::error::Error;
use crate::progress::Progress;
use crate::test_support::{CLIENT_ID, api_settings, track_json};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    tokio::task::spawn_blocking(f).await.unwrap()
}

fn profile(uri: &str, track_count: u64) -> Profile {
    Profile {
        handle: "testuser".to_string(),
        tracks_url: format!("{uri}/users/1/tracks.json"),
        track_count,
    }
}

fn page(first: usize, len: usize) -> serde_json::Value {
    let tracks: Vec<_> = (first..first + len)
        .map(|i| track_json(&format!("Track {i}"), 300_000, None))
        .collect();
    json!(tracks)
}

async fn mount_resolve(server: &MockServer, handle: &str) {
    let uri = server.uri();

    // Catalog resolves through a redirect header...
    Mock::given(method("GET"))
        .and(path("/resolve.json"))
        .and(query_param("url", format!("https://soundcloud.com/{handle}/tracks")))
        .and(query_param("client_id", CLIENT_ID))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{uri}/users/1/tracks.json?client_id={CLIENT_ID}")),
        )
        .mount(server)
        .await;

    // ...the profile through a JSON body.
    Mock::given(method("GET"))
        .and(path("/resolve.json"))
        .and(query_param("url", format!("https://soundcloud.com/{handle}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "302 - Found",
            "location": format!("{uri}/users/1.json?client_id={CLIENT_ID}"),
        })))
        .mount(server)
        .await;
}

#[test]
fn new_requires_a_client_id() {
    let settings = ApiSettings {
        client_id: Some("   ".to_string()),
        ..ApiSettings::default()
    };
    assert!(matches!(
        SoundCloudClient::new(&settings),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        SoundCloudClient::new(&ApiSettings::default()),
        Err(Error::Config(_))
    ));
}

#[test]
fn track_record_tolerates_null_genre_and_missing_stream() {
    let record: TrackRecord = serde_json::from_value(json!({
        "title": "Song",
        "duration": 1000,
        "genre": null,
        "user": { "username": "dj" },
    }))
    .unwrap();
    assert_eq!(record.genre(), "");
    assert_eq!(record.artist(), "dj");
    assert!(record.stream_url.is_none());
    assert!(record.id.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn resolve_profile_reads_location_and_track_count() {
    let server = MockServer::start().await;
    mount_resolve(&server, "testuser").await;
    Mock::given(method("GET"))
        .and(path("/users/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "testuser",
            "track_count": 450,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let settings = api_settings(&uri);
    let profile = blocking(move || {
        let client = SoundCloudClient::new(&settings).unwrap();
        client.resolve_profile("testuser").map_err(|e| e.to_string())
    })
    .await
    .unwrap();

    assert_eq!(profile.handle, "testuser");
    assert_eq!(profile.track_count, 450);
    assert_eq!(
        profile.tracks_url,
        format!("{uri}/users/1/tracks.json?client_id={CLIENT_ID}")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_handle_is_reported_with_platform_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resolve.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{ "error_message": "404 - Not Found" }],
        })))
        .mount(&server)
        .await;

    let settings = api_settings(&server.uri());
    let outcome = blocking(move || {
        let client = SoundCloudClient::new(&settings).unwrap();
        match client.resolve_profile("ghost") {
            Err(Error::UserNotFound { handle, message }) => Some((handle, message)),
            _ => None,
        }
    })
    .await;

    assert_eq!(
        outcome,
        Some(("ghost".to_string(), "404 - Not Found".to_string()))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_lookup_errors_are_fatal() {
    let server = MockServer::start().await;
    mount_resolve(&server, "testuser").await;
    Mock::given(method("GET"))
        .and(path("/users/1.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let settings = api_settings(&server.uri());
    let is_status_error = blocking(move || {
        let client = SoundCloudClient::new(&settings).unwrap();
        matches!(
            client.resolve_profile("testuser"),
            Err(Error::Status { status, .. }) if status.as_u16() == 500
        )
    })
    .await;

    assert!(is_status_error);
}

#[tokio::test(flavor = "multi_thread")]
async fn resolve_answer_without_location_or_errors_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resolve.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let settings = api_settings(&server.uri());
    let is_unexpected = blocking(move || {
        let client = SoundCloudClient::new(&settings).unwrap();
        matches!(
            client.resolve_profile("testuser"),
            Err(Error::UnexpectedResponse { .. })
        )
    })
    .await;

    assert!(is_unexpected);
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_request_carries_credential_when_location_lacks_it() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/resolve.json"))
        .and(query_param("url", "https://soundcloud.com/testuser/tracks"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{uri}/users/1/tracks.json")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resolve.json"))
        .and(query_param("url", "https://soundcloud.com/testuser"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", format!("{uri}/users/1.json")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/1.json"))
        .and(query_param("client_id", CLIENT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "track_count": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = api_settings(&uri);
    let track_count = blocking(move || {
        let client = SoundCloudClient::new(&settings).unwrap();
        client
            .resolve_profile("testuser")
            .map(|p| p.track_count)
            .map_err(|e| e.to_string())
    })
    .await;

    assert_eq!(track_count, Ok(3));
}

#[tokio::test(flavor = "multi_thread")]
async fn large_catalog_is_fetched_in_pages_in_order() {
    let server = MockServer::start().await;
    for (offset, len) in [(0, 200), (200, 200), (400, 50)] {
        Mock::given(method("GET"))
            .and(path("/users/1/tracks.json"))
            .and(query_param("limit", "200"))
            .and(query_param("offset", offset.to_string()))
            .and(query_param("client_id", CLIENT_ID))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(offset, len)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let uri = server.uri();
    let settings = api_settings(&uri);
    let titles = blocking(move || {
        let client = SoundCloudClient::new(&settings).unwrap();
        client
            .fetch_tracks(&profile(&uri, 450), &Progress::new(false))
            .map(|tracks| tracks.into_iter().map(|t| t.title).collect::<Vec<_>>())
            .map_err(|e| e.to_string())
    })
    .await
    .unwrap();

    assert_eq!(titles.len(), 450);
    assert_eq!(titles[0], "Track 0");
    assert_eq!(titles[199], "Track 199");
    assert_eq!(titles[200], "Track 200");
    assert_eq!(titles[449], "Track 449");
}

#[tokio::test(flavor = "multi_thread")]
async fn small_catalog_is_fetched_with_one_unpaginated_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/tracks.json"))
        .and(query_param("limit", "200"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 150)))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let settings = api_settings(&uri);
    let count = blocking(move || {
        let client = SoundCloudClient::new(&settings).unwrap();
        client
            .fetch_tracks(&profile(&uri, 150), &Progress::new(false))
            .map(|tracks| tracks.len())
            .map_err(|e| e.to_string())
    })
    .await
    .unwrap();

    assert_eq!(count, 150);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_page_aborts_the_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/tracks.json"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 200)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/1/tracks.json"))
        .and(query_param("offset", "200"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let uri = server.uri();
    let settings = api_settings(&uri);
    let failed = blocking(move || {
        let client = SoundCloudClient::new(&settings).unwrap();
        client
            .fetch_tracks(&profile(&uri, 300), &Progress::new(false))
            .is_err()
    })
    .await;

    assert!(failed);
}

#[tokio::test(flavor = "multi_thread")]
async fn open_stream_appends_credential_and_rejects_error_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/1/stream"))
        .and(query_param("client_id", CLIENT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"audio".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tracks/2/stream"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let uri = server.uri();
    let settings = api_settings(&uri);
    let (ok_body, missing_is_err) = blocking(move || {
        let client = SoundCloudClient::new(&settings).unwrap();
        let body = client
            .open_stream(&format!("{uri}/tracks/1/stream"))
            .and_then(|r| Ok(r.text()?))
            .map_err(|e| e.to_string());
        let missing = client.open_stream(&format!("{uri}/tracks/2/stream")).is_err();
        (body, missing)
    })
    .await;

    assert_eq!(ok_body.unwrap(), "audio");
    assert!(missing_is_err);
}
