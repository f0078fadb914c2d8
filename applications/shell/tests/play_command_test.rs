//! End-to-end tests for the `play` command against a mock backend.

use minerva_core::{MinervaError, TrackId};
use minerva_playback::{PlaybackError, PlaybackEvent, PlaybackState};
use minerva_shell::commands::{self, PlayOptions};
use minerva_shell::{ShellConfig, ShellError};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ===== Test Helpers =====

async fn backend() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "a1", "title": "One", "artist": "Band", "album": "Record", "duration": 120, "torrentHash": "h-a" },
            { "id": "x1", "title": "Stray", "artist": "Other", "album": "Single", "duration": 60 },
            { "id": "a2", "title": "Two", "artist": "Band", "album": "Record", "duration": 150, "torrentHash": "h-a" },
            { "id": "a3", "title": "Three", "artist": "Band", "album": "Record", "duration": 90, "torrentHash": "h-a" },
            { "id": "b1", "title": "Opener", "artist": "Duo", "album": "Split", "duration": 80 },
            { "id": "gone", "title": "Deleted", "artist": "Duo", "album": "Split", "duration": 70 }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/api/stream/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/api/stream/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("HEAD"))
        .and(path_regex(r"^/api/stream/[a-z0-9]+$"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/api/lastfm/.+$"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cover/h-a"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(vec![0x89, b'P', b'N', b'G']),
        )
        .mount(&server)
        .await;

    server
}

fn config_for(server: &MockServer) -> ShellConfig {
    let mut config = ShellConfig::default();
    config.backend.url = server.uri();
    config.startup.wait_attempts = 2;
    config.startup.wait_delay_ms = 10;
    config.startup.catalog_retries = 2;
    config.startup.catalog_retry_delay_ms = 10;
    config
}

async fn run_play(
    server: &MockServer,
    track_id: &str,
    options: PlayOptions,
) -> minerva_shell::Result<minerva_shell::PlayReport> {
    let config = config_for(server);
    let client = commands::connect(&config).await?;
    let catalog = commands::load_catalog(&client, &config).await;
    commands::play(&client, &config, catalog, TrackId::new(track_id), options).await
}

// ===== Tests =====

#[tokio::test]
async fn test_play_single_track() {
    let server = backend().await;

    let report = run_play(&server, "x1", PlayOptions::default()).await.unwrap();

    assert_eq!(report.snapshot.state, PlaybackState::Playing);
    assert_eq!(report.now_playing.title, "Stray");
    assert_eq!(report.progress.total, "1:00");
    assert!(report.queue.is_empty());
    assert!(report.artwork.is_placeholder());
}

#[tokio::test]
async fn test_play_album_queues_record_in_order() {
    let server = backend().await;

    let options = PlayOptions {
        from_album: true,
        finish: 0,
    };
    let report = run_play(&server, "a2", options).await.unwrap();

    let titles: Vec<&str> = report.queue.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two", "Three"]);
    assert!(report.queue[1].is_current);
    assert!(!report.artwork.is_placeholder());
}

#[tokio::test]
async fn test_finishing_tracks_advances_and_stops_at_end() {
    let server = backend().await;

    let options = PlayOptions {
        from_album: true,
        finish: 1,
    };
    let report = run_play(&server, "a2", options).await.unwrap();
    assert_eq!(report.now_playing.title, "Three");
    assert!(report.queue[2].is_current);
    assert!(report
        .events
        .contains(&PlaybackEvent::TrackFinished {
            track_id: "a2".into()
        }));

    let options = PlayOptions {
        from_album: true,
        finish: 5,
    };
    let report = run_play(&server, "a2", options).await.unwrap();
    assert_eq!(report.snapshot.state, PlaybackState::Idle);
    assert!(!report.now_playing.is_active());
    assert!(report.artwork.is_placeholder());
}

#[tokio::test]
async fn test_unplayable_next_track_stops_with_notice() {
    let server = backend().await;

    let options = PlayOptions {
        from_album: true,
        finish: 2,
    };
    let report = run_play(&server, "b1", options).await.unwrap();

    assert_eq!(report.snapshot.state, PlaybackState::Idle);
    assert!(report.snapshot.current_track_id.is_none());
    assert!(!report.now_playing.is_active());
    assert!(report.queue[1].is_current);
    assert_eq!(report.notices().count(), 1);
}

#[tokio::test]
async fn test_missing_track_is_reported() {
    let server = backend().await;

    let result = run_play(&server, "missing", PlayOptions::default()).await;

    match result.unwrap_err() {
        ShellError::Playback(PlaybackError::Resolution { source, .. }) => {
            assert!(matches!(source, MinervaError::TrackNotFound(_)));
        }
        e => panic!("Expected resolution failure, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_unreachable_backend_fails_connect() {
    let mut config = ShellConfig::default();
    config.backend.url = "http://127.0.0.1:1".to_string();
    config.backend.connect_timeout_secs = 1;
    config.startup.wait_attempts = 2;
    config.startup.wait_delay_ms = 10;

    let result = commands::connect(&config).await;

    assert!(matches!(result, Err(ShellError::Backend(_))));
}
