//! Command implementations
//!
//! Each command talks to the backend through [`BackendClient`]; `play`
//! additionally drives the playback core the way the desktop shell does,
//! feeding simulated media events through the transport event bridge.

use std::sync::Arc;

use minerva_backend_client::{Artwork, BackendClient};
use minerva_core::{StreamResolver, TrackCatalog, TrackId};
use minerva_playback::{
    MediaTransport, NowPlaying, PlayRequest, PlaybackController, PlaybackEvent, PlaybackSnapshot,
    ProgressDisplay, TransportEvent, TransportEventBridge,
};
use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::error::Result;
use crate::headless::HeadlessTransport;

/// How `play` should behave once the track is audible
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayOptions {
    /// Replace the queue with the track's album
    pub from_album: bool,
    /// Run this many tracks to their natural end
    pub finish: usize,
}

/// One row of the printed queue
#[derive(Debug, Clone, PartialEq)]
pub struct QueueLine {
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub is_current: bool,
}

/// Outcome of a `play` command
#[derive(Debug, Clone)]
pub struct PlayReport {
    pub snapshot: PlaybackSnapshot,
    pub now_playing: NowPlaying,
    pub progress: ProgressDisplay,
    pub queue: Vec<QueueLine>,
    pub artwork: Artwork,
    pub events: Vec<PlaybackEvent>,
}

impl PlayReport {
    /// User-facing failure notices raised while playing
    pub fn notices(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            PlaybackEvent::PlaybackFailed { message, .. } => Some(message.as_str()),
            _ => None,
        })
    }
}

/// Build a client and wait until the backend answers
pub async fn connect(config: &ShellConfig) -> Result<BackendClient> {
    let client = BackendClient::new(config.backend_config())?;
    client
        .wait_for_backend(config.startup.wait_attempts, config.startup.wait_delay())
        .await?;
    Ok(client)
}

/// Start-up catalog load; empty when the backend keeps failing
pub async fn load_catalog(client: &BackendClient, config: &ShellConfig) -> TrackCatalog {
    client
        .library()
        .fetch_catalog_with_retry(
            config.startup.catalog_retries,
            config.startup.catalog_retry_delay(),
        )
        .await
}

/// Play `track_id` headlessly and report the resulting state
pub async fn play(
    client: &BackendClient,
    config: &ShellConfig,
    catalog: TrackCatalog,
    track_id: TrackId,
    options: PlayOptions,
) -> Result<PlayReport> {
    let mut controller = PlaybackController::new(HeadlessTransport::new(), config.playback_config());
    let mut bridge = TransportEventBridge::new(Arc::new(client.clone()));
    let mut events = Vec::new();

    controller.set_catalog(catalog);
    controller
        .play_track_by_id(client, track_id, options.from_album)
        .await?;
    start_output(&mut controller, &mut bridge);

    for _ in 0..options.finish {
        let Some(request) = run_to_end(&mut controller, &mut bridge) else {
            info!("Queue finished");
            break;
        };
        events.extend(controller.drain_events());

        if let Err(e) = resolve_and_complete(client, &mut controller, request).await {
            if e.is_user_visible() {
                warn!(error = %e, "Could not continue with the next track");
            } else {
                debug!(error = %e, "Next track request dropped");
            }
            break;
        }
        start_output(&mut controller, &mut bridge);
    }
    events.extend(controller.drain_events());

    let now_playing = controller.now_playing();
    let artwork = client.fetch_artwork(now_playing.cover_key.as_deref()).await;
    let queue = controller
        .queue()
        .entries()
        .map(|entry| QueueLine {
            index: entry.index,
            title: entry.track.title.clone(),
            artist: entry.track.artist.clone(),
            is_current: entry.is_current,
        })
        .collect();

    Ok(PlayReport {
        snapshot: controller.snapshot(),
        now_playing,
        progress: bridge.display().clone(),
        queue,
        artwork,
        events,
    })
}

/// Resolve a queued request and hand the answer back to the controller
async fn resolve_and_complete(
    resolver: &dyn StreamResolver,
    controller: &mut PlaybackController<HeadlessTransport>,
    request: PlayRequest,
) -> minerva_playback::Result<()> {
    let resolution = resolver.resolve_stream_url(request.track_id()).await;
    controller.complete_play(request, resolution)
}

/// What the media element reports right after a stream starts
fn start_output(
    controller: &mut PlaybackController<HeadlessTransport>,
    bridge: &mut TransportEventBridge,
) {
    let duration = controller
        .current_track_id()
        .and_then(|id| controller.catalog().get(id))
        .and_then(|track| track.duration);
    controller.transport_mut().set_duration(duration);

    bridge.handle(controller, TransportEvent::PlaybackStarted);
    bridge.handle(controller, TransportEvent::MetadataLoaded);
    bridge.handle(controller, TransportEvent::TimeProgressed);
}

/// Play the current stream to its end and let the bridge advance the queue
fn run_to_end(
    controller: &mut PlaybackController<HeadlessTransport>,
    bridge: &mut TransportEventBridge,
) -> Option<PlayRequest> {
    let remaining = controller
        .transport()
        .known_duration()
        .map_or(0.0, |duration| duration - controller.transport().current_time());
    controller.transport_mut().advance(remaining);
    bridge.handle(controller, TransportEvent::TimeProgressed);
    bridge.handle(controller, TransportEvent::Ended)
}
