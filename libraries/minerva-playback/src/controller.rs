//! Playback controller - core orchestration
//!
//! Single owner of "what is audible right now". Coordinates the queue, the
//! media transport and the track catalog, and turns queue effects into play
//! requests.
//!
//! Playing a track is split in two so stream resolution can run on the
//! async side without holding the controller:
//!
//! ```text
//! begin_play(id)  ──►  PlayRequest  ──►  resolver.resolve_stream_url(id).await
//!                                                     │
//! complete_play(request, result)  ◄───────────────────┘
//! ```
//!
//! Every `begin_play` issues a fresh token. Only the newest request may
//! complete; a slower, older resolution is discarded without touching state.

use minerva_core::{CatalogSource, StreamResolver, Track, TrackCatalog, TrackId};
use tracing::{debug, info, warn};

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    now_playing::NowPlaying,
    queue::{QueueEffect, QueueStore},
    transport::MediaTransport,
    types::{PlayRequest, PlaybackConfig, PlaybackSnapshot, PlaybackState},
    volume::Volume,
};

/// Message shown to the user when a track cannot be played
const PLAY_FAILED_NOTICE: &str = "Could not play track";

/// Request currently awaiting its stream URL
#[derive(Debug)]
struct PendingPlay {
    token: u64,
    /// Stable state to fall back to if resolution fails
    prior_state: PlaybackState,
}

/// Central playback management
///
/// Orchestrates all playback functionality:
/// - Queue management (set/add/remove/clear, next/previous)
/// - Stream resolution with last-request-wins fencing
/// - Play/pause, seek, volume
/// - Now-playing projection against the track catalog
pub struct PlaybackController<T: MediaTransport> {
    // State
    state: PlaybackState,
    current_track_id: Option<TrackId>,
    expanded: bool,

    // Collaborators
    transport: T,
    queue: QueueStore,
    catalog: TrackCatalog,
    volume: Volume,

    // Fencing for in-flight resolutions
    latest_token: u64,
    pending: Option<PendingPlay>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<T: MediaTransport> PlaybackController<T> {
    /// Create new playback controller around a media transport
    pub fn new(mut transport: T, config: PlaybackConfig) -> Self {
        let volume = Volume::new(config.volume);
        transport.set_volume(volume.gain());

        Self {
            state: PlaybackState::Idle,
            current_track_id: None,
            expanded: false,
            transport,
            queue: QueueStore::new(),
            catalog: TrackCatalog::new(),
            volume,
            latest_token: 0,
            pending: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Catalog =====

    /// Replace the cached catalog used for now-playing and album queues
    pub fn set_catalog(&mut self, catalog: TrackCatalog) {
        debug!(tracks = catalog.len(), "Catalog replaced");
        self.catalog = catalog;
    }

    /// Re-fetch the catalog from `source`
    ///
    /// On failure the previous catalog is kept.
    pub async fn refresh_catalog<S>(&mut self, source: &S) -> minerva_core::Result<usize>
    where
        S: CatalogSource + ?Sized,
    {
        let tracks = source.fetch_catalog().await?;
        let count = tracks.len();
        self.set_catalog(TrackCatalog::from_tracks(tracks));
        info!(tracks = count, "Refreshed catalog");
        Ok(count)
    }

    /// Cached catalog
    pub fn catalog(&self) -> &TrackCatalog {
        &self.catalog
    }

    // ===== Playing a track =====

    /// Start playing `track_id`: enter `Loading` and hand out a request
    ///
    /// The caller resolves the stream URL and passes the outcome to
    /// [`complete_play`](Self::complete_play). Issuing a new request
    /// supersedes any request still in flight.
    pub fn begin_play(&mut self, track_id: TrackId, derive_queue_from_album: bool) -> PlayRequest {
        self.latest_token += 1;
        let token = self.latest_token;

        // A superseded request never became stable, so keep its fallback
        let prior_state = match self.pending.take() {
            Some(previous) => previous.prior_state,
            None => self.state,
        };
        self.pending = Some(PendingPlay { token, prior_state });

        debug!(track_id = %track_id, token, "Requesting stream");
        self.set_state(PlaybackState::Loading);

        PlayRequest {
            token,
            track_id,
            derive_queue_from_album,
        }
    }

    /// Finish a play request with the resolver's answer
    ///
    /// - Stale request: discarded, nothing changes, `Superseded` returned.
    /// - Resolution failed: back to the state before the request, queue
    ///   untouched, failure surfaced. Requests issued by the queue fall
    ///   back to `Idle` with no current track.
    /// - Transport refused the stream: `Idle`, failure surfaced.
    /// - Success: `Playing`, current track set, and the queue replaced by
    ///   the track's album when the request asked for it.
    pub fn complete_play(
        &mut self,
        request: PlayRequest,
        resolution: minerva_core::Result<String>,
    ) -> Result<()> {
        let PlayRequest {
            token,
            track_id,
            derive_queue_from_album,
        } = request;

        let is_latest = self.pending.as_ref().is_some_and(|p| p.token == token);
        if !is_latest {
            debug!(track_id = %track_id, token, "Discarding superseded play request");
            return Err(PlaybackError::Superseded { track_id });
        }
        let Some(pending) = self.pending.take() else {
            return Err(PlaybackError::Superseded { track_id });
        };

        let url = match resolution {
            Ok(url) => url,
            Err(source) => {
                warn!(track_id = %track_id, error = %source, "Stream resolution failed");
                if pending.prior_state == PlaybackState::Idle {
                    self.transport.pause();
                    self.current_track_id = None;
                }
                self.set_state(pending.prior_state);
                self.emit_failure(Some(track_id.clone()), PLAY_FAILED_NOTICE.to_string());
                return Err(PlaybackError::Resolution { track_id, source });
            }
        };

        if let Err(e) = self.transport.load(&url).and_then(|()| self.transport.play()) {
            warn!(track_id = %track_id, url = %url, error = %e, "Transport rejected stream");
            self.current_track_id = None;
            self.set_state(PlaybackState::Idle);
            self.emit_failure(Some(track_id), e.to_string());
            return Err(e);
        }

        info!(track_id = %track_id, url = %url, "Playing track");
        let previous_track_id = self.current_track_id.replace(track_id.clone());
        self.set_state(PlaybackState::Playing);
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track_id.clone(),
            previous_track_id,
        });

        if derive_queue_from_album {
            self.queue_album_of(&track_id)?;
        }

        Ok(())
    }

    /// Resolve and play `track_id` in one step
    ///
    /// Convenience over `begin_play` + `complete_play` for callers that
    /// await resolution inline.
    pub async fn play_track_by_id<R>(
        &mut self,
        resolver: &R,
        track_id: TrackId,
        derive_queue_from_album: bool,
    ) -> Result<()>
    where
        R: StreamResolver + ?Sized,
    {
        let request = self.begin_play(track_id, derive_queue_from_album);
        let resolution = resolver.resolve_stream_url(request.track_id()).await;
        self.complete_play(request, resolution)
    }

    /// Replace the queue with the album containing `track_id`
    fn queue_album_of(&mut self, track_id: &TrackId) -> Result<()> {
        match self.catalog.album_of(track_id) {
            Some((tracks, position)) => {
                debug!(track_id = %track_id, album_len = tracks.len(), position, "Queueing album");
                self.queue.set_queue(tracks, position)?;
                self.emit_queue_changed();
            }
            None => debug!(track_id = %track_id, "Track not in catalog, queue left as is"),
        }
        Ok(())
    }

    // ===== Transport control =====

    /// Toggle between playing and paused
    ///
    /// Does nothing while idle or loading. The current track never changes.
    pub fn toggle_playback(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Playing => {
                self.transport.pause();
                self.set_state(PlaybackState::Paused);
                Ok(())
            }
            PlaybackState::Paused => {
                if let Err(e) = self.transport.play() {
                    self.fail_playback(e.to_string());
                    return Err(e);
                }
                self.set_state(PlaybackState::Playing);
                Ok(())
            }
            PlaybackState::Idle | PlaybackState::Loading => {
                debug!(state = ?self.state, "Toggle ignored, nothing loaded");
                Ok(())
            }
        }
    }

    /// Seek to `position` seconds, clamped into `[0, duration]`
    ///
    /// Returns the position actually applied.
    pub fn seek(&mut self, position: f64) -> Result<f64> {
        if !self.state.has_track() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        let duration = self
            .transport
            .known_duration()
            .ok_or(PlaybackError::UnknownDuration)?;

        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, duration)
        };
        self.transport.set_current_time(position);
        Ok(position)
    }

    /// Seek to a fraction of the track (progress bar click)
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<f64> {
        let duration = self
            .transport
            .known_duration()
            .ok_or(PlaybackError::UnknownDuration)?;
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.seek(fraction * duration)
    }

    /// Flip the expanded now-playing panel
    pub fn toggle_expand(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.pending_events.push(PlaybackEvent::ExpandedChanged {
            expanded: self.expanded,
        });
        self.expanded
    }

    /// The media element reported an error
    ///
    /// Drops to `Idle` and surfaces the failure. When a newer request is
    /// already resolving, that request keeps going and will fall back to
    /// `Idle` instead of the state it started from.
    pub fn fail_playback(&mut self, message: impl Into<String>) {
        let message = message.into();
        let track_id = self.current_track_id.take();
        warn!(track_id = ?track_id, message = %message, "Playback error");

        match self.pending.as_mut() {
            Some(pending) => pending.prior_state = PlaybackState::Idle,
            None => self.set_state(PlaybackState::Idle),
        }
        self.emit_failure(track_id, message);
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    /// Get current volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    fn apply_volume(&mut self) {
        self.transport.set_volume(self.volume.gain());
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== Queue Management =====

    /// Replace the play context (album, playlist, search results)
    ///
    /// `start_index` must address a track of a non-empty `tracks`. Playback
    /// is not started.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        self.queue.set_queue(tracks, start_index)?;
        self.emit_queue_changed();
        Ok(())
    }

    /// Append a track to the queue without starting it
    pub fn add_to_queue(&mut self, track: Track) {
        self.queue.add(track);
        self.emit_queue_changed();
    }

    /// Remove the track at `index`
    ///
    /// Returns a play request when the current track was removed and a
    /// successor took its place.
    pub fn remove_from_queue(&mut self, index: usize) -> Result<Option<PlayRequest>> {
        let effect = self.queue.remove(index)?;
        self.emit_queue_changed();
        Ok(self.apply_effect(effect))
    }

    /// Empty the queue and stop
    pub fn clear_queue(&mut self) {
        let effect = self.queue.clear();
        self.emit_queue_changed();
        self.apply_effect(effect);
    }

    /// Skip to the next queued track, or stop at the end of the queue
    pub fn play_next(&mut self) -> Option<PlayRequest> {
        let effect = self.queue.next();
        if matches!(effect, QueueEffect::Stop) {
            info!("End of queue");
        } else {
            self.emit_queue_changed();
        }
        self.apply_effect(effect)
    }

    /// Go back one track; a no-op at the start of the queue
    pub fn play_previous(&mut self) -> Option<PlayRequest> {
        let effect = self.queue.previous();
        if matches!(effect, QueueEffect::Boundary) {
            debug!("At beginning of queue");
        } else {
            self.emit_queue_changed();
        }
        self.apply_effect(effect)
    }

    /// The current track reached its natural end
    pub fn handle_track_ended(&mut self) -> Option<PlayRequest> {
        if let Some(track_id) = self.current_track_id.clone() {
            self.pending_events
                .push(PlaybackEvent::TrackFinished { track_id });
        }
        self.play_next()
    }

    /// Queue in play order
    pub fn queue(&self) -> &QueueStore {
        &self.queue
    }

    fn apply_effect(&mut self, effect: QueueEffect) -> Option<PlayRequest> {
        match effect {
            QueueEffect::Play(track_id) => {
                let request = self.begin_play(track_id, false);
                // The queue already moved past the audible track
                if let Some(pending) = self.pending.as_mut() {
                    pending.prior_state = PlaybackState::Idle;
                }
                Some(request)
            }
            QueueEffect::Stop => {
                self.stop();
                None
            }
            QueueEffect::None | QueueEffect::Boundary => None,
        }
    }

    /// Pause output, clear the current track and drop any request in flight
    fn stop(&mut self) {
        self.transport.pause();
        self.pending = None;
        // Invalidate outstanding tickets
        self.latest_token += 1;
        self.current_track_id = None;
        self.set_state(PlaybackState::Idle);
    }

    // ===== State Queries =====

    /// Get current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Id of the audible track
    pub fn current_track_id(&self) -> Option<&TrackId> {
        self.current_track_id.as_ref()
    }

    /// Whether output is running
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether the now-playing panel is expanded
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Copy of the playback record
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state,
            current_track_id: self.current_track_id.clone(),
            is_playing: self.is_playing(),
            is_expanded: self.expanded,
        }
    }

    /// Now-playing panel contents, derived from the catalog
    pub fn now_playing(&self) -> NowPlaying {
        NowPlaying::resolve(self.current_track_id.as_ref(), &self.catalog)
    }

    /// The media transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the media transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
            current_index: self.queue.current_index(),
        });
    }

    fn emit_failure(&mut self, track_id: Option<TrackId>, message: String) {
        self.pending_events
            .push(PlaybackEvent::PlaybackFailed { track_id, message });
    }
}
