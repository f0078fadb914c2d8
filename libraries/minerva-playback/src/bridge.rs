//! Transport event bridge
//!
//! Adapts media element lifecycle events into controller calls, keeps the
//! transport bar display current and fires best-effort telemetry.

use std::sync::Arc;

use minerva_core::{Telemetry, TrackId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    controller::PlaybackController,
    format::{format_time, ZERO_TIME},
    transport::MediaTransport,
    types::PlayRequest,
};

/// Lifecycle events raised by the media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransportEvent {
    /// Stream metadata (including duration) became available
    MetadataLoaded,
    /// Playhead moved
    TimeProgressed,
    /// Stream played to its natural end
    Ended,
    /// Output started or resumed
    PlaybackStarted,
    /// The element failed to load or play the stream
    Error { message: String },
}

/// Transport bar contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressDisplay {
    /// Elapsed time, `m:ss`
    pub elapsed: String,
    /// Total duration, `m:ss`, `0:00` when unknown
    pub total: String,
    /// Elapsed / duration in `[0, 1]`
    pub ratio: f64,
}

impl Default for ProgressDisplay {
    fn default() -> Self {
        Self {
            elapsed: ZERO_TIME.to_string(),
            total: ZERO_TIME.to_string(),
            ratio: 0.0,
        }
    }
}

/// A best-effort notification for the backend
#[derive(Debug, Clone)]
enum Notification {
    NowPlaying(TrackId),
    Scrobble { track_id: TrackId, timestamp: i64 },
}

/// Feeds media element events into a [`PlaybackController`]
///
/// Telemetry is spawned on the ambient tokio runtime and never awaited by
/// the bridge; failures are logged at debug level and otherwise ignored.
pub struct TransportEventBridge {
    telemetry: Option<Arc<dyn Telemetry>>,
    display: ProgressDisplay,
}

impl TransportEventBridge {
    /// Bridge reporting playback activity to `telemetry`
    pub fn new(telemetry: Arc<dyn Telemetry>) -> Self {
        Self {
            telemetry: Some(telemetry),
            display: ProgressDisplay::default(),
        }
    }

    /// Bridge that never reports telemetry
    pub fn without_telemetry() -> Self {
        Self {
            telemetry: None,
            display: ProgressDisplay::default(),
        }
    }

    /// Current transport bar contents
    pub fn display(&self) -> &ProgressDisplay {
        &self.display
    }

    /// Handle one media element event
    ///
    /// Returns a play request when the event advanced the queue; the caller
    /// resolves it and completes it on the controller.
    pub fn handle<T: MediaTransport>(
        &mut self,
        controller: &mut PlaybackController<T>,
        event: TransportEvent,
    ) -> Option<PlayRequest> {
        match event {
            TransportEvent::MetadataLoaded => {
                let duration = controller.transport().known_duration();
                debug!(duration = ?duration, "Metadata loaded");
                self.display.total = duration.map_or_else(|| ZERO_TIME.to_string(), format_time);
                None
            }
            TransportEvent::TimeProgressed => {
                if let Some(duration) = controller.transport().known_duration() {
                    let elapsed = controller.transport().current_time();
                    self.display.ratio = (elapsed / duration).clamp(0.0, 1.0);
                    self.display.elapsed = format_time(elapsed);
                }
                None
            }
            TransportEvent::Ended => {
                // Scrobble the track that just finished, before the queue moves on
                if let Some(track_id) = controller.current_track_id().cloned() {
                    self.dispatch(Notification::Scrobble {
                        track_id,
                        timestamp: chrono::Utc::now().timestamp(),
                    });
                }
                controller.handle_track_ended()
            }
            TransportEvent::PlaybackStarted => {
                if let Some(track_id) = controller.current_track_id().cloned() {
                    self.dispatch(Notification::NowPlaying(track_id));
                }
                None
            }
            TransportEvent::Error { message } => {
                controller.fail_playback(message);
                None
            }
        }
    }

    /// Volume slider moved (0-100)
    pub fn on_volume_input<T: MediaTransport>(
        &mut self,
        controller: &mut PlaybackController<T>,
        level: u8,
    ) {
        controller.set_volume(level);
    }

    fn dispatch(&self, notification: Notification) {
        let Some(telemetry) = self.telemetry.clone() else {
            return;
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!(?notification, "No async runtime, skipping telemetry");
            return;
        };

        runtime.spawn(async move {
            let result = match &notification {
                Notification::NowPlaying(track_id) => telemetry.notify_now_playing(track_id).await,
                Notification::Scrobble {
                    track_id,
                    timestamp,
                } => telemetry.notify_scrobble(track_id, *timestamp).await,
            };

            if let Err(e) = result {
                debug!(?notification, error = %e, "Telemetry notification failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RecordingTransport;
    use crate::types::{PlaybackConfig, PlaybackState};
    use minerva_core::Track;

    fn playing_controller(ids: &[&str]) -> PlaybackController<RecordingTransport> {
        let mut controller =
            PlaybackController::new(RecordingTransport::default(), PlaybackConfig::default());
        let tracks = ids
            .iter()
            .map(|id| Track::new(*id, *id, "Artist", "Album"))
            .collect();
        controller.set_queue(tracks, 0).unwrap();
        let request = controller.begin_play(TrackId::new(ids[0]), false);
        controller
            .complete_play(request, Ok(format!("stream/{}", ids[0])))
            .unwrap();
        controller
    }

    #[test]
    fn metadata_with_unknown_duration_shows_zero() {
        let mut controller = playing_controller(&["a"]);
        controller.transport_mut().duration = Some(f64::INFINITY);
        let mut bridge = TransportEventBridge::without_telemetry();

        bridge.handle(&mut controller, TransportEvent::MetadataLoaded);
        assert_eq!(bridge.display().total, "0:00");

        controller.transport_mut().duration = Some(185.0);
        bridge.handle(&mut controller, TransportEvent::MetadataLoaded);
        assert_eq!(bridge.display().total, "3:05");
    }

    #[test]
    fn progress_updates_only_with_known_duration() {
        let mut controller = playing_controller(&["a"]);
        let mut bridge = TransportEventBridge::without_telemetry();
        controller.transport_mut().position = 30.0;

        bridge.handle(&mut controller, TransportEvent::TimeProgressed);
        assert_eq!(bridge.display(), &ProgressDisplay::default());

        controller.transport_mut().duration = Some(120.0);
        bridge.handle(&mut controller, TransportEvent::TimeProgressed);
        assert_eq!(bridge.display().elapsed, "0:30");
        assert!((bridge.display().ratio - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn ended_without_runtime_still_advances() {
        let mut controller = playing_controller(&["a", "b"]);
        let mut bridge = TransportEventBridge::without_telemetry();

        let request = bridge
            .handle(&mut controller, TransportEvent::Ended)
            .unwrap();

        assert_eq!(request.track_id().as_str(), "b");
        assert_eq!(controller.state(), PlaybackState::Loading);
    }

    #[test]
    fn error_event_goes_idle() {
        let mut controller = playing_controller(&["a"]);
        let mut bridge = TransportEventBridge::without_telemetry();

        bridge.handle(
            &mut controller,
            TransportEvent::Error {
                message: "MEDIA_ERR_DECODE".to_string(),
            },
        );

        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(controller.drain_events().iter().any(|e| e.is_user_notice()));
    }

    #[test]
    fn volume_input_sets_gain() {
        let mut controller = playing_controller(&["a"]);
        let mut bridge = TransportEventBridge::without_telemetry();

        bridge.on_volume_input(&mut controller, 25);
        assert!((controller.transport().gain - 0.25).abs() < f32::EPSILON);
    }
}
