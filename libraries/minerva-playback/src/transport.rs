//! Media transport trait
//!
//! Abstracts the element that actually fetches and plays a stream URL
//! (an HTML audio element in the desktop shell, a logger in the headless
//! shell, a recorder in tests).

use crate::error::Result;

/// Platform media element
///
/// Implementors own the audio output; the controller only issues commands
/// and reads the playhead. Lifecycle notifications travel the other way as
/// [`TransportEvent`](crate::TransportEvent)s fed to the bridge.
pub trait MediaTransport {
    /// Point the transport at a new stream
    ///
    /// # Returns
    /// * `Err(PlaybackError::Playback)` - the transport rejected the URL
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start or resume output
    ///
    /// # Returns
    /// * `Err(PlaybackError::Playback)` - the transport refused to play
    fn play(&mut self) -> Result<()>;

    /// Pause output, keeping the playhead
    fn pause(&mut self);

    /// Current playhead in seconds
    fn current_time(&self) -> f64;

    /// Move the playhead (seconds, already clamped by the caller)
    fn set_current_time(&mut self, seconds: f64);

    /// Total duration in seconds as reported by the element
    ///
    /// May be `None`, NaN or infinite for live or not-yet-buffered streams.
    fn duration(&self) -> Option<f64>;

    /// Set output gain in `[0.0, 1.0]`
    fn set_volume(&mut self, gain: f32);

    /// Duration only when it is known, finite and positive
    fn known_duration(&self) -> Option<f64> {
        self.duration().filter(|d| d.is_finite() && *d > 0.0)
    }
}

/// Recording transport for unit tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub loaded: Vec<String>,
    pub playing: bool,
    pub position: f64,
    pub duration: Option<f64>,
    pub gain: f32,
    pub fail_play: bool,
}

#[cfg(test)]
impl MediaTransport for RecordingTransport {
    fn load(&mut self, url: &str) -> Result<()> {
        self.loaded.push(url.to_string());
        self.position = 0.0;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.fail_play {
            return Err(crate::PlaybackError::Playback("play() rejected".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, gain: f32) {
        self.gain = gain;
    }
}
