//! Headless media transport
//!
//! Stands in for the audio element: it accepts stream URLs and tracks a
//! simulated playhead, logging what a real element would do.

use minerva_playback::{MediaTransport, PlaybackError};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct HeadlessTransport {
    url: Option<String>,
    playing: bool,
    position: f64,
    duration: Option<f64>,
    gain: f32,
}

impl HeadlessTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL of the loaded stream
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Report a duration, as a real element would once metadata arrives
    pub fn set_duration(&mut self, duration: Option<f64>) {
        self.duration = duration;
    }

    /// Move the playhead forward while playing, stopping at the end
    pub fn advance(&mut self, seconds: f64) {
        if !self.playing {
            return;
        }
        let target = self.position + seconds.max(0.0);
        self.position = match self.known_duration() {
            Some(duration) => target.min(duration),
            None => target,
        };
    }
}

impl MediaTransport for HeadlessTransport {
    fn load(&mut self, url: &str) -> minerva_playback::Result<()> {
        if url.is_empty() {
            return Err(PlaybackError::Playback("empty stream URL".to_string()));
        }
        info!(url = %url, "Loading stream");
        self.url = Some(url.to_string());
        self.playing = false;
        self.position = 0.0;
        self.duration = None;
        Ok(())
    }

    fn play(&mut self) -> minerva_playback::Result<()> {
        if self.url.is_none() {
            return Err(PlaybackError::Playback("no stream loaded".to_string()));
        }
        debug!("Output started");
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        debug!(position = self.position, "Output paused");
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        debug!(seconds, "Seek");
        self.position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, gain: f32) {
        debug!(gain, "Volume");
        self.gain = gain;
    }
}
