//! Shared helpers for playback integration tests

#![allow(dead_code)]

use minerva_core::{Track, TrackCatalog};
use minerva_playback::{MediaTransport, PlaybackConfig, PlaybackController, PlaybackError};

/// Transport that records every command instead of producing sound
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub loaded: Vec<String>,
    pub playing: bool,
    pub pause_calls: usize,
    pub position: f64,
    pub duration: Option<f64>,
    pub gain: f32,
    pub reject_play: bool,
}

impl MediaTransport for RecordingTransport {
    fn load(&mut self, url: &str) -> minerva_playback::Result<()> {
        self.loaded.push(url.to_string());
        self.position = 0.0;
        Ok(())
    }

    fn play(&mut self) -> minerva_playback::Result<()> {
        if self.reject_play {
            return Err(PlaybackError::Playback("NotAllowedError".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
        self.pause_calls += 1;
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

pub fn create_track(id: &str, artist: &str, album: &str) -> Track {
    Track::new(id, format!("Song {}", id), artist, album)
        .with_duration(200.0)
        .with_cover_key(format!("hash-{}", id))
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter()
        .map(|id| create_track(id, "Artist", "Album"))
        .collect()
}

pub fn stream_url(id: &str) -> String {
    format!("http://127.0.0.1:4567/api/stream/{}", id)
}

pub fn controller() -> PlaybackController<RecordingTransport> {
    PlaybackController::new(RecordingTransport::default(), PlaybackConfig::default())
}

/// Controller with `ids` queued and the track at `start` audible
pub fn playing(ids: &[&str], start: usize) -> PlaybackController<RecordingTransport> {
    let mut controller = controller();
    controller.set_catalog(TrackCatalog::from_tracks(tracks(ids)));
    controller.set_queue(tracks(ids), start).unwrap();

    let request = controller.begin_play(ids[start].into(), false);
    controller
        .complete_play(request, Ok(stream_url(ids[start])))
        .unwrap();
    controller.drain_events();
    controller
}

pub fn queue_ids(controller: &PlaybackController<RecordingTransport>) -> Vec<String> {
    controller
        .queue()
        .tracks()
        .iter()
        .map(|t| t.id.to_string())
        .collect()
}
