//! Play queue
//!
//! Ordered list of tracks plus a pointer to the current one. The store is
//! pure state: operations that need the player to react return a
//! [`QueueEffect`] instead of touching the transport themselves.

use crate::error::{PlaybackError, Result};
use minerva_core::{Track, TrackId};

/// What the player has to do after a queue operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEffect {
    /// Nothing changes for the player
    None,

    /// Navigation hit the start of the queue; reported, not an error
    Boundary,

    /// The current track changed and should be played
    Play(TrackId),

    /// Playback should stop and now-playing be cleared
    Stop,
}

/// One row of the queue listing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueEntry<'a> {
    pub index: usize,
    pub track: &'a Track,
    pub is_current: bool,
}

/// Ordered play queue
///
/// Invariant: `current` is `None` exactly when `tracks` is empty, and is
/// otherwise a valid index into `tracks`.
///
/// ```text
/// tracks:  [A] [B] [C] [D]
///                ^
///             current = Some(1)
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueueStore {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl QueueStore {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole queue
    ///
    /// `start_index` must point at a track when `tracks` is non-empty; an
    /// out-of-range index is rejected and the queue is left untouched. An
    /// empty `tracks` always yields the empty queue.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        if tracks.is_empty() {
            self.tracks = tracks;
            self.current = None;
            return Ok(());
        }

        if start_index >= tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds(start_index));
        }

        self.tracks = tracks;
        self.current = Some(start_index);
        Ok(())
    }

    /// Append a track
    ///
    /// The first track added to an empty queue becomes current. Playback is
    /// not started.
    pub fn add(&mut self, track: Track) {
        self.tracks.push(track);
        if self.current.is_none() {
            self.current = Some(0);
        }
    }

    /// Remove the track at `index`
    ///
    /// Removing a track before the current one keeps the same track
    /// current. Removing the current track selects its successor (or the new
    /// last track) and asks for it to be played, or asks to stop when the
    /// queue runs empty.
    pub fn remove(&mut self, index: usize) -> Result<QueueEffect> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }

        self.tracks.remove(index);

        let Some(current) = self.current else {
            return Ok(QueueEffect::None);
        };

        if index < current {
            self.current = Some(current - 1);
            Ok(QueueEffect::None)
        } else if index == current {
            if self.tracks.is_empty() {
                self.current = None;
                Ok(QueueEffect::Stop)
            } else {
                let next = current.min(self.tracks.len() - 1);
                self.current = Some(next);
                Ok(QueueEffect::Play(self.tracks[next].id.clone()))
            }
        } else {
            Ok(QueueEffect::None)
        }
    }

    /// Empty the queue
    pub fn clear(&mut self) -> QueueEffect {
        self.tracks.clear();
        self.current = None;
        QueueEffect::Stop
    }

    /// Step back one track
    ///
    /// At the first track (or on an empty queue) this is a no-op reported as
    /// [`QueueEffect::Boundary`].
    pub fn previous(&mut self) -> QueueEffect {
        match self.current {
            Some(current) if current > 0 => {
                self.current = Some(current - 1);
                QueueEffect::Play(self.tracks[current - 1].id.clone())
            }
            _ => QueueEffect::Boundary,
        }
    }

    /// Step forward one track
    ///
    /// Past the last track the queue is exhausted: the index stays where it
    /// is and the player is told to stop.
    pub fn next(&mut self) -> QueueEffect {
        match self.current {
            Some(current) if current + 1 < self.tracks.len() => {
                self.current = Some(current + 1);
                QueueEffect::Play(self.tracks[current + 1].id.clone())
            }
            _ => QueueEffect::Stop,
        }
    }

    /// Current position, `None` when empty
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Current track
    pub fn current(&self) -> Option<&Track> {
        self.current.map(|i| &self.tracks[i])
    }

    /// Track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Queue rows with their position and current marker
    pub fn entries(&self) -> impl Iterator<Item = QueueEntry<'_>> {
        self.tracks.iter().enumerate().map(|(index, track)| QueueEntry {
            index,
            track,
            is_current: self.current == Some(index),
        })
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), "Test Artist", "Test Album")
    }

    fn queue_of(ids: &[&str], start: usize) -> QueueStore {
        let mut queue = QueueStore::new();
        queue
            .set_queue(ids.iter().map(|id| create_test_track(id)).collect(), start)
            .unwrap();
        queue
    }

    #[test]
    fn create_empty_queue() {
        let queue = QueueStore::new();
        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
        assert!(queue.current().is_none());
    }

    #[test]
    fn first_added_track_becomes_current() {
        let mut queue = QueueStore::new();
        queue.add(create_test_track("a"));
        queue.add(create_test_track("b"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current_index(), Some(0));
        assert_eq!(queue.current().unwrap().id.as_str(), "a");
    }

    #[test]
    fn set_queue_rejects_out_of_range_start() {
        let mut queue = queue_of(&["a", "b"], 1);

        let result = queue.set_queue(vec![create_test_track("x")], 3);
        assert!(matches!(result, Err(PlaybackError::IndexOutOfBounds(3))));

        // Untouched
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn set_queue_empty_ignores_start() {
        let mut queue = queue_of(&["a"], 0);
        queue.set_queue(Vec::new(), 5).unwrap();

        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn remove_before_current_keeps_identity() {
        let mut queue = queue_of(&["a", "b", "c"], 1);

        let effect = queue.remove(0).unwrap();

        assert_eq!(effect, QueueEffect::None);
        assert_eq!(queue.current_index(), Some(0));
        assert_eq!(queue.current().unwrap().id.as_str(), "b");
    }

    #[test]
    fn remove_only_track_stops() {
        let mut queue = queue_of(&["a"], 0);

        assert_eq!(queue.remove(0).unwrap(), QueueEffect::Stop);
        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn remove_current_plays_successor() {
        let mut queue = queue_of(&["a", "b", "c"], 1);

        assert_eq!(queue.remove(1).unwrap(), QueueEffect::Play("c".into()));
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn remove_current_last_clamps_back() {
        let mut queue = queue_of(&["a", "b", "c"], 2);

        assert_eq!(queue.remove(2).unwrap(), QueueEffect::Play("b".into()));
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn remove_after_current_is_quiet() {
        let mut queue = queue_of(&["a", "b", "c"], 0);

        assert_eq!(queue.remove(2).unwrap(), QueueEffect::None);
        assert_eq!(queue.current_index(), Some(0));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn remove_out_of_bounds() {
        let mut queue = queue_of(&["a"], 0);
        assert!(matches!(
            queue.remove(1),
            Err(PlaybackError::IndexOutOfBounds(1))
        ));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn previous_at_start_is_boundary() {
        let mut queue = queue_of(&["a", "b"], 0);

        assert_eq!(queue.previous(), QueueEffect::Boundary);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn next_at_end_stops_without_moving() {
        let mut queue = queue_of(&["a", "b"], 1);

        assert_eq!(queue.next(), QueueEffect::Stop);
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn navigation_round_trip() {
        let mut queue = queue_of(&["a", "b", "c"], 0);

        assert_eq!(queue.next(), QueueEffect::Play("b".into()));
        assert_eq!(queue.next(), QueueEffect::Play("c".into()));
        assert_eq!(queue.previous(), QueueEffect::Play("b".into()));
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn clear_resets_and_stops() {
        let mut queue = queue_of(&["a", "b"], 1);

        assert_eq!(queue.clear(), QueueEffect::Stop);
        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn entries_mark_current() {
        let queue = queue_of(&["a", "b", "c"], 1);

        let marks: Vec<bool> = queue.entries().map(|e| e.is_current).collect();
        assert_eq!(marks, vec![false, true, false]);
    }
}
