//! Queue management integration tests
//!
//! Queue edits and navigation driven through the controller, the way the
//! queue panel and the transport buttons use it.

mod common;

use common::{controller, playing, queue_ids, stream_url, tracks};
use minerva_core::MinervaError;
use minerva_playback::{PlaybackError, PlaybackEvent, PlaybackState, NOT_PLAYING_TITLE, NO_ARTIST};

// ===== Removal =====

#[test]
fn test_remove_before_current_keeps_current_track() {
    let mut controller = playing(&["a", "b", "c"], 1);

    let request = controller.remove_from_queue(0).unwrap();

    assert!(request.is_none());
    assert_eq!(queue_ids(&controller), vec!["b", "c"]);
    assert_eq!(controller.queue().current_index(), Some(0));
    assert_eq!(controller.queue().current().unwrap().id.as_str(), "b");
    assert_eq!(controller.current_track_id().unwrap().as_str(), "b");
    assert_eq!(controller.state(), PlaybackState::Playing);
}

#[test]
fn test_remove_only_track_stops_playback() {
    let mut controller = playing(&["a"], 0);

    let request = controller.remove_from_queue(0).unwrap();

    assert!(request.is_none());
    assert!(controller.queue().is_empty());
    assert_eq!(controller.queue().current_index(), None);
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert!(!controller.transport().playing);
    assert_eq!(controller.now_playing().title, NOT_PLAYING_TITLE);
}

#[test]
fn test_remove_current_track_plays_replacement() {
    let mut controller = playing(&["a", "b", "c"], 1);

    let request = controller.remove_from_queue(1).unwrap().unwrap();
    assert_eq!(request.track_id().as_str(), "c");
    assert_eq!(controller.state(), PlaybackState::Loading);

    controller
        .complete_play(request, Ok(stream_url("c")))
        .unwrap();
    assert_eq!(controller.current_track_id().unwrap().as_str(), "c");
    assert_eq!(controller.queue().current_index(), Some(1));
}

#[test]
fn test_remove_current_track_with_unresolvable_replacement_goes_idle() {
    let mut controller = playing(&["a", "b", "c"], 1);

    let request = controller.remove_from_queue(1).unwrap().unwrap();
    let result = controller.complete_play(
        request,
        Err(MinervaError::TrackNotFound("c".into())),
    );

    assert!(matches!(result, Err(PlaybackError::Resolution { .. })));
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert!(controller.current_track_id().is_none());
    assert!(!controller.transport().playing);
    assert_eq!(queue_ids(&controller), vec!["a", "c"]);
}

#[test]
fn test_remove_out_of_range_is_rejected() {
    let mut controller = playing(&["a", "b"], 0);

    let result = controller.remove_from_queue(7);

    assert!(matches!(result, Err(PlaybackError::IndexOutOfBounds(7))));
    assert_eq!(queue_ids(&controller), vec!["a", "b"]);
}

// ===== Navigation =====

#[test]
fn test_next_at_end_clears_now_playing() {
    let mut controller = playing(&["a", "b"], 1);

    let request = controller.play_next();

    assert!(request.is_none());
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert!(controller.current_track_id().is_none());

    let now = controller.now_playing();
    assert_eq!(now.title, NOT_PLAYING_TITLE);
    assert_eq!(now.artist, NO_ARTIST);
    assert!(now.cover_key.is_none());
}

#[test]
fn test_previous_at_start_changes_nothing() {
    let mut controller = playing(&["a", "b"], 0);

    let request = controller.play_previous();

    assert!(request.is_none());
    assert_eq!(controller.queue().current_index(), Some(0));
    assert_eq!(controller.current_track_id().unwrap().as_str(), "a");
    assert_eq!(controller.state(), PlaybackState::Playing);
    assert!(!controller.has_pending_events());
}

#[test]
fn test_next_and_previous_walk_the_queue() {
    let mut controller = playing(&["a", "b", "c"], 0);

    let request = controller.play_next().unwrap();
    assert_eq!(request.track_id().as_str(), "b");
    controller
        .complete_play(request, Ok(stream_url("b")))
        .unwrap();

    let request = controller.play_previous().unwrap();
    assert_eq!(request.track_id().as_str(), "a");
    controller
        .complete_play(request, Ok(stream_url("a")))
        .unwrap();

    assert_eq!(controller.queue().current_index(), Some(0));
    assert_eq!(controller.transport().loaded.len(), 3);
}

// ===== Adding and clearing =====

#[test]
fn test_add_to_empty_queue_selects_without_playing() {
    let mut controller = controller();

    controller.add_to_queue(tracks(&["a"]).remove(0));

    assert_eq!(controller.queue().current_index(), Some(0));
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert!(controller.transport().loaded.is_empty());
}

#[test]
fn test_clear_queue_stops_transport() {
    let mut controller = playing(&["a", "b", "c"], 2);

    controller.clear_queue();

    assert!(controller.queue().is_empty());
    assert_eq!(controller.queue().current_index(), None);
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert!(controller.transport().pause_calls > 0);
    assert!(controller
        .drain_events()
        .contains(&PlaybackEvent::QueueChanged {
            length: 0,
            current_index: None
        }));
}

#[test]
fn test_set_queue_rejects_invalid_start() {
    let mut controller = playing(&["a"], 0);

    let result = controller.set_queue(tracks(&["x", "y"]), 2);

    assert!(matches!(result, Err(PlaybackError::IndexOutOfBounds(2))));
    assert_eq!(queue_ids(&controller), vec!["a"]);
}
