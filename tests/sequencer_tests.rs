//! Playback sequencer tests

mod common;

use bugle_player::audio::EngineEvent;
use bugle_player::logging::{LogLevel, LogStream};
use bugle_player::registry::{Sequence, Track};
use bugle_player::sequencer::{Mode, PlaybackState, Sequencer};
use common::{Call, RecordingEngine};

static A: Track = Track::new("A", "/a.mp3");
static B: Track = Track::new("B", "/b.mp3");
static C: Track = Track::new("C", "/c.mp3");
static X: Track = Track::new("X", "/x.mp3");
static ABC: Sequence = Sequence::new("abc", &[&A, &B, &C]);
static AB: Sequence = Sequence::new("ab", &[&A, &B]);

/// Let the current track end and give the sequencer a look.
fn complete(seq: &mut Sequencer<'_>, engine: &mut RecordingEngine, now: u32) -> bool {
    engine.finish_track();
    seq.poll_completion(engine, now)
}

#[test]
fn test_sequence_plays_in_order_then_idles() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();

    seq.start_sequence(&ABC, &mut engine, 0);
    assert_eq!(seq.state().active_index, 0);

    assert!(complete(&mut seq, &mut engine, 10));
    assert_eq!(seq.state().active_index, 1);
    assert!(complete(&mut seq, &mut engine, 20));
    assert_eq!(seq.state().active_index, 2);
    assert!(complete(&mut seq, &mut engine, 30));

    assert_eq!(engine.starts(), vec!["/a.mp3", "/b.mp3", "/c.mp3"]);
    assert_eq!(*seq.state(), PlaybackState::IDLE);

    // A fourth completion signal changes nothing
    let calls_before = engine.calls.len();
    assert!(!complete(&mut seq, &mut engine, 40));
    seq.advance(&mut engine, 40);
    assert_eq!(engine.calls.len(), calls_before);
    assert_eq!(seq.mode(), Mode::Idle);
}

#[test]
fn test_every_start_stops_first() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();

    seq.start_sequence(&AB, &mut engine, 0);
    complete(&mut seq, &mut engine, 10);

    assert_eq!(
        engine.calls,
        vec![
            Call::Stop,
            Call::Start("/a.mp3".into()),
            Call::Stop,
            Call::Start("/b.mp3".into()),
        ]
    );
}

#[test]
fn test_direct_preempts_sequence() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();

    seq.start_sequence(&AB, &mut engine, 0);
    engine.calls.clear();

    seq.start_direct(&X, &mut engine, 5);

    assert_eq!(engine.calls, vec![Call::Stop, Call::Start("/x.mp3".into())]);
    let state = seq.state();
    assert_eq!(state.mode, Mode::PlayingDirect);
    assert_eq!(state.active_sequence, None);
    assert_eq!(state.active_index, 0);
    assert_eq!(state.current_track, Some(&X));

    // No resumption of the discarded sequence
    assert!(!complete(&mut seq, &mut engine, 10));
    assert_eq!(engine.starts(), vec!["/x.mp3"]);
}

#[test]
fn test_sequence_preempts_sequence() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();

    seq.start_sequence(&ABC, &mut engine, 0);
    complete(&mut seq, &mut engine, 10);
    seq.start_sequence(&AB, &mut engine, 20);

    assert_eq!(seq.state().active_sequence, Some(&AB));
    assert_eq!(seq.state().active_index, 0);
}

#[test]
fn test_stop_is_idempotent() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();

    seq.start_sequence(&AB, &mut engine, 0);
    seq.stop(&mut engine, 10);
    let after_first = *seq.state();
    seq.stop(&mut engine, 20);

    assert_eq!(after_first, PlaybackState::IDLE);
    assert_eq!(*seq.state(), PlaybackState::IDLE);
    // Forwarded to the engine both times
    assert_eq!(engine.calls.iter().filter(|c| **c == Call::Stop).count(), 3);
}

#[test]
fn test_stop_while_idle_still_reaches_engine() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();

    seq.stop(&mut engine, 0);

    assert_eq!(engine.calls, vec![Call::Stop]);
    assert_eq!(seq.mode(), Mode::Idle);
}

#[test]
fn test_completion_needs_running_first() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();
    engine.auto_run = false;

    // Engine still buffering: not running yet is not a completion
    seq.start_sequence(&AB, &mut engine, 0);
    assert!(!seq.poll_completion(&mut engine, 1));
    assert!(!seq.poll_completion(&mut engine, 2));

    engine.running = true;
    assert!(!seq.poll_completion(&mut engine, 3));

    engine.running = false;
    assert!(seq.poll_completion(&mut engine, 4));
    assert_eq!(seq.state().active_index, 1);
}

#[test]
fn test_explicit_finished_event_advances() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();

    seq.start_sequence(&AB, &mut engine, 0);

    // Engine reports the end directly, even though a poll would look busy
    engine.pending_event = Some(EngineEvent::TrackFinished);
    assert!(seq.poll_completion(&mut engine, 10));
    assert_eq!(engine.starts(), vec!["/a.mp3", "/b.mp3"]);
}

#[test]
fn test_stale_finished_event_dropped_on_new_start() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();

    // The direct track ends, but nobody polls before the next request
    seq.start_direct(&X, &mut engine, 0);
    engine.pending_event = Some(EngineEvent::TrackFinished);

    seq.start_sequence(&AB, &mut engine, 5);
    assert_eq!(engine.pending_event, None);

    assert!(!seq.poll_completion(&mut engine, 10));
    assert_eq!(seq.state().active_index, 0);
    assert_eq!(engine.starts(), vec!["/x.mp3", "/a.mp3"]);
}

#[test]
fn test_missing_track_holds_state() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();
    engine.missing.push("/a.mp3");

    seq.start_sequence(&AB, &mut engine, 0);

    let state = seq.state();
    assert_eq!(state.mode, Mode::PlayingSequence);
    assert_eq!(state.active_sequence, Some(&AB));
    assert_eq!(state.active_index, 0);
    assert_eq!(state.current_track, Some(&A));
    assert!(!state.last_known_running);

    // No retry
    assert!(!seq.poll_completion(&mut engine, 10));
    assert_eq!(engine.starts(), vec!["/a.mp3"]);

    let mut saw_error = false;
    while let Some(entry) = log.drain() {
        if entry.level == LogLevel::Error {
            assert!(entry.message().contains("A01"));
            assert!(entry.message().contains("/a.mp3"));
            saw_error = true;
        }
    }
    assert!(saw_error);
}

#[test]
fn test_missing_direct_track_still_playing_direct() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();
    engine.missing.push("/x.mp3");

    seq.start_direct(&X, &mut engine, 0);
    assert_eq!(seq.mode(), Mode::PlayingDirect);
}

#[test]
fn test_invariants_hold_across_operations() {
    let log: LogStream = LogStream::new();
    let mut seq = Sequencer::new(&log);
    let mut engine = RecordingEngine::new();

    let check = |s: &PlaybackState| match s.mode {
        Mode::PlayingSequence => {
            let active = s.active_sequence.expect("sequence set");
            assert!(s.active_index < active.len());
        }
        Mode::Idle => assert!(s.active_sequence.is_none()),
        Mode::PlayingDirect => assert!(s.active_sequence.is_none()),
    };

    seq.start_sequence(&ABC, &mut engine, 0);
    check(seq.state());
    for t in 1..6 {
        complete(&mut seq, &mut engine, t);
        check(seq.state());
    }
    seq.start_direct(&X, &mut engine, 7);
    check(seq.state());
    seq.stop(&mut engine, 8);
    check(seq.state());
}
