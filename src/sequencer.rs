//! Playback sequencer finite state machine.
//!
//! Owns the single [`PlaybackState`] and is the only code that commands the
//! audio engine. No hardware dependencies; the engine is passed in on every
//! call so the state machine can be driven from host tests.
//!
//! # States
//!
//! - **Idle**: nothing requested
//! - **PlayingDirect**: one track, never auto-advanced
//! - **PlayingSequence(i)**: track `i` of the active sequence
//!
//! Every start first stops the engine, so the newest request always wins.

use crate::audio::{AudioEngine, EngineEvent};
use crate::logging::LogStream;
use crate::registry::{Sequence, Track};
use crate::{diag_error, diag_info, diag_warn};

/// Playback mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    PlayingDirect,
    PlayingSequence,
}

/// Process-wide playback state.
///
/// Invariants:
/// - `mode == PlayingSequence` ⇒ `active_sequence` is set and `active_index < len`
/// - `mode == Idle` ⇒ `active_sequence` is `None`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    pub active_sequence: Option<&'static Sequence>,
    pub active_index: usize,
    pub mode: Mode,
    /// Engine running flag as last observed; completion is its falling edge.
    pub last_known_running: bool,
    /// Track most recently handed to the engine.
    pub current_track: Option<&'static Track>,
}

impl PlaybackState {
    pub const IDLE: Self = Self {
        active_sequence: None,
        active_index: 0,
        mode: Mode::Idle,
        last_known_running: false,
        current_track: None,
    };
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Playback sequencer.
pub struct Sequencer<'a, const N: usize = { crate::logging::LOG_BUFFER_SIZE }> {
    state: PlaybackState,
    log: &'a LogStream<N>,
}

impl<'a, const N: usize> Sequencer<'a, N> {
    /// Create an idle sequencer logging into `log`.
    pub fn new(log: &'a LogStream<N>) -> Self {
        Self {
            state: PlaybackState::IDLE,
            log,
        }
    }

    /// Current playback state.
    #[inline]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Play a single track, pre-empting anything active.
    pub fn start_direct(&mut self, track: &'static Track, engine: &mut impl AudioEngine, now_ms: u32) {
        engine.stop();

        diag_info!(self.log, now_ms, "Playing direct track: {}", track.path);
        self.state = PlaybackState {
            mode: Mode::PlayingDirect,
            ..PlaybackState::IDLE
        };
        self.play(track, engine, now_ms);
    }

    /// Play `sequence` from its first track, pre-empting anything active.
    pub fn start_sequence(&mut self, sequence: &'static Sequence, engine: &mut impl AudioEngine, now_ms: u32) {
        engine.stop();

        diag_info!(self.log, now_ms, "Starting sequence: {}", sequence.name);
        self.state = PlaybackState {
            active_sequence: Some(sequence),
            active_index: 0,
            mode: Mode::PlayingSequence,
            ..PlaybackState::IDLE
        };
        self.play_sequence_track(engine, now_ms);
    }

    /// Move to the next track of the active sequence.
    ///
    /// Past the last track the sequencer goes idle. Outside a sequence this
    /// does nothing.
    pub fn advance(&mut self, engine: &mut impl AudioEngine, now_ms: u32) {
        if self.state.mode != Mode::PlayingSequence {
            return;
        }
        let Some(sequence) = self.state.active_sequence else {
            return;
        };

        let next = self.state.active_index + 1;
        if next < sequence.len() {
            self.state.active_index = next;
            engine.stop();
            self.play_sequence_track(engine, now_ms);
        } else {
            diag_info!(self.log, now_ms, "Sequence completed.");
            self.state = PlaybackState::IDLE;
        }
    }

    /// Stop playback. The engine is always told to stop, even when idle.
    pub fn stop(&mut self, engine: &mut impl AudioEngine, now_ms: u32) {
        engine.stop();
        if self.state.mode != Mode::Idle {
            diag_info!(self.log, now_ms, "Playback stopped.");
        }
        self.state = PlaybackState::IDLE;
    }

    /// Check the engine for the end of the current sequence track.
    ///
    /// An explicit [`EngineEvent::TrackFinished`] wins. Otherwise completion
    /// is the running flag falling after it was seen high for this track.
    /// Only sequences auto-advance. Returns `true` if a completion was handled.
    pub fn poll_completion(&mut self, engine: &mut impl AudioEngine, now_ms: u32) -> bool {
        let event = engine.take_event();
        let running = engine.is_running();

        if self.state.mode != Mode::PlayingSequence {
            self.state.last_known_running = running;
            return false;
        }

        let finished = match event {
            Some(EngineEvent::TrackFinished) => true,
            None => self.state.last_known_running && !running,
        };
        self.state.last_known_running = running;

        if finished {
            self.advance(engine, now_ms);
        }
        finished
    }

    fn play_sequence_track(&mut self, engine: &mut impl AudioEngine, now_ms: u32) {
        let track = self
            .state
            .active_sequence
            .and_then(|seq| seq.get(self.state.active_index));

        match track {
            Some(track) => {
                diag_info!(self.log, now_ms, "Playing sequence track: {}", track.path);
                self.play(track, engine, now_ms);
            }
            None => {
                diag_warn!(self.log, now_ms, "Sequence finished or invalid state.");
                self.state = PlaybackState::IDLE;
            }
        }
    }

    /// Hand `track` to the engine. A failed start leaves the state as if it
    /// had succeeded; the running flag stays low so no completion fires.
    ///
    /// Events still pending belong to the track being replaced and are
    /// discarded first.
    fn play(&mut self, track: &'static Track, engine: &mut impl AudioEngine, now_ms: u32) {
        while engine.take_event().is_some() {}
        self.state.current_track = Some(track);
        if let Err(e) = engine.start_track(track.path) {
            diag_error!(self.log, now_ms, "{} ({})", e, track.path);
        }
        self.state.last_known_running = engine.is_running();
    }
}
