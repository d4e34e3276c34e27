//! Cooperative control loop.
//!
//! One [`ControlLoop::tick`] per main-loop iteration, no fixed period:
//!
//! 1. let the audio engine do its work
//! 2. sample and debounce every button, apply committed edges in panel order
//! 3. detect the end of a sequence track and advance
//! 4. handle at most one inbound link line
//!
//! Button actions are applied before completion detection. A tick that
//! started or stopped playback skips completion detection, so a press never
//! loses to an auto-advance.

use crate::audio::AudioEngine;
use crate::debounce::{Debouncer, Edge, Level};
use crate::link::{CommandLink, Inbound, LinkPort, LinkStats};
use crate::logging::LogStream;
use crate::registry::{ButtonSpec, Role};
use crate::sequencer::{Mode, PlaybackState, Sequencer};
use crate::{diag_debug, diag_info};

/// Raw button inputs.
pub trait ButtonPins {
    /// Sample the pin of the button at panel index `index`.
    fn level(&mut self, index: usize) -> Level;
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Committed edges across all buttons
    pub edges: u8,
    /// Playback start/stop actions applied
    pub actions: u8,
    /// A sequence track completed
    pub completion: bool,
    /// An inbound line was handled
    pub inbound: Option<Inbound>,
}

/// Control loop state: one debouncer per button, the sequencer and the link.
pub struct ControlLoop<'a, const B: usize, const N: usize = { crate::logging::LOG_BUFFER_SIZE }> {
    buttons: &'a [ButtonSpec; B],
    debouncers: [Debouncer; B],
    sequencer: Sequencer<'a, N>,
    link: CommandLink,
    log: &'a LogStream<N>,
}

impl<'a, const B: usize, const N: usize> ControlLoop<'a, B, N> {
    /// Create a loop for the given panel with the default debounce window.
    pub fn new(buttons: &'a [ButtonSpec; B], log: &'a LogStream<N>) -> Self {
        Self::with_debounce(buttons, log, crate::config::DEBOUNCE_MS)
    }

    /// Create a loop with a custom debounce window.
    pub fn with_debounce(buttons: &'a [ButtonSpec; B], log: &'a LogStream<N>, window_ms: u32) -> Self {
        Self {
            buttons,
            debouncers: [Debouncer::with_window(window_ms); B],
            sequencer: Sequencer::new(log),
            link: CommandLink::new(),
            log,
        }
    }

    /// Run one iteration.
    pub fn tick(
        &mut self,
        now_ms: u32,
        engine: &mut impl AudioEngine,
        pins: &mut impl ButtonPins,
        port: &mut impl LinkPort,
    ) -> TickReport {
        let mut report = TickReport::default();

        engine.service();

        for index in 0..B {
            let level = pins.level(index);
            if let Some(edge) = self.debouncers[index].poll(level, now_ms) {
                report.edges += 1;
                if self.on_edge(index, edge, engine, port, now_ms) {
                    report.actions += 1;
                }
            }
        }

        if report.actions == 0 && self.sequencer.mode() == Mode::PlayingSequence {
            report.completion = self.sequencer.poll_completion(engine, now_ms);
        }

        if let Some(cmd) = self.link.poll(port) {
            self.on_inbound(cmd, engine, now_ms);
            self.link.acknowledge(port);
            report.inbound = Some(cmd);
        }

        report
    }

    /// Apply a committed edge. Returns `true` if playback was started or stopped.
    fn on_edge(
        &mut self,
        index: usize,
        edge: Edge,
        engine: &mut impl AudioEngine,
        port: &mut impl LinkPort,
        now_ms: u32,
    ) -> bool {
        let button = self.buttons[index];
        diag_debug!(self.log, now_ms, "Button {} {:?}", button.id, edge);

        if !button.role.trigger().fires_on(edge) {
            return false;
        }

        let acted = match button.role {
            Role::ToggleSignal => {
                diag_info!(self.log, now_ms, "Button {} switch {:?} -> toggle", button.id, edge);
                false
            }
            Role::StopAll => {
                diag_info!(self.log, now_ms, "Stop button detected. Stopping audio.");
                self.sequencer.stop(engine, now_ms);
                true
            }
            role => self.start_playback(role, engine, now_ms),
        };

        if let Some(token) = button.token_for(edge) {
            self.link.send_token(token, port);
        }
        acted
    }

    fn on_inbound(&mut self, cmd: Inbound, engine: &mut impl AudioEngine, now_ms: u32) {
        let buttons = self.buttons;
        match cmd {
            Inbound::Press(index) => match buttons.get(index) {
                Some(button) if button.role.is_playback() => {
                    diag_info!(self.log, now_ms, "Received data: {} -> button {}", index, button.id);
                    self.start_playback(button.role, engine, now_ms);
                }
                _ => diag_info!(self.log, now_ms, "Received data: {} (no playback button)", index),
            },
            Inbound::Ignored => diag_info!(self.log, now_ms, "Received data: ignored"),
        }
    }

    fn start_playback(&mut self, role: Role, engine: &mut impl AudioEngine, now_ms: u32) -> bool {
        match role {
            Role::DirectTrack(track) => self.sequencer.start_direct(track, engine, now_ms),
            Role::SequenceStart(sequence) => self.sequencer.start_sequence(sequence, engine, now_ms),
            Role::StopAll | Role::ToggleSignal => return false,
        }
        true
    }

    /// Current playback state.
    pub fn playback(&self) -> &PlaybackState {
        self.sequencer.state()
    }

    /// Link counters since boot.
    pub fn link_stats(&self) -> LinkStats {
        self.link.stats()
    }

    /// Whether the button at `index` is held down (debounced).
    pub fn is_pressed(&self, index: usize) -> bool {
        self.debouncers.get(index).map_or(false, Debouncer::is_pressed)
    }
}
