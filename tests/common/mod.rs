//! Host doubles for the hardware seams.

#![allow(dead_code)]

use std::collections::VecDeque;

use bugle_player::audio::{AudioEngine, AudioError, EngineEvent};
use bugle_player::control::ButtonPins;
use bugle_player::debounce::Level;
use bugle_player::link::LinkPort;

/// Engine call as seen by the audio engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Start(String),
    Stop,
}

/// Audio engine that records every call.
pub struct RecordingEngine {
    pub calls: Vec<Call>,
    pub running: bool,
    /// Whether a successful start reports running immediately.
    pub auto_run: bool,
    /// Paths that fail with `TrackNotFound`.
    pub missing: Vec<&'static str>,
    pub pending_event: Option<EngineEvent>,
    pub serviced: usize,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            running: false,
            auto_run: true,
            missing: Vec::new(),
            pending_event: None,
            serviced: 0,
        }
    }

    /// Paths passed to `start_track`, in order.
    pub fn starts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Start(p) => Some(p.as_str()),
                Call::Stop => None,
            })
            .collect()
    }

    /// Current track ends on its own.
    pub fn finish_track(&mut self) {
        self.running = false;
    }
}

impl AudioEngine for RecordingEngine {
    fn service(&mut self) {
        self.serviced += 1;
    }

    fn start_track(&mut self, path: &str) -> Result<(), AudioError> {
        self.calls.push(Call::Start(path.to_string()));
        if self.missing.iter().any(|m| *m == path) {
            return Err(AudioError::TrackNotFound);
        }
        self.running = self.auto_run;
        Ok(())
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn take_event(&mut self) -> Option<EngineEvent> {
        self.pending_event.take()
    }
}

/// Button levels set by the test.
pub struct ScriptedPins {
    pub levels: Vec<Level>,
}

impl ScriptedPins {
    pub fn new(count: usize) -> Self {
        Self { levels: vec![Level::High; count] }
    }

    pub fn press(&mut self, index: usize) {
        self.levels[index] = Level::Low;
    }

    pub fn release(&mut self, index: usize) {
        self.levels[index] = Level::High;
    }
}

impl ButtonPins for ScriptedPins {
    fn level(&mut self, index: usize) -> Level {
        self.levels[index]
    }
}

/// In-memory serial port.
#[derive(Default)]
pub struct MockPort {
    pub rx: VecDeque<u8>,
    pub tx: String,
    pub flushes: usize,
    /// Every flush reports a TX timeout.
    pub fail_flush: bool,
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes as if received from the companion device.
    pub fn receive(&mut self, data: &str) {
        self.rx.extend(data.bytes());
    }

    /// Lines written so far, terminators stripped.
    pub fn lines(&self) -> Vec<&str> {
        self.tx.lines().collect()
    }

    pub fn take_lines(&mut self) -> Vec<String> {
        let lines = self.tx.lines().map(str::to_string).collect();
        self.tx.clear();
        lines
    }
}

impl core::fmt::Write for MockPort {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.tx.push_str(s);
        Ok(())
    }
}

impl LinkPort for MockPort {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn flush(&mut self) -> core::fmt::Result {
        self.flushes += 1;
        if self.fail_flush {
            return Err(core::fmt::Error);
        }
        Ok(())
    }
}
