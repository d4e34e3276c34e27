//! Seam to the external audio decode/streaming engine.
//!
//! The engine is a black box: it can start a track by path, stop, and
//! report whether it is still producing sound. Every call must return
//! without blocking; the control loop calls them once per iteration.

use super::AudioError;

/// Notification pushed by engines that know when a track ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The track started last has played to its end.
    TrackFinished,
}

/// Audio engine collaborator.
pub trait AudioEngine {
    /// Run one unit of the engine's internal work (decode, refill buffers).
    fn service(&mut self);

    /// Start playing the track at `path`.
    fn start_track(&mut self, path: &str) -> Result<(), AudioError>;

    /// Stop whatever is playing. Safe to call when idle.
    fn stop(&mut self);

    /// Whether the engine is currently producing sound.
    fn is_running(&self) -> bool;

    /// Take the pending end-of-track notification, if the engine reports one.
    ///
    /// Engines that can only be polled keep the default, and completion is
    /// then inferred from [`is_running`](Self::is_running) going low.
    fn take_event(&mut self) -> Option<EngineEvent> {
        None
    }
}

impl<E: AudioEngine + ?Sized> AudioEngine for &mut E {
    fn service(&mut self) {
        (**self).service()
    }

    fn start_track(&mut self, path: &str) -> Result<(), AudioError> {
        (**self).start_track(path)
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn is_running(&self) -> bool {
        (**self).is_running()
    }

    fn take_event(&mut self) -> Option<EngineEvent> {
        (**self).take_event()
    }
}
