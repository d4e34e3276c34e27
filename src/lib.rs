//! # BuglePlayer
//!
//! Firmware core for a six-button bugle call player.
//!
//! ## Architecture
//!
//! ```text
//! pins ──▶ Debouncer ──▶ edges ──┬──▶ Sequencer ──▶ AudioEngine
//!                                └──▶ CommandLink ──▶ UART2 (tokens)
//! UART2 ──▶ CommandLink ──▶ remote presses ──▶ Sequencer
//! AudioEngine (running / finished) ──▶ Sequencer (advance)
//! ```
//!
//! Everything is driven by [`ControlLoop::tick`] from a single thread.
//! The core never blocks and never touches hardware directly; the firmware
//! binary supplies pins, serial port and audio engine through traits.

#![cfg_attr(not(test), no_std)]

pub mod audio;
pub mod config;
pub mod control;
pub mod debounce;
pub mod link;
pub mod logging;
pub mod registry;
pub mod sequencer;

#[cfg(target_os = "espidf")]
pub mod hal;

pub use audio::{AudioEngine, AudioError, EngineEvent};
pub use config::BoardConfig;
pub use control::{ButtonPins, ControlLoop, TickReport};
pub use debounce::{Debouncer, Edge, Level};
pub use link::{CommandLink, Inbound, LinkPort};
pub use logging::{LogLevel, LogStream};
pub use registry::{ButtonSpec, Role, Sequence, Track, TriggerEdge, BUTTONS};
pub use sequencer::{Mode, PlaybackState, Sequencer};
