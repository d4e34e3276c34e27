//! Audio engine boundary
//!
//! Decoding and I2S output live outside this crate; the core only
//! talks to them through [`AudioEngine`].

pub mod engine;
pub mod error;

pub use engine::{AudioEngine, EngineEvent};
pub use error::AudioError;
