//! Audio engine binding for the I2S amplifier.

use crate::audio::{AudioEngine, AudioError};
use crate::config::{BoardConfig, I2sPins};
use crate::logging::LogStream;
use crate::{diag_info, diag_warn};

/// Longest track path accepted, mount point included.
const MAX_PATH_LEN: usize = 64;

/// Device-side audio engine.
///
/// Placeholder seam: resolves track paths against the SD card mount point and
/// owns the I2S pin assignment and output level, but produces no sound. Every
/// accepted start reports not running, so sequences hold on their first track
/// on the device.
// TODO: hand resolved paths to the MP3 decoder component.
pub struct DecoderEngine<'a> {
    pins: I2sPins,
    volume: u8,
    mount_point: &'static str,
    running: bool,
    log: &'a LogStream,
}

impl<'a> DecoderEngine<'a> {
    pub fn new(config: &BoardConfig, log: &'a LogStream) -> Self {
        Self {
            pins: config.i2s_pins,
            volume: config.clamped_volume(),
            mount_point: config.mount_point,
            running: false,
            log,
        }
    }

    /// Log the output setup.
    pub fn describe(&self) {
        diag_info!(
            self.log,
            super::now_ms(),
            "I2S bclk={} lrc={} dout={} volume={}",
            self.pins.bclk,
            self.pins.lrc,
            self.pins.dout,
            self.volume
        );
    }
}

impl AudioEngine for DecoderEngine<'_> {
    fn service(&mut self) {}

    fn start_track(&mut self, path: &str) -> Result<(), AudioError> {
        if path.is_empty() || self.mount_point.len() + path.len() > MAX_PATH_LEN {
            return Err(AudioError::TrackNotFound);
        }
        diag_info!(self.log, super::now_ms(), "decoder open {}{}", self.mount_point, path);
        diag_warn!(self.log, super::now_ms(), "decoder not linked, {} not played", path);
        self.running = false;
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
