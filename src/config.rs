//! Module: config
//!
//! Purpose: Board configuration for the bugle player.
//!
//! Everything here is fixed at build time. The device keeps no persistent
//! settings; changing a pin or a timing means reflashing.

/// Debounce window in milliseconds.
///
/// A raw level must hold for strictly longer than this before it commits.
pub const DEBOUNCE_MS: u32 = 50;

/// Companion link baud rate (UART2, 8N1).
pub const LINK_BAUD_RATE: u32 = 9600;

/// Mount point of the SD card holding the track files.
pub const TRACK_MOUNT_POINT: &str = "/sdcard";

/// I2S output pins for the audio engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2sPins {
    pub bclk: i32,
    pub lrc: i32,
    pub dout: i32,
}

/// Companion link UART pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPins {
    /// Wired to TX of the companion controller.
    pub rx: i32,
    /// Wired to RX of the companion controller.
    pub tx: i32,
}

/// Complete board configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub debounce_ms: u32,
    pub link_baud_rate: u32,
    pub link_pins: LinkPins,
    pub i2s_pins: I2sPins,
    /// Output level handed to the audio engine at init (0-21).
    pub volume: u8,
    pub mount_point: &'static str,
}

impl BoardConfig {
    /// Highest volume step the audio engine accepts.
    pub const MAX_VOLUME: u8 = 21;

    /// Volume clamped to the engine range.
    pub fn clamped_volume(&self) -> u8 {
        self.volume.min(Self::MAX_VOLUME)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            link_baud_rate: LINK_BAUD_RATE,
            link_pins: LinkPins { rx: 21, tx: 22 },
            i2s_pins: I2sPins { bclk: 26, lrc: 25, dout: 19 },
            volume: 5,
            mount_point: TRACK_MOUNT_POINT,
        }
    }
}
