//! Hardware Abstraction Layer for the bugle player.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Business logic stays in core modules, HAL is just I/O.

pub mod audio;
pub mod gpio;
pub mod uart;

pub use audio::DecoderEngine;
pub use gpio::PanelPins;
pub use uart::UartLink;

/// Milliseconds since boot, wrapping after ~49 days.
#[inline]
pub fn now_ms() -> u32 {
    // SAFETY: esp_timer_get_time is always safe to call
    let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
    (us / 1000) as u32
}
