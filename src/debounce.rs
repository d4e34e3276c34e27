//! Button debouncer.
//!
//! Pure logic, no hardware dependencies. Turns raw pin samples into
//! committed press/release edges. Fully testable on host.
//!
//! Buttons are wired to GND with pull-ups, so `Level::Low` means pressed.

use crate::config::DEBOUNCE_MS;

/// Raw digital pin level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level of an idle (released) button.
    pub const RELEASED: Level = Level::High;

    /// Level of an asserted (pressed) button.
    pub const ASSERTED: Level = Level::Low;

    /// Build from a `digitalRead`-style boolean (`true` = high).
    #[inline]
    pub fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Committed, debounced transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

/// Per-button debounce state.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    /// Last sampled level
    raw_level: Level,
    /// Last committed level
    stable_level: Level,
    /// When `raw_level` last changed (ms)
    last_change_ms: u32,
    window_ms: u32,
}

impl Debouncer {
    /// Create a debouncer for a released button with the default window.
    pub const fn new() -> Self {
        Self::with_window(DEBOUNCE_MS)
    }

    /// Create a debouncer with a custom window in milliseconds.
    pub const fn with_window(window_ms: u32) -> Self {
        Self {
            raw_level: Level::RELEASED,
            stable_level: Level::RELEASED,
            last_change_ms: 0,
            window_ms,
        }
    }

    /// Feed one raw sample.
    ///
    /// Returns an edge only when a level has held for longer than the
    /// window and differs from the committed level.
    pub fn poll(&mut self, raw: Level, now_ms: u32) -> Option<Edge> {
        if raw != self.raw_level {
            self.last_change_ms = now_ms;
            self.raw_level = raw;
        }

        let held_ms = now_ms.wrapping_sub(self.last_change_ms);
        if held_ms > self.window_ms && raw != self.stable_level {
            self.stable_level = raw;
            return Some(if raw == Level::ASSERTED {
                Edge::Pressed
            } else {
                Edge::Released
            });
        }

        None
    }

    /// Committed level.
    #[inline]
    pub fn stable_level(&self) -> Level {
        self.stable_level
    }

    /// Whether the committed level is pressed.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.stable_level == Level::ASSERTED
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_released() {
        let db = Debouncer::new();
        assert_eq!(db.stable_level(), Level::High);
        assert!(!db.is_pressed());
    }

    #[test]
    fn test_exactly_window_does_not_commit() {
        let mut db = Debouncer::new();
        assert_eq!(db.poll(Level::Low, 100), None);
        // Held for exactly 50 ms: still inside the window
        assert_eq!(db.poll(Level::Low, 150), None);
        assert_eq!(db.poll(Level::Low, 151), Some(Edge::Pressed));
    }

    #[test]
    fn test_clock_wraparound() {
        let mut db = Debouncer::new();
        let start = u32::MAX - 10;
        assert_eq!(db.poll(Level::Low, start), None);
        assert_eq!(db.poll(Level::Low, start.wrapping_add(60)), Some(Edge::Pressed));
    }
}
