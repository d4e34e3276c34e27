//! Audio engine error types

/// Error reported by the audio engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioError {
    /// A01: Track file missing on storage
    TrackNotFound,
    /// A02: Decoder or output refused the request
    EngineFault,
}

impl AudioError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::TrackNotFound => "A01",
            Self::EngineFault => "A02",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::TrackNotFound => "track not found",
            Self::EngineFault => "engine fault",
        }
    }
}

impl core::fmt::Display for AudioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
