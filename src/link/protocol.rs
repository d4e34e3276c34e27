//! Companion link wire format
//!
//! Plain ASCII lines. Outbound lines end in `\r\n`, inbound lines end at
//! `\n` (a trailing `\r` is whitespace). No framing, no checksums,
//! no retransmission: a dropped line is lost.
//!
//! Inbound: the first non-blank character selects a remote button,
//! `'0'..='3'` meaning button index 0 to 3. Everything else is ignored.

/// Acknowledgment sent after every inbound line.
pub const ACK: &str = "ACK";

/// Buttons reachable from the companion device.
pub const REMOTE_BUTTONS: usize = 4;

/// Decoded inbound command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    /// Simulate a press of the button at this panel index.
    Press(usize),
    /// Line carried nothing we understand.
    Ignored,
}

/// Decode one received line (terminator already stripped).
///
/// Works on raw bytes: whatever follows the first character need not be
/// valid UTF-8.
pub fn decode_line(line: &[u8]) -> Inbound {
    match line.iter().copied().find(|b| !b.is_ascii_whitespace()) {
        Some(c @ b'0'..=b'9') if usize::from(c - b'0') < REMOTE_BUTTONS => {
            Inbound::Press(usize::from(c - b'0'))
        }
        _ => Inbound::Ignored,
    }
}

/// Write one outbound line.
pub fn encode_line(token: &str, out: &mut dyn core::fmt::Write) -> core::fmt::Result {
    out.write_str(token)?;
    out.write_str("\r\n")
}
