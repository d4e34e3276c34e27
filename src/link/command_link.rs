//! Command link state machine

use super::{decode_line, encode_line, Inbound, LineBuffer, LinkPort, ACK};

/// Link counters since boot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Complete lines received
    pub lines_received: u32,
    /// Lines that decoded to nothing
    pub lines_ignored: u32,
    /// Lines written (tokens and acks)
    pub lines_sent: u32,
    /// Writes or flushes the port refused
    pub write_errors: u32,
}

/// Companion link: outbound event tokens, inbound remote presses.
pub struct CommandLink {
    line: LineBuffer,
    stats: LinkStats,
}

impl CommandLink {
    /// Create idle link
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            stats: LinkStats {
                lines_received: 0,
                lines_ignored: 0,
                lines_sent: 0,
                write_errors: 0,
            },
        }
    }

    /// Report one event to the companion device.
    pub fn send_token(&mut self, token: &str, port: &mut impl LinkPort) {
        self.write_line(token, port);
    }

    /// Consume buffered input until one line completes.
    ///
    /// Returns the decoded command when a line ended this call. Bytes after
    /// the terminator stay in the port for the next call. Every completed
    /// line is acknowledged with [`ACK`] and the port flushed, whether or
    /// not it was understood.
    pub fn poll(&mut self, port: &mut impl LinkPort) -> Option<Inbound> {
        while let Some(byte) = port.read_byte() {
            if byte == b'\n' {
                let cmd = decode_line(self.line.as_bytes());
                self.line.clear();
                self.stats.lines_received += 1;
                if cmd == Inbound::Ignored {
                    self.stats.lines_ignored += 1;
                }
                return Some(cmd);
            }
            self.line.push(byte);
        }
        None
    }

    /// Acknowledge the line returned by [`poll`](Self::poll).
    pub fn acknowledge(&mut self, port: &mut impl LinkPort) {
        self.flush(port);
        self.write_line(ACK, port);
        self.flush(port);
    }

    /// Counters since boot
    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Bytes of the line still being received
    pub fn pending(&self) -> &[u8] {
        self.line.as_bytes()
    }

    fn flush(&mut self, port: &mut impl LinkPort) {
        if port.flush().is_err() {
            self.stats.write_errors += 1;
        }
    }

    fn write_line(&mut self, token: &str, port: &mut impl LinkPort) {
        match encode_line(token, port) {
            Ok(()) => self.stats.lines_sent += 1,
            Err(_) => self.stats.write_errors += 1,
        }
    }
}

impl Default for CommandLink {
    fn default() -> Self {
        Self::new()
    }
}
