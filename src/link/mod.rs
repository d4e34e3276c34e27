//! Companion device link
//!
//! Line-based ASCII protocol over UART2. Polled from the control loop,
//! zero heap allocation.

pub mod command_link;
pub mod line_buffer;
pub mod port;
pub mod protocol;

pub use command_link::{CommandLink, LinkStats};
pub use line_buffer::LineBuffer;
pub use port::LinkPort;
pub use protocol::{decode_line, encode_line, Inbound, ACK, REMOTE_BUTTONS};
