//! Serial port seam for the companion link

/// Byte-level serial port.
///
/// Writes go through [`core::fmt::Write`]; reads never block.
pub trait LinkPort: core::fmt::Write {
    /// Next received byte, `None` when nothing is buffered.
    fn read_byte(&mut self) -> Option<u8>;

    /// Push buffered output onto the wire.
    fn flush(&mut self) -> core::fmt::Result;
}

impl<P: LinkPort + ?Sized> LinkPort for &mut P {
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn flush(&mut self) -> core::fmt::Result {
        (**self).flush()
    }
}
