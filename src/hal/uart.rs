//! Companion link on UART2.
//!
//! ```text
//! ESP32 GPIO22 (TX) ──────▶ companion RX
//! ESP32 GPIO21 (RX) ◀────── companion TX
//! ```

use esp_idf_svc::hal::delay::NON_BLOCK;
use esp_idf_svc::hal::gpio::{AnyIOPin, InputPin, OutputPin};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, Uart, UartDriver};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use crate::link::LinkPort;

/// Upper bound on waiting for the TX FIFO to drain, in RTOS ticks.
const FLUSH_TIMEOUT_TICKS: u32 = 10;

/// Link port over a full-duplex UART.
pub struct UartLink<'d> {
    uart: UartDriver<'d>,
}

impl<'d> UartLink<'d> {
    /// Configure the UART 8N1 at `baud_rate`, no flow control.
    pub fn new<U: Uart>(
        uart: impl Peripheral<P = U> + 'd,
        tx_pin: impl Peripheral<P = impl OutputPin> + 'd,
        rx_pin: impl Peripheral<P = impl InputPin> + 'd,
        baud_rate: u32,
    ) -> Result<Self, EspError> {
        let config = uart::config::Config::default().baudrate(Hertz(baud_rate));

        let uart = UartDriver::new(
            uart,
            tx_pin,
            rx_pin,
            Option::<AnyIOPin>::None, // CTS
            Option::<AnyIOPin>::None, // RTS
            &config,
        )?;

        Ok(Self { uart })
    }
}

impl core::fmt::Write for UartLink<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            let written = self.uart.write(bytes).map_err(|_| core::fmt::Error)?;
            if written == 0 {
                return Err(core::fmt::Error);
            }
            bytes = &bytes[written..];
        }
        Ok(())
    }
}

impl LinkPort for UartLink<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    fn flush(&mut self) -> core::fmt::Result {
        self.uart
            .wait_tx_done(FLUSH_TIMEOUT_TICKS)
            .map_err(|_| core::fmt::Error)
    }
}
