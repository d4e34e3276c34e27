//! Panel button inputs.

use esp_idf_svc::hal::gpio::{AnyIOPin, Input, PinDriver, Pull};
use esp_idf_svc::sys::EspError;

use crate::control::ButtonPins;
use crate::debounce::Level;
use crate::registry::BUTTON_COUNT;

/// Six buttons wired to GND, internal pull-ups enabled.
pub struct PanelPins {
    pins: [PinDriver<'static, AnyIOPin, Input>; BUTTON_COUNT],
}

impl PanelPins {
    /// Take the button pins in panel order (button 1 first).
    pub fn new(pins: [AnyIOPin; BUTTON_COUNT]) -> Result<Self, EspError> {
        let [b1, b2, b3, b4, b5, b6] = pins;
        Ok(Self {
            pins: [
                pull_up_input(b1)?,
                pull_up_input(b2)?,
                pull_up_input(b3)?,
                pull_up_input(b4)?,
                pull_up_input(b5)?,
                pull_up_input(b6)?,
            ],
        })
    }
}

fn pull_up_input(pin: AnyIOPin) -> Result<PinDriver<'static, AnyIOPin, Input>, EspError> {
    let mut driver = PinDriver::input(pin)?;
    driver.set_pull(Pull::Up)?;
    Ok(driver)
}

impl ButtonPins for PanelPins {
    #[inline]
    fn level(&mut self, index: usize) -> Level {
        match self.pins.get(index) {
            Some(pin) => Level::from_high(pin.is_high()),
            None => Level::RELEASED,
        }
    }
}
