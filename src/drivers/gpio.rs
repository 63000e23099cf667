//! `embedded-hal` pin wrappers over the raw [`hw_init`] GPIO helpers.
//!
//! Lets the generic adapters and the LCD driver run against real ESP32
//! pins on the device and against the simulated level table on host.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::drivers::hw_init;

/// A GPIO configured as a digital input by [`hw_init::init_peripherals`].
pub struct GpioInput {
    pin: i32,
}

impl GpioInput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for GpioInput {
    type Error = Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.pin))
    }
}

/// A GPIO configured as a push-pull output by [`hw_init::init_peripherals`].
pub struct GpioOutput {
    pin: i32,
}

impl GpioOutput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, true);
        Ok(())
    }
}

// `hd44780-driver` still takes `embedded-hal` 0.2 pins.
impl embedded_hal_0_2::digital::v2::OutputPin for GpioOutput {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, true);
        Ok(())
    }
}
