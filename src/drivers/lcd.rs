//! HD44780 character LCD behind the [`DisplayPort`].
//!
//! Bus sequencing and the power-on handshake are done by
//! `hd44780-driver`.  This adapter maps `(row, col)` to DDRAM addresses,
//! clips text at the end of the row and pads integer fields.
//!
//! `hd44780-driver` speaks the `embedded-hal` 0.2 traits, so pins and
//! delay here are the 0.2 flavour: [`GpioOutput`](crate::drivers::gpio::GpioOutput)
//! and [`SystemDelay`](crate::adapters::time::SystemDelay) implement both.

use embedded_hal_0_2::blocking::delay::{DelayMs, DelayUs};
use embedded_hal_0_2::digital::v2::OutputPin;
use hd44780_driver::bus::{DataBus, FourBitBus};
use hd44780_driver::{Cursor, CursorBlink, Display, DisplayMode, HD44780};
use log::warn;

use crate::app::ports::DisplayPort;
use crate::config::{DISPLAY_COLS, DISPLAY_ROWS};
use crate::drivers::screen::render_integer;
use crate::error::Error;

/// DDRAM start address of each row (16x4 layout; 16x2 uses the first two).
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x10, 0x50];

/// DDRAM address of `(row, col)`, or `None` if off-screen.
pub fn ddram_address(row: u8, col: u8) -> Option<u8> {
    if row >= DISPLAY_ROWS || col >= DISPLAY_COLS {
        return None;
    }
    Some(ROW_OFFSETS[row as usize] + col)
}

pub struct CharLcd<B: DataBus, D> {
    lcd: HD44780<B>,
    delay: D,
}

impl<RS, EN, D4, D5, D6, D7, D> CharLcd<FourBitBus<RS, EN, D4, D5, D6, D7>, D>
where
    RS: OutputPin + 'static,
    EN: OutputPin + 'static,
    D4: OutputPin + 'static,
    D5: OutputPin + 'static,
    D6: OutputPin + 'static,
    D7: OutputPin + 'static,
    D: DelayUs<u16> + DelayMs<u8>,
{
    /// Bring the panel up on a 4-bit bus (R/W tied low) with the cursor
    /// hidden and the screen cleared.
    #[allow(clippy::too_many_arguments)]
    pub fn new_4bit(
        rs: RS,
        en: EN,
        d4: D4,
        d5: D5,
        d6: D6,
        d7: D7,
        mut delay: D,
    ) -> Result<Self, Error> {
        let mut lcd = HD44780::new_4bit(rs, en, d4, d5, d6, d7, &mut delay)
            .map_err(|_| Error::Init("lcd: bus init failed"))?;
        lcd.set_display_mode(
            DisplayMode {
                display: Display::On,
                cursor_visibility: Cursor::Invisible,
                cursor_blink: CursorBlink::Off,
            },
            &mut delay,
        )
        .map_err(|_| Error::Init("lcd: display mode failed"))?;
        lcd.clear(&mut delay)
            .map_err(|_| Error::Init("lcd: clear failed"))?;
        Ok(Self { lcd, delay })
    }
}

impl<B, D> DisplayPort for CharLcd<B, D>
where
    B: DataBus,
    D: DelayUs<u16> + DelayMs<u8>,
{
    fn clear(&mut self) {
        if self.lcd.clear(&mut self.delay).is_err() {
            warn!("lcd: clear failed");
        }
    }

    fn write_text_at(&mut self, row: u8, col: u8, text: &str) {
        let Some(addr) = ddram_address(row, col) else {
            return;
        };
        let room = (DISPLAY_COLS - col) as usize;
        let mut line: heapless::String<16> = heapless::String::new();
        for ch in text.chars().take(room) {
            let ch = if ch.is_ascii() && !ch.is_ascii_control() { ch } else { '?' };
            // `room` never exceeds the capacity.
            let _ = line.push(ch);
        }

        let written = self
            .lcd
            .set_cursor_pos(addr, &mut self.delay)
            .and_then(|()| self.lcd.write_str(&line, &mut self.delay));
        if written.is_err() {
            warn!("lcd: write at ({}, {}) failed", row, col);
        }
    }

    fn write_integer_at(&mut self, row: u8, col: u8, value: u32, width: u8) {
        let field = render_integer(value, width);
        self.write_text_at(row, col, &field);
    }
}
