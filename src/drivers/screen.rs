//! In-memory 16x2 character screen.
//!
//! Implements [`DisplayPort`] against a cell grid instead of a bus.  The
//! host simulator renders from it, and tests assert on row contents.

use core::fmt::Write;

use log::warn;

use crate::app::ports::DisplayPort;
use crate::config::{DISPLAY_COLS, DISPLAY_ROWS};

const ROWS: usize = DISPLAY_ROWS as usize;
const COLS: usize = DISPLAY_COLS as usize;

/// Render `value` in decimal, left-aligned and blank-padded to `width`.
/// Digits that do not fit in `width` are kept; the caller clips to the row.
pub fn render_integer(value: u32, width: u8) -> heapless::String<16> {
    let mut out: heapless::String<16> = heapless::String::new();
    // u32::MAX is 10 digits, always fits.
    let _ = write!(out, "{value}");
    while out.len() < width as usize && out.push(' ').is_ok() {}
    out
}

pub struct ScreenBuffer {
    cells: [[u8; COLS]; ROWS],
}

impl ScreenBuffer {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
        }
    }

    /// One row as text.  Out-of-range rows read as empty.
    pub fn row_text(&self, row: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|r| core::str::from_utf8(r).ok())
            .unwrap_or("")
    }

    fn put(&mut self, row: u8, col: u8, text: &str) {
        let Some(cells) = self.cells.get_mut(row as usize) else {
            warn!("screen: row {} out of range", row);
            return;
        };
        for (cell, ch) in cells.iter_mut().skip(col as usize).zip(text.chars()) {
            *cell = if ch.is_ascii() && !ch.is_ascii_control() { ch as u8 } else { b'?' };
        }
    }
}

impl Default for ScreenBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for ScreenBuffer {
    fn clear(&mut self) {
        self.cells = [[b' '; COLS]; ROWS];
    }

    fn write_text_at(&mut self, row: u8, col: u8, text: &str) {
        self.put(row, col, text);
    }

    fn write_integer_at(&mut self, row: u8, col: u8, value: u32, width: u8) {
        self.put(row, col, &render_integer(value, width));
    }
}
