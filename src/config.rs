//! System configuration parameters
//!
//! All tunable parameters for the RoomSense counter.  These are
//! compiled-in constants: the firmware never loads configuration at
//! runtime, and the FSM structure itself is fixed in `fsm::states`.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::fsm::Dwell;

/// Character display geometry (HD44780 16x2).
pub const DISPLAY_ROWS: u8 = 2;
pub const DISPLAY_COLS: u8 = 16;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Short dwell before the next beam sample (milliseconds)
    pub dwell_short_ms: u32,
    /// Long dwell before the next beam sample (milliseconds)
    pub dwell_long_ms: u32,
    /// Telemetry report interval (poll cycles)
    pub telemetry_interval_polls: u32,

    // --- Sensors ---
    /// Beam receivers pull their output LOW when the beam is broken
    pub beam_active_low: bool,

    // --- Display layout ---
    pub banner_text: heapless::String<16>,
    pub banner_row: u8,
    pub banner_col: u8,
    pub count_label: heapless::String<8>,
    pub count_row: u8,
    pub count_col: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            dwell_short_ms: 10,
            dwell_long_ms: 20,
            telemetry_interval_polls: 3000, // ~1/min at long dwell

            // Sensors
            beam_active_low: false,

            // Display
            banner_text: fixed_str("Welcome visitors"),
            banner_row: 0,
            banner_col: 0,
            count_label: fixed_str("Inside:"),
            count_row: 1,
            count_col: 8,
        }
    }
}

impl SystemConfig {
    /// Resolve an abstract dwell to milliseconds.
    pub fn dwell_ms(&self, dwell: Dwell) -> u32 {
        match dwell {
            Dwell::Short => self.dwell_short_ms,
            Dwell::Long => self.dwell_long_ms,
        }
    }

    /// Check ranges and layout.  Called once before the service is built.
    pub fn validate(&self) -> Result<(), Error> {
        if self.dwell_short_ms == 0 {
            return Err(Error::Config("dwell_short_ms must be non-zero"));
        }
        if self.dwell_short_ms >= self.dwell_long_ms {
            return Err(Error::Config("dwell_short_ms must be below dwell_long_ms"));
        }
        if self.telemetry_interval_polls == 0 {
            return Err(Error::Config("telemetry_interval_polls must be non-zero"));
        }
        if self.banner_row >= DISPLAY_ROWS || self.count_row >= DISPLAY_ROWS {
            return Err(Error::Config("display row out of range"));
        }
        if self.banner_col as usize + self.banner_text.len() > DISPLAY_COLS as usize {
            return Err(Error::Config("banner does not fit on its row"));
        }
        if self.count_col >= DISPLAY_COLS {
            return Err(Error::Config("count column out of range"));
        }
        if self.count_row == self.banner_row {
            return Err(Error::Config("count and banner share a row"));
        }
        if self.count_label.len() > self.count_col as usize {
            return Err(Error::Config("count label overlaps the count field"));
        }
        Ok(())
    }

    /// Width of the count field, from `count_col` to the end of its row.
    pub fn count_field_width(&self) -> u8 {
        DISPLAY_COLS.saturating_sub(self.count_col)
    }
}

/// Build a fixed-capacity string from a literal that is known to fit.
fn fixed_str<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
