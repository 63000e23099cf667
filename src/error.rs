//! Unified error type for the RoomSense firmware.
//!
//! The poll loop itself is infallible: sensor reads are total and output
//! writes cannot fail.  Errors only arise while bringing the board up or
//! validating the compiled-in configuration, and from checked conversions
//! of raw beam samples.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A raw beam sample had bits set above the two sensor bits.
    InvalidReading(u8),
    /// Configuration failed validation.
    Config(&'static str),
    /// GPIO configuration failed (ESP-IDF return code).
    Gpio(i32),
    /// Peripheral bring-up failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidReading(bits) => write!(f, "beam reading out of range: {bits}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Gpio(rc) => write!(f, "GPIO config failed (rc={rc})"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
