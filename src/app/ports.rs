//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (beam sensors, outputs, display, event sinks) implement
//! these traits.  The [`AppService`](super::service::AppService) consumes
//! them via generics, so the domain core never touches hardware directly.
//!
//! None of these operations can fail: hardware faults are outside the
//! model, and adapters absorb driver errors themselves.  The blocking
//! dwell primitive is `embedded_hal::delay::DelayNs` and needs no port of
//! its own.

use crate::fsm::BeamReading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per poll cycle.
pub trait SensorPort {
    /// Sample both beams and pack them into a reading.  Must not block.
    fn read_beams(&mut self) -> BeamReading;
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the two binary outputs.  Both calls are idempotent.
pub trait OutputPort {
    /// Assert or deassert the occupancy indicator LED.
    fn set_indicator(&mut self, active: bool);

    /// Assert or deassert the door/turnstile actuator.
    fn set_actuator(&mut self, active: bool);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character display)
// ───────────────────────────────────────────────────────────────

/// Character display collaborator.
///
/// Positions are zero-based `(row, col)`.  Text that runs past the end
/// of a row is truncated.
pub trait DisplayPort {
    /// Blank the whole display and home the cursor.
    fn clear(&mut self);

    /// Write `text` starting at `(row, col)`.
    fn write_text_at(&mut self, row: u8, col: u8, text: &str);

    /// Write `value` in decimal starting at `(row, col)`, blanking the rest
    /// of a `width`-character field so a shorter number leaves no stale
    /// digits behind.
    fn write_integer_at(&mut self, row: u8, col: u8, value: u32, width: u8);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
