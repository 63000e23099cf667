//! Hardware adapter: bridges real pins to domain port traits.
//!
//! Owns the two beam inputs and the two binary outputs, exposing them
//! through [`SensorPort`] and [`OutputPort`].  Generic over `embedded-hal`
//! pins so the same code runs on the ESP32 and against test doubles.
//!
//! The ports are total, so pin errors stop here: a failed beam read
//! counts as "not broken" and a failed write is logged and retried on
//! the next cycle (every cycle re-applies both outputs).

use embedded_hal::digital::{InputPin, OutputPin};
use log::{debug, warn};

use crate::app::ports::{OutputPort, SensorPort};
use crate::fsm::BeamReading;

/// Concrete adapter that combines the doorway hardware behind port traits.
pub struct HardwareAdapter<A, B, L, M> {
    beam_a: A,
    beam_b: B,
    /// Receivers pull LOW when their beam is broken.
    active_low: bool,
    indicator: L,
    actuator: M,
    indicator_on: bool,
    actuator_on: bool,
}

impl<A, B, L, M> HardwareAdapter<A, B, L, M>
where
    A: InputPin,
    B: InputPin,
    L: OutputPin,
    M: OutputPin,
{
    pub fn new(beam_a: A, beam_b: B, active_low: bool, indicator: L, actuator: M) -> Self {
        Self {
            beam_a,
            beam_b,
            active_low,
            indicator,
            actuator,
            indicator_on: false,
            actuator_on: false,
        }
    }

    fn broken<P: InputPin>(pin: &mut P, active_low: bool, name: &str) -> bool {
        let level = if active_low { pin.is_low() } else { pin.is_high() };
        match level {
            Ok(broken) => broken,
            Err(_) => {
                warn!("beam {}: read failed, treating as clear", name);
                false
            }
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<A, B, L, M> SensorPort for HardwareAdapter<A, B, L, M>
where
    A: InputPin,
    B: InputPin,
    L: OutputPin,
    M: OutputPin,
{
    fn read_beams(&mut self) -> BeamReading {
        let a = Self::broken(&mut self.beam_a, self.active_low, "A");
        let b = Self::broken(&mut self.beam_b, self.active_low, "B");
        BeamReading::from_beams(a, b)
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl<A, B, L, M> OutputPort for HardwareAdapter<A, B, L, M>
where
    A: InputPin,
    B: InputPin,
    L: OutputPin,
    M: OutputPin,
{
    fn set_indicator(&mut self, active: bool) {
        match self.indicator.set_state(active.into()) {
            Ok(()) => {
                if active != self.indicator_on {
                    debug!("indicator: {}", if active { "on" } else { "off" });
                }
                self.indicator_on = active;
            }
            Err(_) => warn!("indicator: write failed"),
        }
    }

    fn set_actuator(&mut self, active: bool) {
        match self.actuator.set_state(active.into()) {
            Ok(()) => {
                if active != self.actuator_on {
                    debug!("actuator: {}", if active { "on" } else { "off" });
                }
                self.actuator_on = active;
            }
            Err(_) => warn!("actuator: write failed"),
        }
    }
}
