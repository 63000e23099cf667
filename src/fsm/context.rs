//! Shared mutable context threaded through every FSM action.
//!
//! `FsmContext` is the single struct that state actions read from and
//! write to.  It holds the occupancy counter, the output commands the
//! service applies after each action, and a little bookkeeping about the
//! last sample.  Actions never touch hardware themselves.

use crate::config::SystemConfig;
use crate::fsm::BeamReading;

// ---------------------------------------------------------------------------
// Output commands (written by actions; applied by the service)
// ---------------------------------------------------------------------------

/// What the display should show after this cycle's action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenUpdate {
    /// Leave the display untouched.
    None,
    /// Redraw the welcome banner.
    Banner,
    /// Redraw the occupancy count field with this value.
    Count(u32),
}

/// Output levels requested by the current state's action.
#[derive(Debug, Clone, Copy)]
pub struct OutputCommands {
    /// Occupancy indicator LED.
    pub indicator: bool,
    /// Pulse the door/turnstile actuator for this cycle's dwell.  Only the
    /// Enter and Leave actions set it; the service consumes it.
    pub actuator_pulse: bool,
    /// Pending display redraw, consumed by the service each cycle.
    pub screen: ScreenUpdate,
}

impl Default for OutputCommands {
    fn default() -> Self {
        Self {
            indicator: false,
            actuator_pulse: false,
            screen: ScreenUpdate::None,
        }
    }
}

impl OutputCommands {
    /// Take the pending screen update, leaving `None` behind.
    pub fn take_screen(&mut self) -> ScreenUpdate {
        core::mem::replace(&mut self.screen, ScreenUpdate::None)
    }

    /// Take the pending actuator pulse, leaving `false` behind.
    pub fn take_actuator_pulse(&mut self) -> bool {
        core::mem::take(&mut self.actuator_pulse)
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state action.
pub struct FsmContext {
    /// People currently in the room.  Only the Enter and Leave actions
    /// write it, and it never goes below zero.
    pub occupancy: u32,

    /// Commands to be applied to outputs after the action runs.
    pub commands: OutputCommands,

    /// The reading that selected the current state.
    pub last_reading: BeamReading,
    /// Consecutive self-loop transitions in the current state.
    pub polls_in_state: u64,

    /// Compiled-in configuration.
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a new context: empty room, all outputs off.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            occupancy: 0,
            commands: OutputCommands::default(),
            last_reading: BeamReading::Clear,
            polls_in_state: 0,
            config,
        }
    }

    /// Whether anyone is in the room.
    pub fn is_occupied(&self) -> bool {
        self.occupancy >= 1
    }
}
