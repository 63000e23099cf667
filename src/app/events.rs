//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use serde::Serialize;

use crate::fsm::{BeamReading, StateId};

/// Which way a counted person crossed the doorway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    In,
    Out,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The Enter or Leave action ran.  `count` is the new occupancy.
    OccupancyChanged { count: u32, direction: Direction },

    /// Both beams broke at once while a crossing was in progress.
    AmbiguousReading { state: StateId },

    /// The application service has started (carries initial state).
    Started(StateId),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryData {
    pub state: StateId,
    pub occupancy: u32,
    pub indicator: bool,
    pub last_reading: BeamReading,
    pub polls: u64,
    pub entries: u64,
    pub exits: u64,
    pub ambiguous: u64,
}
