//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the occupancy-counting rules: the poll cycle
//! that drives the FSM and the events it reports.  All interaction with
//! hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
