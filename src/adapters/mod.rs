//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements            | Connects to               |
//! |-------------|-----------------------|---------------------------|
//! | `hardware`  | SensorPort            | Beam receiver GPIO inputs |
//! |             | OutputPort            | LED + actuator GPIO       |
//! | `log_sink`  | EventSink             | Serial log output         |
//! | `time`      | `DelayNs`             | FreeRTOS / ROM delay      |
//!
//! The display port is implemented directly by the drivers in
//! [`crate::drivers::lcd`] and [`crate::drivers::screen`].

pub mod hardware;
pub mod log_sink;
pub mod time;
