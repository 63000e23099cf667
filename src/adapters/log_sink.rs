//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production, stderr on host).
//! State transitions are logged by the FSM engine itself, so the sink
//! skips `StateChanged`.

use log::{Level, log};

use crate::app::events::{AppEvent, Direction};
use crate::app::ports::EventSink;

/// Adapter that logs application events to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

/// The log line for `event`, or `None` if the sink stays quiet for it.
fn render(event: &AppEvent) -> Option<(Level, String)> {
    match event {
        AppEvent::Telemetry(t) => Some(match serde_json::to_string(t) {
            Ok(json) => (Level::Info, format!("TELEM | {}", json)),
            Err(e) => (Level::Warn, format!("TELEM | encode failed: {}", e)),
        }),
        AppEvent::StateChanged { .. } => None,
        AppEvent::OccupancyChanged { count, direction } => {
            let arrow = match direction {
                Direction::In => "in",
                Direction::Out => "out",
            };
            Some((Level::Info, format!("COUNT | {} | occupancy={}", arrow, count)))
        }
        AppEvent::AmbiguousReading { state } => Some((
            Level::Warn,
            format!("BEAMS | both broken in {:?}, crossing discarded", state),
        )),
        AppEvent::Started(state) => Some((Level::Info, format!("START | initial_state={:?}", state))),
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        if let Some((level, line)) = render(event) {
            log!(level, "{}", line);
        }
    }
}
