//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the FSM, the occupancy counter (inside the shared
//! context), and the poll loop.  All I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters and a scripted sequence of beam readings.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │      AppService        │
//!  OutputPort ◀───│  FSM · occupancy count │ ──▶ DisplayPort
//!                 └────────────────────────┘
//!                       ▲ DelayNs (dwell)
//! ```
//!
//! The service is owned by exactly one loop and takes `&mut self` for
//! every mutation, so the counter and current state need no locking.
//! Anything that wants to share it across tasks must wrap the whole
//! service in one mutex or talk to its owner over a channel.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::SystemConfig;
use crate::error::Error;
use crate::fsm::context::{FsmContext, ScreenUpdate};
use crate::fsm::states::build_state_table;
use crate::fsm::{BeamReading, Fsm, StateId};

use super::events::{AppEvent, Direction, TelemetryData};
use super::ports::{DisplayPort, EventSink, OutputPort, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    poll_count: u64,
    entries: u64,
    exits: u64,
    ambiguous: u64,
}

impl AppService {
    /// Construct the service from configuration, starting in Idle with an
    /// empty room.
    ///
    /// Does **not** touch the display; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            fsm: Fsm::new(build_state_table(), StateId::Idle),
            ctx: FsmContext::new(config),
            poll_count: 0,
            entries: 0,
            exits: 0,
            ambiguous: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Draw the static screen layout and announce the initial state.
    pub fn start(&mut self, display: &mut impl DisplayPort, sink: &mut impl EventSink) {
        let cfg = &self.ctx.config;
        display.clear();
        display.write_text_at(cfg.banner_row, cfg.banner_col, &cfg.banner_text);
        display.write_text_at(cfg.count_row, 0, &cfg.count_label);
        display.write_integer_at(cfg.count_row, cfg.count_col, self.ctx.occupancy, cfg.count_field_width());

        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one poll cycle: action → outputs → dwell → sample → transition.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`OutputPort`], which avoids a double mutable borrow of one board
    /// adapter while keeping the port boundary explicit.
    pub fn poll(
        &mut self,
        hw: &mut (impl SensorPort + OutputPort),
        display: &mut impl DisplayPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        let state = self.fsm.current_state();

        // 1. Output action of the current state
        self.fsm.run_action(&mut self.ctx);
        match state {
            StateId::Enter => {
                self.entries += 1;
                sink.emit(&AppEvent::OccupancyChanged {
                    count: self.ctx.occupancy,
                    direction: Direction::In,
                });
            }
            StateId::Leave => {
                self.exits += 1;
                sink.emit(&AppEvent::OccupancyChanged {
                    count: self.ctx.occupancy,
                    direction: Direction::Out,
                });
            }
            _ => {}
        }
        let pulse = self.apply_outputs(hw, display);

        // 2. Dwell, the only suspension point.  An actuator pulse spans it.
        delay.delay_ms(self.ctx.config.dwell_ms(self.fsm.dwell()));
        if pulse {
            hw.set_actuator(false);
        }

        // 3. Sample
        let reading = hw.read_beams();

        // 4. Transition
        let next = self.fsm.advance(reading, &mut self.ctx);
        if reading == BeamReading::Both && state.is_waiting() {
            self.ambiguous += 1;
            sink.emit(&AppEvent::AmbiguousReading { state });
        }
        if next != state {
            sink.emit(&AppEvent::StateChanged { from: state, to: next });
        }

        self.poll_count += 1;
        if self.poll_count % u64::from(self.ctx.config.telemetry_interval_polls) == 0 {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }
    }

    /// Poll forever.  The device has no shutdown path.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + OutputPort),
        display: &mut impl DisplayPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            self.poll(hw, display, delay, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            state: self.fsm.current_state(),
            occupancy: self.ctx.occupancy,
            indicator: self.ctx.commands.indicator,
            last_reading: self.ctx.last_reading,
            polls: self.poll_count,
            entries: self.entries,
            exits: self.exits,
            ambiguous: self.ambiguous,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// People currently counted inside.
    pub fn occupancy(&self) -> u32 {
        self.ctx.occupancy
    }

    /// Poll cycles completed since startup.
    pub fn poll_count(&self) -> u64 {
        self.poll_count
    }

    /// The live configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate the action's output commands into port calls.  Returns
    /// whether an actuator pulse was started; the caller ends it after
    /// the dwell.
    fn apply_outputs(&mut self, hw: &mut impl OutputPort, display: &mut impl DisplayPort) -> bool {
        hw.set_indicator(self.ctx.commands.indicator);
        let pulse = self.ctx.commands.take_actuator_pulse();
        if pulse {
            hw.set_actuator(true);
        }

        let cfg = &self.ctx.config;
        match self.ctx.commands.take_screen() {
            ScreenUpdate::Banner => {
                display.write_text_at(cfg.banner_row, cfg.banner_col, &cfg.banner_text);
            }
            ScreenUpdate::Count(n) => {
                display.write_integer_at(cfg.count_row, cfg.count_col, n, cfg.count_field_width());
            }
            ScreenUpdate::None => {}
        }
        pulse
    }
}
