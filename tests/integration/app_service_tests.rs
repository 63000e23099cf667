//! Integration tests for the SensorPort → AppService → outputs pipeline.
//!
//! These run on the host (x86_64) and drive the service with scripted
//! beam readings, checking the counter, the two outputs, the screen and
//! the emitted events after each sequence.

use super::mock_hw::{CollectingSink, MockDisplay, MockHardware, OutputCall, RecordingDelay};

use roomsense::app::events::{AppEvent, Direction};
use roomsense::app::service::AppService;
use roomsense::config::SystemConfig;
use roomsense::fsm::BeamReading::{self, BeamA, BeamB, Both, Clear};
use roomsense::fsm::StateId;

struct Rig {
    app: AppService,
    hw: MockHardware,
    display: MockDisplay,
    delay: RecordingDelay,
    sink: CollectingSink,
}

impl Rig {
    fn new(script: &[BeamReading]) -> Self {
        Self::with_config(SystemConfig::default(), script)
    }

    fn with_config(config: SystemConfig, script: &[BeamReading]) -> Self {
        let mut rig = Self {
            app: AppService::new(config).unwrap(),
            hw: MockHardware::new(script),
            display: MockDisplay::new(),
            delay: RecordingDelay::default(),
            sink: CollectingSink::default(),
        };
        rig.app.start(&mut rig.display, &mut rig.sink);
        rig
    }

    /// Run `n` poll cycles; each consumes one scripted reading.
    fn poll(&mut self, n: usize) {
        for _ in 0..n {
            self.app
                .poll(&mut self.hw, &mut self.display, &mut self.delay, &mut self.sink);
        }
    }

    fn transitions(&self) -> Vec<(StateId, StateId)> {
        self.sink
            .events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    fn count_events(&self) -> Vec<(u32, Direction)> {
        self.sink
            .events
            .iter()
            .filter_map(|e| match e {
                AppEvent::OccupancyChanged { count, direction } => Some((*count, *direction)),
                _ => None,
            })
            .collect()
    }
}

// ── Entry and exit sequences ─────────────────────────────────

#[test]
fn a_then_b_counts_one_entry() {
    let mut rig = Rig::new(&[BeamA, BeamB]);

    rig.poll(2);
    assert_eq!(rig.app.state(), StateId::Enter);
    assert_eq!(
        rig.transitions(),
        vec![
            (StateId::Idle, StateId::WaitToEnter),
            (StateId::WaitToEnter, StateId::Enter),
        ]
    );
    // The Enter action has not run yet; it runs on the next cycle.
    assert_eq!(rig.app.occupancy(), 0);

    rig.poll(1);
    assert_eq!(rig.app.occupancy(), 1);
    assert_eq!(rig.app.state(), StateId::Idle);
    assert_eq!(rig.count_events(), vec![(1, Direction::In)]);
    assert!(rig.hw.indicator_on());
    // One pulse spanning the Enter dwell.
    assert_eq!(rig.hw.actuator_writes(), vec![true, false]);
    assert_eq!(rig.display.row(1), "Inside: 1       ");

    // Further idle cycles never fire the entry action again.
    rig.poll(5);
    assert_eq!(rig.app.occupancy(), 1);
    assert_eq!(rig.count_events().len(), 1);
}

#[test]
fn b_then_a_counts_one_exit() {
    let mut rig = Rig::new(&[BeamA, BeamB]);
    rig.poll(3);
    assert_eq!(rig.app.occupancy(), 1);

    rig.hw.push(BeamB);
    rig.hw.push(BeamA);
    rig.poll(2);
    assert_eq!(rig.app.state(), StateId::Leave);

    rig.poll(1);
    assert_eq!(rig.app.occupancy(), 0);
    assert_eq!(rig.app.state(), StateId::Idle);
    assert!(!rig.hw.indicator_on());
    assert_eq!(
        rig.count_events(),
        vec![(1, Direction::In), (0, Direction::Out)]
    );
    assert_eq!(rig.hw.actuator_writes(), vec![true, false, true, false]);
    assert_eq!(rig.display.row(1), "Inside: 0       ");
}

#[test]
fn exit_from_empty_room_stays_at_zero() {
    let mut rig = Rig::new(&[BeamB, BeamA, Clear, BeamB, BeamA]);
    rig.poll(6);

    assert_eq!(rig.app.occupancy(), 0);
    assert_eq!(rig.count_events(), vec![(0, Direction::Out), (0, Direction::Out)]);
    assert!(!rig.hw.indicator_on());
}

#[test]
fn indicator_follows_occupancy_across_several_people() {
    let script = [BeamA, BeamB, Clear, BeamA, BeamB, Clear, BeamB, BeamA, Clear];
    let mut rig = Rig::new(&script);
    rig.poll(script.len());

    assert_eq!(rig.app.occupancy(), 1);
    assert!(rig.hw.indicator_on());
}

// ── Ambiguous and abandoned sequences ────────────────────────

#[test]
fn both_beams_at_idle_is_a_no_op() {
    let mut rig = Rig::new(&[Both, Both, Both]);
    rig.poll(3);

    assert_eq!(rig.app.state(), StateId::Idle);
    assert_eq!(rig.app.occupancy(), 0);
    assert!(rig.transitions().is_empty());
    assert!(rig
        .sink
        .events
        .iter()
        .all(|e| !matches!(e, AppEvent::AmbiguousReading { .. })));
    assert_eq!(rig.display.row(0), "Welcome visitors");
}

#[test]
fn both_beams_mid_sequence_aborts_to_idle() {
    let mut rig = Rig::new(&[BeamA, Both, BeamB]);
    rig.poll(3);

    assert_eq!(rig.app.state(), StateId::WaitToLeave);
    assert_eq!(rig.app.occupancy(), 0);
    assert!(rig.sink.events.contains(&AppEvent::AmbiguousReading {
        state: StateId::WaitToEnter
    }));
    assert_eq!(rig.app.build_telemetry().ambiguous, 1);
}

#[test]
fn both_beams_right_after_a_count_is_not_ambiguous() {
    let mut rig = Rig::new(&[BeamA, BeamB, Both]);
    rig.poll(3);

    assert_eq!(rig.app.state(), StateId::Idle);
    assert_eq!(rig.app.occupancy(), 1);
    assert!(rig
        .sink
        .events
        .iter()
        .all(|e| !matches!(e, AppEvent::AmbiguousReading { .. })));
    assert_eq!(rig.app.build_telemetry().ambiguous, 0);
}

#[test]
fn abandoned_approach_does_not_count() {
    let mut rig = Rig::new(&[BeamA, BeamA, Clear]);
    rig.poll(5);

    assert_eq!(rig.app.state(), StateId::Idle);
    assert_eq!(rig.app.occupancy(), 0);
    assert!(rig.count_events().is_empty());
    assert!(rig.hw.actuator_writes().is_empty());
}

// ── Idle behaviour ───────────────────────────────────────────

#[test]
fn clear_readings_keep_machine_idle() {
    let mut rig = Rig::new(&[]);
    rig.poll(100);

    assert_eq!(rig.app.state(), StateId::Idle);
    assert_eq!(rig.app.occupancy(), 0);
    assert_eq!(rig.app.poll_count(), 100);
    assert_eq!(rig.hw.reads, 100);
    assert!(rig.transitions().is_empty());
    // Outputs are re-applied every cycle.
    assert_eq!(
        rig.hw.calls.iter().filter(|c| **c == OutputCall::Indicator(false)).count(),
        100
    );
    // Banner states never drive the actuator.
    assert!(rig.hw.actuator_writes().is_empty());
}

#[test]
fn start_clears_and_draws_layout() {
    let rig = Rig::new(&[]);

    assert_eq!(rig.display.clears, 1);
    assert_eq!(rig.display.row(0), "Welcome visitors");
    assert_eq!(rig.display.row(1), "Inside: 0       ");
    assert_eq!(rig.sink.events, vec![AppEvent::Started(StateId::Idle)]);
}

// ── Timing ───────────────────────────────────────────────────

#[test]
fn every_cycle_dwells_for_configured_time() {
    let mut cfg = SystemConfig::default();
    cfg.dwell_long_ms = 35;
    let mut rig = Rig::with_config(cfg, &[BeamA, BeamB]);
    rig.poll(4);

    assert_eq!(rig.delay.dwells_ms, vec![35, 35, 35, 35]);
}

#[test]
fn telemetry_snapshot_serialises() {
    let mut cfg = SystemConfig::default();
    cfg.telemetry_interval_polls = 3;
    let mut rig = Rig::with_config(cfg, &[BeamA, BeamB]);
    rig.poll(3);

    let telemetry = rig
        .sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::Telemetry(t) => Some(t.clone()),
            _ => None,
        })
        .expect("telemetry after three polls");
    assert_eq!(telemetry.occupancy, 1);
    assert_eq!(telemetry.entries, 1);

    let json = serde_json::to_string(&telemetry).unwrap();
    assert!(json.contains("\"occupancy\":1"));
}
