//! Mock doorway hardware for integration tests.
//!
//! Feeds a scripted sequence of beam readings and records every output
//! call so tests can assert on the full command history without touching
//! real GPIO.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use roomsense::app::events::AppEvent;
use roomsense::app::ports::{DisplayPort, EventSink, OutputPort, SensorPort};
use roomsense::drivers::screen::ScreenBuffer;
use roomsense::fsm::BeamReading;

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputCall {
    Indicator(bool),
    Actuator(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    script: VecDeque<BeamReading>,
    pub calls: Vec<OutputCall>,
    pub reads: usize,
}

#[allow(dead_code)]
impl MockHardware {
    /// Readings are consumed one per poll; an exhausted script reads Clear.
    pub fn new(script: &[BeamReading]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            calls: Vec::new(),
            reads: 0,
        }
    }

    pub fn push(&mut self, reading: BeamReading) {
        self.script.push_back(reading);
    }

    pub fn indicator_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                OutputCall::Indicator(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Every level written to the actuator, in order.
    pub fn actuator_writes(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                OutputCall::Actuator(on) => Some(*on),
                _ => None,
            })
            .collect()
    }
}

impl SensorPort for MockHardware {
    fn read_beams(&mut self) -> BeamReading {
        self.reads += 1;
        self.script.pop_front().unwrap_or(BeamReading::Clear)
    }
}

impl OutputPort for MockHardware {
    fn set_indicator(&mut self, active: bool) {
        self.calls.push(OutputCall::Indicator(active));
    }

    fn set_actuator(&mut self, active: bool) {
        self.calls.push(OutputCall::Actuator(active));
    }
}

// ── MockDisplay ───────────────────────────────────────────────

/// Character grid plus a count of write operations.
#[derive(Default)]
pub struct MockDisplay {
    pub screen: ScreenBuffer,
    pub clears: usize,
    pub writes: usize,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, row: usize) -> &str {
        self.screen.row_text(row)
    }
}

impl DisplayPort for MockDisplay {
    fn clear(&mut self) {
        self.clears += 1;
        self.screen.clear();
    }

    fn write_text_at(&mut self, row: u8, col: u8, text: &str) {
        self.writes += 1;
        self.screen.write_text_at(row, col, text);
    }

    fn write_integer_at(&mut self, row: u8, col: u8, value: u32, width: u8) {
        self.writes += 1;
        self.screen.write_integer_at(row, col, value, width);
    }
}

// ── RecordingDelay ────────────────────────────────────────────

/// Logs each millisecond dwell instead of sleeping.
#[derive(Default)]
pub struct RecordingDelay {
    pub dwells_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.dwells_ms.push(ms);
    }
}

// ── CollectingSink ────────────────────────────────────────────

#[derive(Default)]
pub struct CollectingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for CollectingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
