//! Table-driven Moore finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  StateTable                                                 │
//! │  ┌─────────────┬──────────┬───────┬───────────────────────┐ │
//! │  │ StateId     │ action   │ dwell │ next[Clear,A,B,Both]  │ │
//! │  ├─────────────┼──────────┼───────┼───────────────────────┤ │
//! │  │ Idle        │ fn(ctx)  │ Long  │ [Idle, WtE, WtL, Idle]│ │
//! │  │ WaitToEnter │ fn(ctx)  │ Long  │ [Idle, WtE, Ent, Idle]│ │
//! │  │ WaitToLeave │ fn(ctx)  │ Long  │ [Idle, Lv,  WtL, Idle]│ │
//! │  │ Enter       │ fn(ctx)  │ Long  │ [Idle, Idle,Idle,Idle]│ │
//! │  │ Leave       │ fn(ctx)  │ Long  │ [Idle, Idle,Idle,Idle]│ │
//! │  └─────────────┴──────────┴───────┴───────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! One poll cycle runs the current state's `action`, waits for its
//! `dwell`, samples the beams and indexes `next` with the reading.
//! The engine itself never blocks: the wait and the sample are done by
//! [`AppService::poll`](crate::app::service::AppService::poll) through
//! the port traits, so the engine stays hardware-agnostic.

pub mod context;
pub mod states;

use context::FsmContext;
use log::{debug, info};

use crate::error::Error;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all possible occupancy states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    WaitToEnter = 1,
    WaitToLeave = 2,
    Enter = 3,
    Leave = 4,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 5;

    /// Every state, in table order.
    pub const ALL: [StateId; StateId::COUNT] = [
        Self::Idle,
        Self::WaitToEnter,
        Self::WaitToLeave,
        Self::Enter,
        Self::Leave,
    ];

    /// Convert a table index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `Idle` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::WaitToEnter,
            2 => Self::WaitToLeave,
            3 => Self::Enter,
            4 => Self::Leave,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }

    /// Whether this state's action touches the occupancy counter.
    pub fn is_counting(self) -> bool {
        matches!(self, Self::Enter | Self::Leave)
    }

    /// Whether a crossing is in progress (one beam seen, waiting for the
    /// other).  Only these states can be aborted by an ambiguous reading.
    pub fn is_waiting(self) -> bool {
        matches!(self, Self::WaitToEnter | Self::WaitToLeave)
    }
}

// ---------------------------------------------------------------------------
// Beam reading (the FSM input alphabet)
// ---------------------------------------------------------------------------

/// A 2-bit sample of the two break-beam sensors.
///
/// Bit 0 is beam A (outer, a person is about to enter), bit 1 is beam B
/// (inner, a person is about to leave).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[repr(u8)]
pub enum BeamReading {
    /// No beam broken.
    Clear = 0,
    /// Only beam A broken.
    BeamA = 1,
    /// Only beam B broken.
    BeamB = 2,
    /// Both beams broken at once; treated as a detection artefact.
    Both = 3,
}

impl BeamReading {
    /// Number of distinct readings, the width of every transition row.
    pub const COUNT: usize = 4;

    pub const ALL: [BeamReading; BeamReading::COUNT] =
        [Self::Clear, Self::BeamA, Self::BeamB, Self::Both];

    /// Pack two beam levels (`true` = broken) into a reading.
    pub fn from_beams(beam_a: bool, beam_b: bool) -> Self {
        match (beam_a, beam_b) {
            (false, false) => Self::Clear,
            (true, false) => Self::BeamA,
            (false, true) => Self::BeamB,
            (true, true) => Self::Both,
        }
    }

    /// Decode a raw 2-bit register sample.
    ///
    /// # Panics
    ///
    /// Panics if `bits > 3`.  Register reads are masked to two bits, so any
    /// larger value is a wiring or caller bug, not a runtime condition.
    pub fn from_bits(bits: u8) -> Self {
        match Self::try_from(bits) {
            Ok(reading) => reading,
            Err(_) => panic!("beam reading out of range: {bits}"),
        }
    }

    /// Column index into a transition row.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for BeamReading {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            0 => Ok(Self::Clear),
            1 => Ok(Self::BeamA),
            2 => Ok(Self::BeamB),
            3 => Ok(Self::Both),
            other => Err(Error::InvalidReading(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Dwell
// ---------------------------------------------------------------------------

/// How long a state holds its output before the next sample.
/// Resolved to milliseconds by [`SystemConfig::dwell_ms`](crate::config::SystemConfig::dwell_ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dwell {
    Short,
    Long,
}

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Signature for the per-cycle output action.
pub type StateActionFn = fn(&mut FsmContext);

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array; no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub action: StateActionFn,
    pub dwell: Dwell,
    /// Successor for each reading, indexed by [`BeamReading::index`].
    pub next: [StateId; BeamReading::COUNT],
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table and the current state index.  All other mutable
/// state (counter, output commands) lives in the [`FsmContext`] passed in
/// by the owner, which is the only caller: the engine is single-threaded
/// by construction.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        for (idx, row) in table.iter().enumerate() {
            debug_assert_eq!(row.id as usize, idx, "state table out of order at {idx}");
        }
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Step 1 of a poll cycle: invoke the current state's output action.
    pub fn run_action(&self, ctx: &mut FsmContext) {
        (self.table[self.current].action)(ctx);
    }

    /// Step 2 input: the dwell configured for the current state.
    pub fn dwell(&self) -> Dwell {
        self.table[self.current].dwell
    }

    /// Step 4 of a poll cycle: follow the transition selected by `reading`.
    /// Returns the new current state.
    pub fn advance(&mut self, reading: BeamReading, ctx: &mut FsmContext) -> StateId {
        let from = self.current_state();
        let to = self.table[self.current].next[reading.index()];

        ctx.last_reading = reading;

        if to != from {
            if to.is_counting() {
                info!("FSM transition: {} -> {}", self.table[self.current].name, self.table[to as usize].name);
            } else {
                debug!("FSM transition: {} -> {}", self.table[self.current].name, self.table[to as usize].name);
            }
            self.current = to as usize;
            ctx.polls_in_state = 0;
        } else {
            ctx.polls_in_state = ctx.polls_in_state.saturating_add(1);
        }

        to
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// Successor of `state` on `reading`, without moving the machine.
    pub fn successor(&self, state: StateId, reading: BeamReading) -> StateId {
        self.table[state as usize].next[reading.index()]
    }

}


#[cfg(test)]
mod proptests {
    use super::context::FsmContext;
    use super::*;
    use crate::config::SystemConfig;
    use proptest::prelude::*;

    fn arb_reading() -> impl Strategy<Value = BeamReading> {
        (0u8..4).prop_map(BeamReading::from_bits)
    }

    proptest! {
        #[test]
        fn no_invalid_state_reachable(readings in proptest::collection::vec(arb_reading(), 1..200)) {
            let mut fsm = Fsm::new(states::build_state_table(), StateId::Idle);
            let mut ctx = FsmContext::new(SystemConfig::default());

            for reading in readings {
                fsm.run_action(&mut ctx);
                let next = fsm.advance(reading, &mut ctx);
                prop_assert!(StateId::ALL.contains(&next));
                if reading == BeamReading::Both {
                    prop_assert_eq!(next, StateId::Idle);
                }
            }
        }

        #[test]
        fn counter_tracks_entries_minus_exits_clamped(readings in proptest::collection::vec(arb_reading(), 1..200)) {
            let mut fsm = Fsm::new(states::build_state_table(), StateId::Idle);
            let mut ctx = FsmContext::new(SystemConfig::default());
            let mut expected: u32 = 0;

            for reading in readings {
                match fsm.current_state() {
                    StateId::Enter => expected += 1,
                    StateId::Leave => expected = expected.saturating_sub(1),
                    _ => {}
                }
                fsm.run_action(&mut ctx);
                prop_assert_eq!(ctx.occupancy, expected);
                prop_assert_eq!(ctx.commands.indicator, expected >= 1);
                fsm.advance(reading, &mut ctx);
            }
        }
    }
}
