//! Concrete state actions and table builder.
//!
//! Each state is one plain `fn` pointer plus a dwell and a transition
//! row: no closures, no dynamic dispatch, no heap.  This is the classic
//! embedded C FSM pattern expressed in safe Rust.
//!
//! ```text
//!  IDLE ──[A]──▶ WAIT_TO_ENTER ──[B]──▶ ENTER ──[any]──▶ IDLE
//!  IDLE ──[B]──▶ WAIT_TO_LEAVE ──[A]──▶ LEAVE ──[any]──▶ IDLE
//!
//!  WAIT_* hold on a repeat of their own beam and drop to IDLE on Clear.
//!  Both beams at once (reading 3) returns every state to IDLE.
//! ```

use super::context::{FsmContext, ScreenUpdate};
use super::{Dwell, StateDescriptor, StateId};

use StateId::{Enter, Idle, Leave, WaitToEnter, WaitToLeave};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
///
/// Transition rows are indexed by reading: `[Clear, BeamA, BeamB, Both]`.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Idle, nobody crossing
        StateDescriptor {
            id: Idle,
            name: "Idle",
            action: show_welcome,
            dwell: Dwell::Long,
            next: [Idle, WaitToEnter, WaitToLeave, Idle],
        },
        // Index 1: WaitToEnter, person between the beams heading in
        StateDescriptor {
            id: WaitToEnter,
            name: "WaitToEnter",
            action: show_welcome,
            dwell: Dwell::Long,
            next: [Idle, WaitToEnter, Enter, Idle],
        },
        // Index 2: WaitToLeave, person between the beams heading out
        StateDescriptor {
            id: WaitToLeave,
            name: "WaitToLeave",
            action: show_welcome,
            dwell: Dwell::Long,
            next: [Idle, Leave, WaitToLeave, Idle],
        },
        // Index 3: Enter, count one person in
        StateDescriptor {
            id: Enter,
            name: "Enter",
            action: count_entry,
            dwell: Dwell::Long,
            next: [Idle, Idle, Idle, Idle],
        },
        // Index 4: Leave, count one person out
        StateDescriptor {
            id: Leave,
            name: "Leave",
            action: count_exit,
            dwell: Dwell::Long,
            next: [Idle, Idle, Idle, Idle],
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE / WAIT_TO_ENTER / WAIT_TO_LEAVE
// ═══════════════════════════════════════════════════════════════════════════

fn show_welcome(ctx: &mut FsmContext) {
    ctx.commands.screen = ScreenUpdate::Banner;
}

// ═══════════════════════════════════════════════════════════════════════════
//  ENTER
// ═══════════════════════════════════════════════════════════════════════════

fn count_entry(ctx: &mut FsmContext) {
    ctx.occupancy = ctx.occupancy.saturating_add(1);
    ctx.commands.screen = ScreenUpdate::Count(ctx.occupancy);
    ctx.commands.actuator_pulse = true;
    if ctx.is_occupied() {
        ctx.commands.indicator = true;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  LEAVE
// ═══════════════════════════════════════════════════════════════════════════

fn count_exit(ctx: &mut FsmContext) {
    // Clamp at zero: an exit seen with an empty room is a miscount upstream.
    ctx.occupancy = ctx.occupancy.saturating_sub(1);
    ctx.commands.screen = ScreenUpdate::Count(ctx.occupancy);
    ctx.commands.actuator_pulse = true;
    if !ctx.is_occupied() {
        ctx.commands.indicator = false;
    }
}
