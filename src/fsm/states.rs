//! Concrete state handler functions and table builder.
//!
//! Each state is defined by three plain `fn` pointers — no closures, no
//! dynamic dispatch, no heap. This is the classic embedded C FSM pattern
//! expressed in safe Rust.
//!
//! ```text
//!  ARMED ──[motion ≥ threshold]──▶ AUTH_COUNTDOWN
//!    ▲                                  │
//!    │                 [correct PIN]    │ [timeout / 3rd wrong PIN]
//!  [arm]                    ▼           ▼
//!  NORMAL ◀──[reset]── INTRUDER ◀───────┘
//! ```
//!
//! Timeout and motion triggers live here (polled per tick). Digit
//! processing — disarm and lockout — is event-driven and handled by the
//! application service, which forces the matching transition.

use log::{info, warn};

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use crate::app::events::SecurityEvent;
use crate::auth::AuthCountdown;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Armed
        StateDescriptor {
            id: StateId::Armed,
            name: "Armed",
            on_enter: Some(armed_enter),
            on_exit: None,
            on_update: armed_update,
        },
        // Index 1 — AuthCountdown
        StateDescriptor {
            id: StateId::AuthCountdown,
            name: "AuthCountdown",
            on_enter: Some(auth_enter),
            on_exit: Some(auth_exit),
            on_update: auth_update,
        },
        // Index 2 — Intruder
        StateDescriptor {
            id: StateId::Intruder,
            name: "Intruder",
            on_enter: Some(intruder_enter),
            on_exit: Some(intruder_exit),
            on_update: intruder_update,
        },
        // Index 3 — Normal
        StateDescriptor {
            id: StateId::Normal,
            name: "Normal",
            on_enter: Some(normal_enter),
            on_exit: None,
            on_update: normal_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  ARMED state — watching, no active intrusion
// ═══════════════════════════════════════════════════════════════════════════

fn armed_enter(ctx: &mut FsmContext) {
    ctx.commands.siren_on = false;
    ctx.commands.led_rgb = (200, 0, 0); // steady red — armed
    info!("ARMED: monitoring motion, threshold {:.1} dps", ctx.config.gyro_threshold_dps);
}

fn armed_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Trigger: motion magnitude at or above the intrusion threshold.
    // Only evaluated here, so re-triggering while a window is already
    // open is impossible by construction.
    if ctx.sensors.motion_triggered {
        info!(
            "ARMED: motion {:.1} dps ≥ {:.1} — opening auth window",
            ctx.sensors.gyro_magnitude_dps, ctx.config.gyro_threshold_dps
        );
        return Some(StateId::AuthCountdown);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  AUTH_COUNTDOWN state — window open, collecting PIN digits
// ═══════════════════════════════════════════════════════════════════════════

fn auth_enter(ctx: &mut FsmContext) {
    let deadline = ctx.deadline_after_secs(ctx.config.auth_window_secs);
    // failed_attempts carries over from earlier windows in this arming
    // cycle; 0 on a fresh cycle.
    ctx.auth = Some(AuthCountdown::open(deadline, ctx.failed_attempts));
    ctx.commands.led_rgb = (255, 160, 0); // amber — awaiting PIN
    ctx.push_event(SecurityEvent::AuthWindowOpened);
    info!(
        "AUTH_COUNTDOWN: window open for {}s, {} prior failed attempts",
        ctx.config.auth_window_secs, ctx.failed_attempts
    );
}

fn auth_exit(ctx: &mut FsmContext) {
    // Persist the attempt counter back onto the arming cycle, then discard
    // the window state. Whoever ends the cycle resets the counter.
    if let Some(auth) = ctx.auth.take() {
        ctx.failed_attempts = auth.failed_attempts();
    }
}

fn auth_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Timer expiry is evaluated before any newly arrived digit is applied
    // (digits are processed after the tick by the service), so a stale
    // window can never accept a last-moment correct digit.
    let elapsed = ctx
        .auth
        .as_ref()
        .is_some_and(|a| a.is_elapsed(ctx.total_ticks));
    if elapsed {
        warn!("AUTH_COUNTDOWN: window expired without disarm");
        ctx.push_event(SecurityEvent::AuthTimeout);
        return Some(StateId::Intruder);
    }

    // Blink amber while counting down (1 Hz-ish at 10 Hz tick).
    if (ctx.ticks_in_state / 5) % 2 == 0 {
        ctx.commands.led_rgb = (255, 160, 0);
    } else {
        ctx.commands.led_rgb = (60, 40, 0);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  INTRUDER state — confirmed breach, alarm tripped
// ═══════════════════════════════════════════════════════════════════════════

fn intruder_enter(ctx: &mut FsmContext) {
    ctx.commands.siren_on = true;
    ctx.commands.led_rgb = (255, 0, 0);
    warn!("INTRUDER: alarm tripped, awaiting administrative reset");
}

fn intruder_exit(ctx: &mut FsmContext) {
    ctx.commands.siren_on = false;
    info!("INTRUDER: cleared");
}

fn intruder_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Fast red blink. Leaving this state requires the external reset
    // command, handled by the service.
    if ctx.ticks_in_state % 2 == 0 {
        ctx.commands.led_rgb = (255, 0, 0);
    } else {
        ctx.commands.led_rgb = (40, 0, 0);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  NORMAL state — disarmed, idle, no monitoring
// ═══════════════════════════════════════════════════════════════════════════

fn normal_enter(ctx: &mut FsmContext) {
    ctx.commands.siren_on = false;
    ctx.commands.led_rgb = (0, 180, 0); // green — disarmed
    info!("NORMAL: disarmed, motion ignored");
}

fn normal_update(_ctx: &mut FsmContext) -> Option<StateId> {
    // Re-arming requires the explicit arm command, handled by the service.
    None
}
