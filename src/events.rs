//! Interrupt-driven input event queue.
//!
//! Events are produced by:
//! - Timer callbacks (control tick, telemetry tick)
//! - The gyro wake interrupt (motion above threshold while armed)
//! - The keypad / bus command decoder (digits, arm, reset)
//!
//! Events are consumed by the main control loop, which drains them one at
//! a time in FIFO order and feeds them to the application service.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Timer ISR    │────▶│              │     │              │
//! │ Gyro wake    │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Cmd decoder  │────▶│  (lock-free) │     │  (consumer)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! The ring is lock-free SPSC: one producer context, one consumer. Each
//! slot is an `AtomicU16` holding an encoded event, so no `unsafe` and no
//! mutable statics are needed.

use core::sync::atomic::{AtomicU8, AtomicU16, Ordering};

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 32;

/// Input events the main loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// FSM control loop tick (10 Hz).
    ControlTick,
    /// Aggregate telemetry report timer fired.
    TelemetryTick,
    /// Gyro wake interrupt: coarse motion magnitude in deg/s.
    MotionWake(u8),
    /// Arm command received.
    Arm,
    /// Intruder-reset command received.
    ResetIntruder,
    /// One keypad digit (0–9).
    Digit(u8),
}

// Wire encoding: tag in the high byte, payload in the low byte.
// Tag 0 is reserved as the empty-slot sentinel.
const TAG_CONTROL_TICK: u8 = 1;
const TAG_TELEMETRY_TICK: u8 = 2;
const TAG_MOTION_WAKE: u8 = 3;
const TAG_ARM: u8 = 4;
const TAG_RESET_INTRUDER: u8 = 5;
const TAG_DIGIT: u8 = 6;

fn encode(event: InputEvent) -> u16 {
    let (tag, payload) = match event {
        InputEvent::ControlTick => (TAG_CONTROL_TICK, 0),
        InputEvent::TelemetryTick => (TAG_TELEMETRY_TICK, 0),
        InputEvent::MotionWake(mag) => (TAG_MOTION_WAKE, mag),
        InputEvent::Arm => (TAG_ARM, 0),
        InputEvent::ResetIntruder => (TAG_RESET_INTRUDER, 0),
        InputEvent::Digit(d) => (TAG_DIGIT, d),
    };
    (u16::from(tag) << 8) | u16::from(payload)
}

fn decode(raw: u16) -> Option<InputEvent> {
    let tag = (raw >> 8) as u8;
    let payload = (raw & 0xFF) as u8;
    match tag {
        TAG_CONTROL_TICK => Some(InputEvent::ControlTick),
        TAG_TELEMETRY_TICK => Some(InputEvent::TelemetryTick),
        TAG_MOTION_WAKE => Some(InputEvent::MotionWake(payload)),
        TAG_ARM => Some(InputEvent::Arm),
        TAG_RESET_INTRUDER => Some(InputEvent::ResetIntruder),
        TAG_DIGIT => Some(InputEvent::Digit(payload)),
        _ => None,
    }
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// ISRs write (produce), main loop reads (consume). Atomic head/tail
// indices plus atomic slots; the SPSC discipline makes each slot write
// visible before the head advance that publishes it.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY_SLOT: AtomicU16 = AtomicU16::new(0);
static EVENT_SLOTS: [AtomicU16; EVENT_QUEUE_CAP] = [EMPTY_SLOT; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Safe to call from ISR context (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: InputEvent) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    EVENT_SLOTS[head as usize].store(encode(event), Ordering::Relaxed);
    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<InputEvent> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    let raw = EVENT_SLOTS[tail as usize].load(Ordering::Relaxed);
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    decode(raw)
}

/// Drain all pending events into a callback, FIFO order.
pub fn drain_events(mut handler: impl FnMut(InputEvent)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Check if the event queue is empty.
pub fn queue_is_empty() -> bool {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);
    tail == head
}

/// Number of pending events.
pub fn queue_len() -> usize {
    let head = EVENT_HEAD.load(Ordering::Relaxed) as usize;
    let tail = EVENT_TAIL.load(Ordering::Relaxed) as usize;
    (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
}
