//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — log to serial, publish on the security or
//! data topic, etc. Everything derives `Serialize` so the publishing
//! adapter can pick its own wire encoding.

use serde::Serialize;

use crate::auth::UserId;
use crate::fsm::StateId;
use crate::sensors::environment::EnvReading;

/// Security-channel events, one per alarm lifecycle edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SecurityEvent {
    /// Motion opened an authentication window.
    AuthWindowOpened,
    /// A registered user entered their full PIN correctly.
    Disarmed { user: UserId },
    /// A complete, wrong PIN was submitted.
    AuthFailed { attempts: u8 },
    /// Too many wrong PINs — alarm tripped.
    IntruderLockedOut,
    /// The window expired without a successful disarm — alarm tripped.
    AuthTimeout,
    /// Administrative reset of a tripped alarm.
    IntruderCleared,
    /// The system was (re-)armed.
    Armed,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Serialize)]
pub enum AppEvent {
    /// Security-channel event with the node uptime at emission.
    Security { event: SecurityEvent, millis: u64 },

    /// One environmental page reading (telemetry channel).
    EnvSample(EnvReading),

    /// Periodic aggregate snapshot (telemetry channel).
    Telemetry(TelemetryData),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The application service has started (carries initial state).
    Started(StateId),
}

/// Aggregate snapshot in the shape the gateway expects: alarm state plus
/// the last-known value of every environmental page, stamped with uptime.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryData {
    pub state: StateId,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub pressure_hpa: f32,
    pub siren_on: bool,
    pub failed_attempts: u8,
    pub millis: u64,
}
