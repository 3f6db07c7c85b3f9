//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (keypad adapter,
//! message bus, simulation script) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::config::SystemConfig;
use crate::fsm::StateId;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Arm the system (NORMAL → ARMED). Resets the failed-attempt counter.
    Arm,

    /// Administrative reset of a tripped alarm (INTRUDER → NORMAL).
    ResetIntruder,

    /// One keypad digit (0–9). Only accepted while an authentication
    /// window is open.
    Digit(u8),

    /// A motion magnitude sample forwarded over the bus (deg/s). Evaluated
    /// against the intrusion threshold exactly like a local gyro read.
    MotionSample(f32),

    /// Force the FSM into a specific state (debug / testing only).
    ForceState(StateId),

    /// Hot-reload configuration (e.g. from re-provisioning).
    UpdateConfig(SystemConfig),
}
