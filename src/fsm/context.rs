//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to. It contains the latest motion snapshot, actuator command
//! outputs, the open authentication attempt (if any), timing information,
//! configuration, and the outbox of security events produced this tick.
//! Think of it as the "blackboard" in a blackboard architecture.

use heapless::Vec;
use log::warn;

use crate::app::events::SecurityEvent;
use crate::auth::AuthCountdown;
use crate::config::SystemConfig;

/// Security events a single tick can produce is small; 8 is generous.
const OUTBOX_CAP: usize = 8;

// ---------------------------------------------------------------------------
// Sensor snapshot (read-only to state handlers; written by sensor hub)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of the motion input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorSnapshot {
    /// Gyroscope rates per axis (deg/s).
    pub gyro_x_dps: f32,
    pub gyro_y_dps: f32,
    pub gyro_z_dps: f32,
    /// Scalar magnitude derived from the three axes.
    pub gyro_magnitude_dps: f32,
    /// True if the magnitude is at or above the intrusion threshold.
    /// Evaluated by the motion monitor before the FSM tick.
    pub motion_triggered: bool,
}

// ---------------------------------------------------------------------------
// Actuator commands (written by state handlers; consumed by main loop)
// ---------------------------------------------------------------------------

/// Local outputs the state handlers request. The loop applies these to the
/// actual drivers each tick.
#[derive(Debug, Clone, Copy)]
pub struct ActuatorCommands {
    /// Local siren on/off.
    pub siren_on: bool,
    /// Status LED colour (R, G, B) — each 0–255.
    pub led_rgb: (u8, u8, u8),
}

impl Default for ActuatorCommands {
    fn default() -> Self {
        Self {
            siren_on: false,
            led_rgb: (0, 0, 0), // off
        }
    }
}

impl ActuatorCommands {
    /// Siren off, LED dark — safe default.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,
    /// Duration of one tick in seconds (inverse of control loop frequency).
    pub tick_period_secs: f32,

    // -- Sensor data --
    /// Latest motion readings. Updated before each FSM tick.
    pub sensors: SensorSnapshot,

    // -- Actuator outputs --
    /// Commands to be applied after the FSM tick.
    pub commands: ActuatorCommands,

    // -- Configuration --
    /// System configuration (tunable parameters + user table source).
    pub config: SystemConfig,

    // -- Authentication --
    /// The open authentication attempt. `Some` exactly while the machine is
    /// in `AuthCountdown`; created on entry, discarded on exit.
    pub auth: Option<AuthCountdown>,
    /// Wrong full-PIN submissions in the current arming cycle. Carried into
    /// each new countdown window; reset only on arm, disarm, or intruder
    /// reset.
    pub failed_attempts: u8,

    // -- Event outbox --
    /// Security events produced this tick, drained by the service into the
    /// event sink.
    pub outbox: Vec<SecurityEvent, OUTBOX_CAP>,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            tick_period_secs: config.control_loop_interval_ms as f32 / 1000.0,
            sensors: SensorSnapshot::default(),
            commands: ActuatorCommands::all_off(),
            config,
            auth: None,
            failed_attempts: 0,
            outbox: Vec::new(),
        }
    }

    /// Seconds elapsed since the current state was entered.
    pub fn secs_in_state(&self) -> f32 {
        self.ticks_in_state as f32 * self.tick_period_secs
    }

    /// Uptime in milliseconds, derived from the tick counter.
    pub fn now_ms(&self) -> u64 {
        self.total_ticks * u64::from(self.config.control_loop_interval_ms)
    }

    /// Absolute tick at which a window of `secs` seconds, opened now,
    /// expires.
    pub fn deadline_after_secs(&self, secs: u8) -> u64 {
        let window_ticks =
            u64::from(secs) * 1000 / u64::from(self.config.control_loop_interval_ms).max(1);
        self.total_ticks + window_ticks.max(1)
    }

    /// Queue a security event for the sink. A full outbox drops the event
    /// with a warning; the state transition itself is never rolled back.
    pub fn push_event(&mut self, event: SecurityEvent) {
        if let Err(e) = self.outbox.push(event) {
            warn!("security event outbox full, dropping {:?}", e);
        }
    }
}
