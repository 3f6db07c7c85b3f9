//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks) implement these
//! traits. The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware or the message bus
//! directly.
//!
//! ## Security notes
//!
//! - The intrusion decision (threshold compare) stays inside the domain —
//!   [`SensorPort`] delivers raw readings only, so a compromised adapter
//!   cannot silently raise the trigger threshold.
//! - PIN comparison happens inside the domain against the read-only
//!   registry; ports never see PIN material.

use crate::sensors::environment::EnvPage;
use crate::sensors::motion::GyroReading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Read the current 3-axis gyroscope sample.
    fn read_motion(&mut self) -> GyroReading;

    /// Read one environmental page (paced by the domain's sampler).
    fn read_env(&mut self, page: EnvPage) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command local outputs.
pub trait ActuatorPort {
    /// Drive the local siren.
    fn set_siren(&mut self, on: bool);

    /// Set the RGB status LED colour.
    fn set_led(&mut self, r: u8, g: u8, b: u8);

    /// Kill all outputs (siren, LED) — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / bus)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, the
/// security/data topics, a test recorder, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
