//! System configuration parameters
//!
//! All tunable parameters for the HomeSentry node. Defaults mirror the
//! values burned into the original sketch; a provisioning adapter may
//! replace the whole struct at runtime via `AppCommand::UpdateConfig`.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// Number of digits in a PIN. Compile-time constant because it sizes the
/// entry buffer and every stored PIN.
pub const PIN_LENGTH: usize = 4;

/// Maximum number of provisioned users (fixed table, no runtime insert).
pub const MAX_USERS: usize = 8;

/// Maximum length of a user identifier.
pub const MAX_USER_ID_LEN: usize = 9;

/// One row of the authorized-user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    /// Unique identifier, reported in the "disarmed" event.
    pub id: String<MAX_USER_ID_LEN>,
    /// PIN digit sequence, each digit 0–9.
    pub pin: [u8; PIN_LENGTH],
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Intrusion detection ---
    /// Gyroscope magnitude (deg/s) at or above which motion counts as a
    /// possible intrusion.
    pub gyro_threshold_dps: f32,

    // --- Authentication ---
    /// Wrong full-length PIN entries allowed before lockout.
    pub max_failed_attempts: u8,
    /// Seconds the authentication window stays open after a motion trigger.
    pub auth_window_secs: u8,
    /// Authorized users. Read-only at runtime; re-provisioning replaces the
    /// whole config.
    pub users: Vec<UserEntry, MAX_USERS>,

    // --- Environmental sampling ---
    /// Interval between environmental page reads (milliseconds).
    pub env_sample_interval_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Aggregate telemetry report interval (seconds).
    pub telemetry_interval_secs: u32,

    // --- Node identity (consumed by the publishing adapter) ---
    /// Sensor/node name stamped on outbound messages.
    pub node_name: String<16>,
    /// House identifier grouping this node's topics.
    pub house_id: String<16>,
    /// Topic for environmental data.
    pub topic_data: String<48>,
    /// Topic for security events.
    pub topic_events: String<48>,
    /// Topic the node listens on for commands.
    pub topic_commands: String<48>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut users = Vec::new();
        // Table is well under MAX_USERS; pushes cannot fail.
        let _ = users.push(UserEntry {
            id: String::try_from("owner").unwrap_or_default(),
            pin: [7, 4, 1, 8],
        });
        let _ = users.push(UserEntry {
            id: String::try_from("owner_kid").unwrap_or_default(),
            pin: [0, 1, 2, 3],
        });

        Self {
            // Intrusion detection
            gyro_threshold_dps: 50.0,

            // Authentication
            max_failed_attempts: 3,
            auth_window_secs: 30,
            users,

            // Environmental sampling
            env_sample_interval_ms: 5000,

            // Timing
            control_loop_interval_ms: 100, // 10 Hz — keeps keypad entry responsive
            telemetry_interval_secs: 60,   // 1/min aggregate snapshot

            // Identity
            node_name: String::try_from("MKR1010_WiFi").unwrap_or_default(),
            house_id: String::try_from("house_1").unwrap_or_default(),
            topic_data: String::try_from("home/house_1/sensor/data").unwrap_or_default(),
            topic_events: String::try_from("home/house_1/security/events").unwrap_or_default(),
            topic_commands: String::try_from("home/house_1/commands").unwrap_or_default(),
        }
    }
}

impl SystemConfig {
    /// True if every provisioned PIN consists of valid digits (0–9).
    pub fn pins_valid(&self) -> bool {
        self.users.iter().all(|u| u.pin.iter().all(|&d| d <= 9))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.gyro_threshold_dps > 0.0);
        assert!(c.max_failed_attempts > 0);
        assert!(c.auth_window_secs > 0);
        assert!(!c.users.is_empty());
        assert!(c.env_sample_interval_ms > 0);
        assert!(c.control_loop_interval_ms > 0);
        assert!(c.pins_valid());
    }

    #[test]
    fn timing_ratios_make_sense() {
        let c = SystemConfig::default();
        assert!(
            c.control_loop_interval_ms < c.env_sample_interval_ms,
            "control loop must out-pace env sampling so auth timing never waits on a sensor read"
        );
        assert!(
            c.env_sample_interval_ms < c.telemetry_interval_secs * 1000,
            "env pages should cycle several times per telemetry report"
        );
    }

    #[test]
    fn default_table_has_known_kid_pin() {
        let c = SystemConfig::default();
        let kid = c.users.iter().find(|u| u.id.as_str() == "owner_kid");
        assert_eq!(kid.map(|u| u.pin), Some([0, 1, 2, 3]));
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert!((c.gyro_threshold_dps - c2.gyro_threshold_dps).abs() < 0.001);
        assert_eq!(c.max_failed_attempts, c2.max_failed_attempts);
        assert_eq!(c.users, c2.users);
        assert_eq!(c.topic_events, c2.topic_events);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = SystemConfig::default();
        let bytes = postcard::to_allocvec(&c).unwrap();
        let c2: SystemConfig = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(c.auth_window_secs, c2.auth_window_secs);
        assert_eq!(c.users.len(), c2.users.len());
        assert!((c.gyro_threshold_dps - c2.gyro_threshold_dps).abs() < 0.001);
    }

    #[test]
    fn invalid_pin_detected() {
        let mut c = SystemConfig::default();
        c.users[0].pin = [0, 1, 2, 14];
        assert!(!c.pins_valid());
    }
}
