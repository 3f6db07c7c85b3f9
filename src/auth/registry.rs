//! Authorized-user registry.
//!
//! A fixed table built once from [`SystemConfig`] at startup and never
//! mutated afterwards. Lookup is a linear scan — the table holds at most
//! [`MAX_USERS`] entries, so anything cleverer would be noise.

use heapless::Vec;

use crate::config::{MAX_USERS, MAX_USER_ID_LEN, PIN_LENGTH, SystemConfig, UserEntry};

/// User identifier as reported in security events.
pub type UserId = heapless::String<MAX_USER_ID_LEN>;

/// Read-only table of authorized users.
pub struct UserRegistry {
    users: Vec<UserEntry, MAX_USERS>,
}

impl UserRegistry {
    /// Build the registry from configuration. Entries with malformed PINs
    /// (digits outside 0–9) are skipped so they can never match.
    pub fn from_config(config: &SystemConfig) -> Self {
        let mut users = Vec::new();
        for entry in &config.users {
            if entry.pin.iter().all(|&d| d <= 9) {
                // Capacity matches the config table; push cannot fail.
                let _ = users.push(entry.clone());
            } else {
                log::warn!("registry: skipping user '{}' with malformed PIN", entry.id);
            }
        }
        Self { users }
    }

    /// Exact full-length PIN match.
    ///
    /// Returns the **first** matching user in registry order — duplicate
    /// PINs are not rejected, so first-match keeps the result
    /// deterministic. Anything shorter than a full PIN never matches.
    pub fn find_by_pin(&self, buffer: &[u8]) -> Option<UserId> {
        if buffer.len() != PIN_LENGTH {
            return None;
        }
        self.users
            .iter()
            .find(|u| u.pin[..] == *buffer)
            .map(|u| u.id.clone())
    }

    /// Whether a user id exists in the table.
    pub fn contains(&self, user_id: &str) -> bool {
        self.users.iter().any(|u| u.id.as_str() == user_id)
    }

    /// Number of provisioned users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True if no users are provisioned (disarm is then impossible).
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
