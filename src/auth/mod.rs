//! Authentication subsystem — the user table and the countdown attempt.
//!
//! [`UserRegistry`] is pure lookup over the provisioned table.
//! [`AuthCountdown`] is the per-window attempt state owned by the FSM
//! context while the machine sits in `AuthCountdown`.

pub mod countdown;
pub mod registry;

pub use countdown::AuthCountdown;
pub use registry::{UserId, UserRegistry};
