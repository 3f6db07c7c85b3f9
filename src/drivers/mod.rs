//! Actuator drivers.
//!
//! Each driver tracks its commanded state in-memory and logs edges. On the
//! target board these map to GPIO / PWM writes; the host build keeps the
//! same API so the adapter layer is identical in both worlds.

pub mod siren;
pub mod status_led;
