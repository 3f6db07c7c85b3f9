//! Siren driver.
//!
//! A single digital output. Edge-triggered logging only, so a blinking
//! state handler re-asserting the same level stays quiet.

use log::info;

pub struct SirenDriver {
    on: bool,
}

impl SirenDriver {
    pub fn new() -> Self {
        Self { on: false }
    }

    pub fn set(&mut self, on: bool) {
        if on != self.on {
            info!("siren {}", if on { "ON" } else { "off" });
        }
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Default for SirenDriver {
    fn default() -> Self {
        Self::new()
    }
}
