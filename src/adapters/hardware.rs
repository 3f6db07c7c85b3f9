//! Hardware adapter — bridges peripherals to the domain port traits.
//!
//! Owns the [`SensorHub`] and the actuator drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`]. This is the only module in the
//! system that touches (real or simulated) peripherals.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::siren::SirenDriver;
use crate::drivers::status_led::StatusLed;
use crate::sensors::environment::EnvPage;
use crate::sensors::motion::GyroReading;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    siren: SirenDriver,
    led: StatusLed,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub, siren: SirenDriver, led: StatusLed) -> Self {
        Self {
            sensor_hub,
            siren,
            led,
        }
    }

    /// Siren line state, for diagnostics and the simulation harness.
    pub fn siren_on(&self) -> bool {
        self.siren.is_on()
    }

    /// Last commanded LED colour.
    pub fn led_colour(&self) -> (u8, u8, u8) {
        self.led.current_colour()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_motion(&mut self) -> GyroReading {
        self.sensor_hub.read_motion()
    }

    fn read_env(&mut self, page: EnvPage) -> f32 {
        self.sensor_hub.read_env(page)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_siren(&mut self, on: bool) {
        self.siren.set(on);
    }

    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.led.set_colour(r, g, b);
    }

    fn all_off(&mut self) {
        self.siren.set(false);
        self.led.off();
    }
}
