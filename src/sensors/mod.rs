//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns the gyroscope and environmental drivers and satisfies
//! [`SensorPort`], so the same struct backs the simulation harness and (on
//! hardware) the driver-fed atomics.

pub mod environment;
pub mod motion;

use crate::app::ports::SensorPort;
use environment::{EnvPage, EnvSensor};
use motion::{GyroReading, MotionSensor};

/// Aggregates the sensor drivers behind the port boundary.
pub struct SensorHub {
    pub motion: MotionSensor,
    pub env: EnvSensor,
}

impl SensorHub {
    pub fn new(motion: MotionSensor, env: EnvSensor) -> Self {
        Self { motion, env }
    }
}

impl SensorPort for SensorHub {
    fn read_motion(&mut self) -> GyroReading {
        self.motion.read()
    }

    fn read_env(&mut self, page: EnvPage) -> f32 {
        self.env.read(page)
    }
}
