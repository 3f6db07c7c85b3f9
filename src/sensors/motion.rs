//! Gyroscope-based motion sensing.
//!
//! [`MotionSensor`] reads 3-axis angular rate and reduces it to a scalar
//! magnitude. [`MotionMonitor`] is the intrusion decision: magnitude at or
//! above the configured threshold.
//!
//! ## Dual-target design
//!
//! On real hardware the IMU driver feeds the axis atomics from its read
//! task; on host/test the `sim_set_gyro` injector writes them directly.

use core::sync::atomic::{AtomicU32, Ordering};

static SIM_GYRO_X: AtomicU32 = AtomicU32::new(0);
static SIM_GYRO_Y: AtomicU32 = AtomicU32::new(0);
static SIM_GYRO_Z: AtomicU32 = AtomicU32::new(0);

/// Inject a raw 3-axis rate (deg/s) for host-side tests and simulation.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gyro(x_dps: f32, y_dps: f32, z_dps: f32) {
    SIM_GYRO_X.store(x_dps.to_bits(), Ordering::Relaxed);
    SIM_GYRO_Y.store(y_dps.to_bits(), Ordering::Relaxed);
    SIM_GYRO_Z.store(z_dps.to_bits(), Ordering::Relaxed);
}

/// One gyroscope sample. Ephemeral — evaluated per reading, never stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct GyroReading {
    pub x_dps: f32,
    pub y_dps: f32,
    pub z_dps: f32,
    /// Euclidean magnitude of the three axes.
    pub magnitude_dps: f32,
}

/// 3-axis gyroscope driver.
pub struct MotionSensor {
    total_reads: u32,
}

impl MotionSensor {
    pub fn new() -> Self {
        Self { total_reads: 0 }
    }

    /// Read the current angular rates and derive the magnitude.
    pub fn read(&mut self) -> GyroReading {
        self.total_reads = self.total_reads.saturating_add(1);

        let x = f32::from_bits(SIM_GYRO_X.load(Ordering::Relaxed));
        let y = f32::from_bits(SIM_GYRO_Y.load(Ordering::Relaxed));
        let z = f32::from_bits(SIM_GYRO_Z.load(Ordering::Relaxed));

        GyroReading {
            x_dps: x,
            y_dps: y,
            z_dps: z,
            magnitude_dps: (x * x + y * y + z * z).sqrt(),
        }
    }

    /// Samples taken since construction.
    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }
}

/// Intrusion decision over a motion magnitude.
///
/// A single sample at or above the threshold trips the trigger — there is
/// no dwell time or hysteresis in the node's intrusion behavior.
#[derive(Debug, Clone, Copy)]
pub struct MotionMonitor {
    threshold_dps: f32,
}

impl MotionMonitor {
    pub fn new(threshold_dps: f32) -> Self {
        Self { threshold_dps }
    }

    /// True iff the sample magnitude reaches the threshold.
    pub fn evaluate(&self, magnitude_dps: f32) -> bool {
        magnitude_dps >= self.threshold_dps
    }

    pub fn threshold_dps(&self) -> f32 {
        self.threshold_dps
    }
}
