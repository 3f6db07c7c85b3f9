//! Environmental measurement pages and the periodic sampler.
//!
//! The node exposes three environmental quantities — temperature, humidity,
//! pressure — read one page at a time on a fixed cadence. The sampler owns
//! the cyclic page index and the pacing; it runs regardless of alarm state
//! and never blocks alarm processing (one cheap read per interval).
//!
//! ## Dual-target design
//!
//! On real hardware the env shield driver feeds the value atomics; on
//! host/test the `sim_set_env` injector writes them directly.

use core::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

static SIM_TEMP_C: AtomicU32 = AtomicU32::new(0);
static SIM_HUM_PCT: AtomicU32 = AtomicU32::new(0);
static SIM_PRESS_HPA: AtomicU32 = AtomicU32::new(0);

/// Inject environmental values for host-side tests and simulation.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_env(temp_c: f32, hum_pct: f32, press_hpa: f32) {
    SIM_TEMP_C.store(temp_c.to_bits(), Ordering::Relaxed);
    SIM_HUM_PCT.store(hum_pct.to_bits(), Ordering::Relaxed);
    SIM_PRESS_HPA.store(press_hpa.to_bits(), Ordering::Relaxed);
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Cyclic index over the environmental measurement pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum EnvPage {
    Temp = 0,
    Hum = 1,
    Pressure = 2,
}

impl EnvPage {
    pub const COUNT: usize = 3;

    /// The next page in the cycle (wraps after `Pressure`).
    pub fn next(self) -> Self {
        match self {
            Self::Temp => Self::Hum,
            Self::Hum => Self::Pressure,
            Self::Pressure => Self::Temp,
        }
    }
}

/// One emitted environmental reading. Emitted, never retained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvReading {
    pub page: EnvPage,
    pub value: f32,
    /// Node uptime in milliseconds at read time.
    pub millis: u64,
}

// ---------------------------------------------------------------------------
// Sensor driver
// ---------------------------------------------------------------------------

/// Environmental shield driver (temperature / humidity / pressure).
pub struct EnvSensor {
    total_reads: u32,
}

impl EnvSensor {
    pub fn new() -> Self {
        Self { total_reads: 0 }
    }

    /// Read the value for one page.
    pub fn read(&mut self, page: EnvPage) -> f32 {
        self.total_reads = self.total_reads.saturating_add(1);
        let bits = match page {
            EnvPage::Temp => SIM_TEMP_C.load(Ordering::Relaxed),
            EnvPage::Hum => SIM_HUM_PCT.load(Ordering::Relaxed),
            EnvPage::Pressure => SIM_PRESS_HPA.load(Ordering::Relaxed),
        };
        f32::from_bits(bits)
    }
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

/// Periodic page cycler.
///
/// Call [`tick`](Self::tick) once per control-loop iteration with the
/// elapsed milliseconds; it returns the page due for reading whenever a
/// full interval has accumulated. The remainder is preserved so the cadence
/// stays exact over long runs even when the interval is not a multiple of
/// the tick period.
pub struct EnvSampler {
    interval_ms: u32,
    elapsed_ms: u32,
    page: EnvPage,
}

impl EnvSampler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            page: EnvPage::Temp,
        }
    }

    /// Advance the sampler clock. Returns the page to read if an interval
    /// boundary was crossed, advancing the cycle for next time.
    pub fn tick(&mut self, delta_ms: u32) -> Option<EnvPage> {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        if self.elapsed_ms < self.interval_ms {
            return None;
        }
        self.elapsed_ms -= self.interval_ms;

        let due = self.page;
        self.page = self.page.next();
        Some(due)
    }

    /// The page the next fire will read.
    pub fn current_page(&self) -> EnvPage {
        self.page
    }
}
