//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the FSM, user registry, motion monitor, and env
//! sampler. It exposes a clean, hardware-agnostic API. All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                 │         AppService          │
//! ActuatorPort ◀──│  FSM · Registry · Monitor   │
//!                 └────────────────────────────┘
//! ```
//!
//! Within one tick, timer-expiry checks run inside `fsm.tick()` before any
//! newly arrived digit or motion command is applied (commands are handled
//! between ticks), so a stale countdown can never accept a late digit.

use log::{info, warn};

use crate::auth::UserRegistry;
use crate::config::SystemConfig;
use crate::error::{InputError, Result};
use crate::fsm::context::{FsmContext, SensorSnapshot};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::sensors::environment::{EnvPage, EnvReading, EnvSampler};
use crate::sensors::motion::MotionMonitor;

use super::commands::AppCommand;
use super::events::{AppEvent, SecurityEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    /// Read-only user table, built once from config.
    registry: UserRegistry,
    /// Intrusion threshold decision.
    monitor: MotionMonitor,
    /// Environmental page pacing — independent of alarm state.
    env_sampler: EnvSampler,
    /// Last-known value per env page, for the aggregate snapshot.
    last_env: [f32; EnvPage::COUNT],
    /// Milliseconds accumulated towards the next aggregate report.
    telemetry_elapsed_ms: u32,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) or
    /// [`start_from`](Self::start_from) next.
    pub fn new(config: SystemConfig) -> Self {
        if !config.pins_valid() {
            warn!("config contains malformed PINs; affected users cannot disarm");
        }
        let registry = UserRegistry::from_config(&config);
        if registry.is_empty() {
            warn!("no valid users provisioned — disarm by PIN is impossible");
        }
        let monitor = MotionMonitor::new(config.gyro_threshold_dps);
        let env_sampler = EnvSampler::new(config.env_sample_interval_ms);
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Armed);

        Self {
            fsm,
            ctx,
            registry,
            monitor,
            env_sampler,
            last_env: [0.0; EnvPage::COUNT],
            telemetry_elapsed_ms: 0,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its default initial state (Armed).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    /// Start the FSM and immediately jump to `state` (testing / recovery).
    pub fn start_from(&mut self, state: StateId, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.fsm.force_transition(state, &mut self.ctx);
        self.ctx.outbox.clear(); // forced entry is not a lifecycle edge
        sink.emit(&AppEvent::Started(state));
        info!("AppService started from {:?}", state);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: read motion → FSM → env sampling →
    /// telemetry → actuators → event drain.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();

        // 1. Motion input via SensorPort, threshold decision in the domain
        let gyro = hw.read_motion();
        self.ctx.sensors = SensorSnapshot {
            gyro_x_dps: gyro.x_dps,
            gyro_y_dps: gyro.y_dps,
            gyro_z_dps: gyro.z_dps,
            gyro_magnitude_dps: gyro.magnitude_dps,
            motion_triggered: self.monitor.evaluate(gyro.magnitude_dps),
        };

        // 2. FSM tick (timer expiry evaluated in-state, before new input)
        self.fsm.tick(&mut self.ctx);

        // 3. Environmental sampling on its own cadence — paced so it costs
        //    one sensor read per interval and never holds up auth timing.
        let interval_ms = self.ctx.config.control_loop_interval_ms;
        if let Some(page) = self.env_sampler.tick(interval_ms) {
            let value = hw.read_env(page);
            self.last_env[page as usize] = value;
            sink.emit(&AppEvent::EnvSample(EnvReading {
                page,
                value,
                millis: self.ctx.now_ms(),
            }));
        }

        // 4. Aggregate telemetry report
        self.telemetry_elapsed_ms = self.telemetry_elapsed_ms.saturating_add(interval_ms);
        if self.telemetry_elapsed_ms >= self.ctx.config.telemetry_interval_secs * 1000 {
            self.telemetry_elapsed_ms = 0;
            let t = self.build_telemetry();
            sink.emit(&AppEvent::Telemetry(t));
        }

        // 5. Apply outputs, flush events, report any state edge
        self.finalize_io(prev_state, hw, sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (keypad, bus, simulation script).
    ///
    /// Errors are local rejections (bad digit, digit outside a window);
    /// the machine is never left in an inconsistent state by a rejected
    /// command.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let prev_state = self.fsm.current_state();

        let result = match cmd {
            AppCommand::Digit(d) => self.handle_digit(d),
            AppCommand::MotionSample(mag) => self.handle_motion_sample(mag),

            AppCommand::Arm => {
                if self.fsm.current_state() == StateId::Normal {
                    self.ctx.failed_attempts = 0; // fresh arming cycle
                    self.ctx.push_event(SecurityEvent::Armed);
                    self.fsm.force_transition(StateId::Armed, &mut self.ctx);
                } else {
                    warn!("arm ignored in {:?}", self.fsm.current_state());
                }
                Ok(())
            }

            AppCommand::ResetIntruder => {
                if self.fsm.current_state() == StateId::Intruder {
                    self.ctx.failed_attempts = 0;
                    self.ctx.push_event(SecurityEvent::IntruderCleared);
                    self.fsm.force_transition(StateId::Normal, &mut self.ctx);
                } else {
                    warn!("intruder reset ignored in {:?}", self.fsm.current_state());
                }
                Ok(())
            }

            AppCommand::ForceState(target) => {
                self.fsm.force_transition(target, &mut self.ctx);
                Ok(())
            }

            AppCommand::UpdateConfig(new_config) => {
                self.registry = UserRegistry::from_config(&new_config);
                self.monitor = MotionMonitor::new(new_config.gyro_threshold_dps);
                self.env_sampler = EnvSampler::new(new_config.env_sample_interval_ms);
                self.ctx.tick_period_secs = new_config.control_loop_interval_ms as f32 / 1000.0;
                self.ctx.config = new_config;
                info!("Configuration updated at runtime");
                Ok(())
            }
        };

        self.finalize_io(prev_state, hw, sink);
        result
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build an aggregate telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            state: self.fsm.current_state(),
            temperature_c: self.last_env[EnvPage::Temp as usize],
            humidity_pct: self.last_env[EnvPage::Hum as usize],
            pressure_hpa: self.last_env[EnvPage::Pressure as usize],
            siren_on: self.ctx.commands.siren_on,
            failed_attempts: self.failed_attempts(),
            millis: self.ctx.now_ms(),
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Wrong full-PIN submissions in the current arming cycle.
    pub fn failed_attempts(&self) -> u8 {
        self.ctx
            .auth
            .as_ref()
            .map_or(self.ctx.failed_attempts, crate::auth::AuthCountdown::failed_attempts)
    }

    /// Clone of the live configuration (for read-back or delta updates).
    pub fn current_config(&self) -> SystemConfig {
        self.ctx.config.clone()
    }

    // ── Internal ──────────────────────────────────────────────

    /// One keypad digit. Only meaningful while a window is open; the
    /// deadline is re-checked first so a digit arriving after expiry can
    /// never complete a disarm.
    fn handle_digit(&mut self, digit: u8) -> Result<()> {
        if self.fsm.current_state() != StateId::AuthCountdown {
            return Err(InputError::DigitNotAccepted.into());
        }

        let now = self.ctx.total_ticks;
        if self.ctx.auth.as_ref().is_some_and(|a| a.is_elapsed(now)) {
            // The window died between ticks; trip the alarm and reject the
            // digit that tried to sneak in.
            warn!("digit arrived after window expiry — tripping alarm");
            self.ctx.push_event(SecurityEvent::AuthTimeout);
            self.fsm.force_transition(StateId::Intruder, &mut self.ctx);
            return Err(InputError::DigitNotAccepted.into());
        }

        let full = {
            let Some(auth) = self.ctx.auth.as_mut() else {
                return Err(InputError::DigitNotAccepted.into());
            };
            auth.submit_digit(digit)?;
            auth.is_full()
        };
        if !full {
            return Ok(());
        }

        let matched = match self.ctx.auth.as_ref() {
            Some(auth) => self.registry.find_by_pin(auth.digits()),
            None => None,
        };

        if let Some(user) = matched {
            info!("disarmed by '{}'", user);
            self.ctx.push_event(SecurityEvent::Disarmed { user });
            self.fsm.force_transition(StateId::Normal, &mut self.ctx);
            self.ctx.failed_attempts = 0; // successful disarm ends the cycle
            return Ok(());
        }

        // Registry miss: a complete wrong PIN. Not an input error — it
        // drives the failed-attempt path.
        let attempts = match self.ctx.auth.as_mut() {
            Some(auth) => {
                let n = auth.record_failure();
                auth.clear_digits();
                n
            }
            None => return Ok(()),
        };
        warn!(
            "wrong PIN ({}/{} attempts)",
            attempts, self.ctx.config.max_failed_attempts
        );
        self.ctx.push_event(SecurityEvent::AuthFailed { attempts });

        if attempts >= self.ctx.config.max_failed_attempts {
            self.ctx.push_event(SecurityEvent::IntruderLockedOut);
            self.fsm.force_transition(StateId::Intruder, &mut self.ctx);
        }
        Ok(())
    }

    /// A bus-forwarded motion sample, evaluated exactly like a local gyro
    /// read. Only `Armed` reacts, so re-triggering an open window is a
    /// no-op.
    fn handle_motion_sample(&mut self, magnitude_dps: f32) -> Result<()> {
        self.ctx.sensors.gyro_magnitude_dps = magnitude_dps;
        self.ctx.sensors.motion_triggered = self.monitor.evaluate(magnitude_dps);

        if self.fsm.current_state() == StateId::Armed && self.ctx.sensors.motion_triggered {
            self.fsm
                .force_transition(StateId::AuthCountdown, &mut self.ctx);
        }
        Ok(())
    }

    /// Translate FSM actuator commands into port calls, flush the security
    /// outbox, and report a state edge if the machine moved.
    fn finalize_io(
        &mut self,
        prev_state: StateId,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let (r, g, b) = self.ctx.commands.led_rgb;
        hw.set_siren(self.ctx.commands.siren_on);
        hw.set_led(r, g, b);

        if !self.ctx.outbox.is_empty() {
            let millis = self.ctx.now_ms();
            for event in &self.ctx.outbox {
                sink.emit(&AppEvent::Security {
                    event: event.clone(),
                    millis,
                });
            }
            self.ctx.outbox.clear();
        }

        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
    }
}
