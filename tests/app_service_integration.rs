//! End-to-end integration tests for the application service.
//!
//! Drives [`AppService`] through mock port implementations — no hardware,
//! no global injection state — and asserts on the full externally visible
//! behaviour: state transitions, security events, actuator commands, and
//! telemetry.

use homesentry::app::commands::AppCommand;
use homesentry::app::events::{AppEvent, SecurityEvent};
use homesentry::app::ports::{ActuatorPort, EventSink, SensorPort};
use homesentry::app::service::AppService;
use homesentry::config::SystemConfig;
use homesentry::error::{Error, InputError};
use homesentry::fsm::StateId;
use homesentry::sensors::environment::EnvPage;
use homesentry::sensors::motion::GyroReading;

// ── Mock ports ────────────────────────────────────────────────

/// Combined sensor + actuator mock. Sensor values are plain fields the
/// test mutates between ticks; actuator calls are recorded.
struct MockHw {
    gyro_magnitude: f32,
    env: [f32; EnvPage::COUNT],
    siren: bool,
    led: (u8, u8, u8),
    env_reads: Vec<EnvPage>,
}

impl MockHw {
    fn new() -> Self {
        Self {
            gyro_magnitude: 0.0,
            env: [21.0, 45.0, 1013.0],
            siren: false,
            led: (0, 0, 0),
            env_reads: Vec::new(),
        }
    }
}

impl SensorPort for MockHw {
    fn read_motion(&mut self) -> GyroReading {
        GyroReading {
            x_dps: self.gyro_magnitude,
            y_dps: 0.0,
            z_dps: 0.0,
            magnitude_dps: self.gyro_magnitude,
        }
    }

    fn read_env(&mut self, page: EnvPage) -> f32 {
        self.env_reads.push(page);
        self.env[page as usize]
    }
}

impl ActuatorPort for MockHw {
    fn set_siren(&mut self, on: bool) {
        self.siren = on;
    }

    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.led = (r, g, b);
    }

    fn all_off(&mut self) {
        self.siren = false;
        self.led = (0, 0, 0);
    }
}

/// Event sink that records everything it is given.
struct RecordingSink {
    events: Vec<AppEvent>,
}

impl RecordingSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }

    fn security_events(&self) -> Vec<SecurityEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Security { event, .. } => Some(event.clone()),
                _ => None,
            })
            .collect()
    }

    fn env_pages(&self) -> Vec<EnvPage> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::EnvSample(r) => Some(r.page),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Helpers ───────────────────────────────────────────────────

fn started_service() -> (AppService, MockHw, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default());
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, MockHw::new(), sink)
}

/// Ticks covering one full default auth window (30 s at 100 ms).
const WINDOW_TICKS: usize = 300;

fn trip_motion(app: &mut AppService, hw: &mut MockHw, sink: &mut RecordingSink) {
    hw.gyro_magnitude = 60.0;
    app.tick(hw, sink);
    hw.gyro_magnitude = 0.0;
    assert_eq!(app.state(), StateId::AuthCountdown);
}

fn enter_pin(app: &mut AppService, hw: &mut MockHw, sink: &mut RecordingSink, pin: [u8; 4]) {
    for d in pin {
        app.handle_command(AppCommand::Digit(d), hw, sink)
            .expect("digit inside an open window must be accepted");
    }
}

// ── Startup and idle behaviour ────────────────────────────────

#[test]
fn starts_armed_and_emits_started() {
    let (app, _hw, sink) = started_service();
    assert_eq!(app.state(), StateId::Armed);
    assert!(matches!(sink.events[0], AppEvent::Started(StateId::Armed)));
}

#[test]
fn quiet_ticks_stay_armed_siren_off() {
    let (mut app, mut hw, mut sink) = started_service();
    for _ in 0..50 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(app.state(), StateId::Armed);
    assert!(!hw.siren);
    assert!(sink.security_events().is_empty());
}

#[test]
fn digit_while_armed_is_rejected() {
    let (mut app, mut hw, mut sink) = started_service();
    let err = app
        .handle_command(AppCommand::Digit(5), &mut hw, &mut sink)
        .unwrap_err();
    assert_eq!(err, Error::Input(InputError::DigitNotAccepted));
    assert_eq!(app.state(), StateId::Armed);
    assert_eq!(app.failed_attempts(), 0);
}

// ── Motion trigger ────────────────────────────────────────────

#[test]
fn motion_at_threshold_opens_window_once() {
    let (mut app, mut hw, mut sink) = started_service();

    hw.gyro_magnitude = 50.0; // threshold is inclusive
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), StateId::AuthCountdown);
    assert_eq!(
        sink.security_events(),
        vec![SecurityEvent::AuthWindowOpened]
    );

    // Continued motion must not re-announce the window.
    for _ in 0..10 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(
        sink.security_events(),
        vec![SecurityEvent::AuthWindowOpened]
    );
}

#[test]
fn motion_below_threshold_ignored() {
    let (mut app, mut hw, mut sink) = started_service();
    hw.gyro_magnitude = 49.9;
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Armed);
}

#[test]
fn bus_motion_sample_triggers_only_when_armed() {
    let (mut app, mut hw, mut sink) = started_service();

    app.handle_command(AppCommand::MotionSample(80.0), &mut hw, &mut sink)
        .unwrap();
    assert_eq!(app.state(), StateId::AuthCountdown);

    // Already in a window: another sample is a no-op.
    app.handle_command(AppCommand::MotionSample(120.0), &mut hw, &mut sink)
        .unwrap();
    assert_eq!(app.state(), StateId::AuthCountdown);
    assert_eq!(
        sink.security_events(),
        vec![SecurityEvent::AuthWindowOpened]
    );
}

// ── Disarm paths ──────────────────────────────────────────────

#[test]
fn correct_pin_disarms_and_names_the_user() {
    let (mut app, mut hw, mut sink) = started_service();
    trip_motion(&mut app, &mut hw, &mut sink);

    enter_pin(&mut app, &mut hw, &mut sink, [0, 1, 2, 3]);

    assert_eq!(app.state(), StateId::Normal);
    assert!(!hw.siren);
    let events = sink.security_events();
    assert!(events.iter().any(|e| matches!(
        e,
        SecurityEvent::Disarmed { user } if user.as_str() == "owner_kid"
    )));
    assert_eq!(app.failed_attempts(), 0);
}

#[test]
fn wrong_then_correct_pin_disarms() {
    let (mut app, mut hw, mut sink) = started_service();
    trip_motion(&mut app, &mut hw, &mut sink);

    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    assert_eq!(app.state(), StateId::AuthCountdown);
    assert_eq!(app.failed_attempts(), 1);

    enter_pin(&mut app, &mut hw, &mut sink, [7, 4, 1, 8]);
    assert_eq!(app.state(), StateId::Normal);

    let events = sink.security_events();
    assert!(events.contains(&SecurityEvent::AuthFailed { attempts: 1 }));
    assert!(events.iter().any(|e| matches!(
        e,
        SecurityEvent::Disarmed { user } if user.as_str() == "owner"
    )));
}

#[test]
fn pin_prefix_of_valid_pin_does_not_disarm() {
    let (mut app, mut hw, mut sink) = started_service();
    trip_motion(&mut app, &mut hw, &mut sink);

    // 0-1-2 entered, nothing happens until the 4th digit lands.
    for d in [0, 1, 2] {
        app.handle_command(AppCommand::Digit(d), &mut hw, &mut sink)
            .unwrap();
    }
    assert_eq!(app.state(), StateId::AuthCountdown);

    // Wrong final digit: full PIN 0-1-2-9 is one failed attempt.
    app.handle_command(AppCommand::Digit(9), &mut hw, &mut sink)
        .unwrap();
    assert_eq!(app.state(), StateId::AuthCountdown);
    assert_eq!(app.failed_attempts(), 1);
}

#[test]
fn invalid_digit_leaves_buffer_and_attempts_untouched() {
    let (mut app, mut hw, mut sink) = started_service();
    trip_motion(&mut app, &mut hw, &mut sink);

    app.handle_command(AppCommand::Digit(0), &mut hw, &mut sink)
        .unwrap();
    let err = app
        .handle_command(AppCommand::Digit(14), &mut hw, &mut sink)
        .unwrap_err();
    assert_eq!(err, Error::Input(InputError::InvalidDigit(14)));
    assert_eq!(app.failed_attempts(), 0);

    // The valid prefix is still in place — completing it disarms.
    for d in [1, 2, 3] {
        app.handle_command(AppCommand::Digit(d), &mut hw, &mut sink)
            .unwrap();
    }
    assert_eq!(app.state(), StateId::Normal);
}

// ── Lockout and timeout ───────────────────────────────────────

#[test]
fn three_wrong_pins_trip_the_alarm() {
    let (mut app, mut hw, mut sink) = started_service();
    trip_motion(&mut app, &mut hw, &mut sink);

    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    enter_pin(&mut app, &mut hw, &mut sink, [8, 8, 8, 8]);
    assert_eq!(
        app.state(),
        StateId::AuthCountdown,
        "two failures must not lock out yet"
    );

    enter_pin(&mut app, &mut hw, &mut sink, [7, 7, 7, 7]);
    assert_eq!(app.state(), StateId::Intruder);
    assert!(hw.siren);

    let events = sink.security_events();
    assert!(events.contains(&SecurityEvent::AuthFailed { attempts: 1 }));
    assert!(events.contains(&SecurityEvent::AuthFailed { attempts: 2 }));
    assert!(events.contains(&SecurityEvent::AuthFailed { attempts: 3 }));
    assert!(events.contains(&SecurityEvent::IntruderLockedOut));
}

#[test]
fn window_timeout_trips_the_alarm() {
    let (mut app, mut hw, mut sink) = started_service();
    trip_motion(&mut app, &mut hw, &mut sink);

    for _ in 0..WINDOW_TICKS {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(app.state(), StateId::Intruder);
    assert!(hw.siren);
    assert!(sink
        .security_events()
        .contains(&SecurityEvent::AuthTimeout));
}

#[test]
fn partial_pin_lost_on_timeout() {
    let (mut app, mut hw, mut sink) = started_service();
    trip_motion(&mut app, &mut hw, &mut sink);

    // Two digits of the right PIN, then the clock runs out.
    app.handle_command(AppCommand::Digit(0), &mut hw, &mut sink)
        .unwrap();
    app.handle_command(AppCommand::Digit(1), &mut hw, &mut sink)
        .unwrap();
    for _ in 0..WINDOW_TICKS {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(app.state(), StateId::Intruder);
}

#[test]
fn digits_in_intruder_are_rejected() {
    let (mut app, mut hw, mut sink) = started_service();
    trip_motion(&mut app, &mut hw, &mut sink);
    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    assert_eq!(app.state(), StateId::Intruder);

    let err = app
        .handle_command(AppCommand::Digit(0), &mut hw, &mut sink)
        .unwrap_err();
    assert_eq!(err, Error::Input(InputError::DigitNotAccepted));
    assert_eq!(app.state(), StateId::Intruder);
}

// ── Arm / reset lifecycle ─────────────────────────────────────

#[test]
fn reset_clears_intruder_then_rearm_starts_fresh() {
    let (mut app, mut hw, mut sink) = started_service();
    trip_motion(&mut app, &mut hw, &mut sink);
    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    assert_eq!(app.state(), StateId::Intruder);

    app.handle_command(AppCommand::ResetIntruder, &mut hw, &mut sink)
        .unwrap();
    assert_eq!(app.state(), StateId::Normal);
    assert!(!hw.siren);
    assert!(sink
        .security_events()
        .contains(&SecurityEvent::IntruderCleared));

    app.handle_command(AppCommand::Arm, &mut hw, &mut sink)
        .unwrap();
    assert_eq!(app.state(), StateId::Armed);

    // The counter was reset: a single wrong PIN reports attempt 1.
    trip_motion(&mut app, &mut hw, &mut sink);
    enter_pin(&mut app, &mut hw, &mut sink, [5, 5, 5, 5]);
    assert_eq!(app.failed_attempts(), 1);
    assert_eq!(app.state(), StateId::AuthCountdown);
}

#[test]
fn failed_attempts_reset_on_successful_disarm() {
    let (mut app, mut hw, mut sink) = started_service();
    trip_motion(&mut app, &mut hw, &mut sink);
    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    enter_pin(&mut app, &mut hw, &mut sink, [8, 8, 8, 8]);
    enter_pin(&mut app, &mut hw, &mut sink, [0, 1, 2, 3]);
    assert_eq!(app.state(), StateId::Normal);
    assert_eq!(app.failed_attempts(), 0);

    // Next cycle counts from scratch.
    app.handle_command(AppCommand::Arm, &mut hw, &mut sink)
        .unwrap();
    trip_motion(&mut app, &mut hw, &mut sink);
    enter_pin(&mut app, &mut hw, &mut sink, [6, 6, 6, 6]);
    assert_eq!(app.failed_attempts(), 1);
}

#[test]
fn arm_only_works_from_normal() {
    let (mut app, mut hw, mut sink) = started_service();

    // Armed already — ignored.
    app.handle_command(AppCommand::Arm, &mut hw, &mut sink)
        .unwrap();
    assert_eq!(app.state(), StateId::Armed);

    // From an open window — ignored, window stays.
    trip_motion(&mut app, &mut hw, &mut sink);
    app.handle_command(AppCommand::Arm, &mut hw, &mut sink)
        .unwrap();
    assert_eq!(app.state(), StateId::AuthCountdown);
}

#[test]
fn reset_only_works_from_intruder() {
    let (mut app, mut hw, mut sink) = started_service();
    app.handle_command(AppCommand::ResetIntruder, &mut hw, &mut sink)
        .unwrap();
    assert_eq!(app.state(), StateId::Armed);
}

// ── Environmental sampling ────────────────────────────────────

#[test]
fn env_pages_cycle_on_schedule() {
    let (mut app, mut hw, mut sink) = started_service();

    // Three full 5 s intervals at 100 ms per tick.
    for _ in 0..150 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(
        sink.env_pages(),
        vec![EnvPage::Temp, EnvPage::Hum, EnvPage::Pressure]
    );
    assert_eq!(hw.env_reads.len(), 3, "one sensor read per interval");
}

#[test]
fn env_sampling_continues_during_intrusion() {
    let (mut app, mut hw, mut sink) = started_service();
    trip_motion(&mut app, &mut hw, &mut sink);
    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    enter_pin(&mut app, &mut hw, &mut sink, [9, 9, 9, 9]);
    assert_eq!(app.state(), StateId::Intruder);

    for _ in 0..150 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(sink.env_pages().len(), 3, "alarm state must not gate sampling");
}

#[test]
fn env_samples_carry_injected_values_and_uptime() {
    let (mut app, mut hw, mut sink) = started_service();
    hw.env = [23.5, 51.0, 1009.4];

    for _ in 0..50 {
        app.tick(&mut hw, &mut sink);
    }
    let sample = sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::EnvSample(r) => Some(*r),
            _ => None,
        })
        .expect("first interval must emit a sample");
    assert_eq!(sample.page, EnvPage::Temp);
    assert!((sample.value - 23.5).abs() < 1e-5);
    assert_eq!(sample.millis, 5000);
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn periodic_telemetry_aggregates_last_known_values() {
    let mut config = SystemConfig::default();
    config.telemetry_interval_secs = 6; // one report after the env cycle
    let mut app = AppService::new(config);
    let mut sink = RecordingSink::new();
    let mut hw = MockHw::new();
    hw.env = [19.0, 62.0, 990.0];
    app.start(&mut sink);

    for _ in 0..60 {
        app.tick(&mut hw, &mut sink);
    }
    let t = sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::Telemetry(t) => Some(t.clone()),
            _ => None,
        })
        .expect("telemetry must fire after its interval");
    assert_eq!(t.state, StateId::Armed);
    assert!((t.temperature_c - 19.0).abs() < 1e-5);
    assert!(!t.siren_on);
    assert_eq!(t.failed_attempts, 0);
}

// ── Runtime reconfiguration ───────────────────────────────────

#[test]
fn update_config_changes_threshold_and_users() {
    let (mut app, mut hw, mut sink) = started_service();

    let mut config = SystemConfig::default();
    config.gyro_threshold_dps = 100.0;
    config.users[0].pin = [2, 0, 2, 6];
    app.handle_command(AppCommand::UpdateConfig(config), &mut hw, &mut sink)
        .unwrap();

    // Old threshold no longer trips.
    hw.gyro_magnitude = 60.0;
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Armed);

    hw.gyro_magnitude = 100.0;
    app.tick(&mut hw, &mut sink);
    hw.gyro_magnitude = 0.0;
    assert_eq!(app.state(), StateId::AuthCountdown);

    // New owner PIN disarms.
    enter_pin(&mut app, &mut hw, &mut sink, [2, 0, 2, 6]);
    assert_eq!(app.state(), StateId::Normal);
}
