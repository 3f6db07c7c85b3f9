//! HomeSentry — host simulation entry point.
//!
//! Hexagonal wiring with event-driven execution:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │   HardwareAdapter           LogEventSink                   │
//! │   (Sensor+Actuator)         (EventSink → topic log)        │
//! │                                                            │
//! │   ─────────────── Port Trait Boundary ───────────────      │
//! │                                                            │
//! │   ┌────────────────────────────────────────────────────┐   │
//! │   │            AppService (pure logic)                 │   │
//! │   │  Alarm FSM · PIN auth · Motion · Env sampling      │   │
//! │   └────────────────────────────────────────────────────┘   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary drives a scripted intrusion scenario through the same event
//! queue the target firmware uses, then exits. Simulated time runs 10×
//! real time (each 100 ms control tick sleeps 10 ms).

#![deny(unused_must_use)]

use log::{info, warn};

use homesentry::adapters::hardware::HardwareAdapter;
use homesentry::adapters::log_sink::LogEventSink;
use homesentry::app::commands::AppCommand;
use homesentry::app::events::AppEvent;
use homesentry::app::ports::EventSink;
use homesentry::app::service::AppService;
use homesentry::config::SystemConfig;
use homesentry::drivers::siren::SirenDriver;
use homesentry::drivers::status_led::StatusLed;
use homesentry::events::{self, push_event, InputEvent};
use homesentry::sensors::environment::EnvSensor;
use homesentry::sensors::motion::MotionSensor;
use homesentry::sensors::{environment, motion, SensorHub};

/// Push the scripted stimulus for one control tick, if any.
///
/// The script walks the whole alarm lifecycle: a wrong PIN, a correct
/// disarm, re-arming, a lockout after three failures, an admin reset, and
/// finally a window that times out.
fn script(tick: u64) {
    match tick {
        // Phase 1: motion trips the armed system; intruder fumbles once,
        // then the owner's kid keys the right PIN.
        30 => motion::sim_set_gyro(40.0, 30.0, 10.0), // |g| = 51 dps
        32 => motion::sim_set_gyro(0.0, 0.0, 0.0),
        40 | 42 | 44 | 46 => {
            push_event(InputEvent::Digit(9));
        }
        50 => {
            push_event(InputEvent::Digit(0));
        }
        52 => {
            push_event(InputEvent::Digit(1));
        }
        54 => {
            push_event(InputEvent::Digit(2));
        }
        56 => {
            push_event(InputEvent::Digit(3));
        }

        // Phase 2: re-arm, then three wrong PINs (4567, 8901, 2345) trip
        // the alarm.
        80 => {
            push_event(InputEvent::Arm);
        }
        90 => {
            push_event(InputEvent::MotionWake(80));
        }
        100..=111 => {
            push_event(InputEvent::Digit(((tick + 4) % 10) as u8));
        }

        // Phase 3: admin clears the alarm and re-arms.
        140 => {
            push_event(InputEvent::ResetIntruder);
        }
        150 => {
            push_event(InputEvent::Arm);
        }

        // Phase 4: motion again, nobody keys a PIN, window times out.
        160 => {
            push_event(InputEvent::MotionWake(120));
        }

        _ => {}
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("HomeSentry sim v{}", env!("CARGO_PKG_VERSION"));

    // Short auth window so the timeout phase fits the scripted run.
    let config = SystemConfig {
        auth_window_secs: 3,
        telemetry_interval_secs: 5,
        ..SystemConfig::default()
    };

    // Calm environmental baseline.
    environment::sim_set_env(21.5, 44.0, 1012.8);
    motion::sim_set_gyro(0.0, 0.0, 0.0);

    let sensor_hub = SensorHub::new(MotionSensor::new(), EnvSensor::new());
    let mut hw = HardwareAdapter::new(sensor_hub, SirenDriver::new(), StatusLed::new());
    let mut sink = LogEventSink::new(&config);

    let mut app = AppService::new(config.clone());
    app.start(&mut sink);

    let total_ticks: u64 = 220;
    for tick in 1..=total_ticks {
        std::thread::sleep(std::time::Duration::from_millis(
            u64::from(config.control_loop_interval_ms) / 10,
        ));

        script(tick);
        if !push_event(InputEvent::ControlTick) {
            warn!("event queue full — control tick dropped");
        }

        events::drain_events(|event| match event {
            InputEvent::ControlTick => {
                app.tick(&mut hw, &mut sink);
            }
            InputEvent::TelemetryTick => {
                // On-demand aggregate report (the periodic one is paced
                // inside the service).
                let t = app.build_telemetry();
                sink.emit(&AppEvent::Telemetry(t));
            }
            InputEvent::MotionWake(dps) => {
                let magnitude = f32::from(dps);
                if let Err(e) =
                    app.handle_command(AppCommand::MotionSample(magnitude), &mut hw, &mut sink)
                {
                    warn!("motion sample rejected: {}", e);
                }
            }
            InputEvent::Arm => {
                if let Err(e) = app.handle_command(AppCommand::Arm, &mut hw, &mut sink) {
                    warn!("arm rejected: {}", e);
                }
            }
            InputEvent::ResetIntruder => {
                if let Err(e) = app.handle_command(AppCommand::ResetIntruder, &mut hw, &mut sink) {
                    warn!("reset rejected: {}", e);
                }
            }
            InputEvent::Digit(d) => {
                if let Err(e) = app.handle_command(AppCommand::Digit(d), &mut hw, &mut sink) {
                    warn!("digit rejected: {}", e);
                }
            }
        });
    }

    info!(
        "Scenario complete after {} ticks — final state {:?}, siren {}",
        total_ticks,
        app.state(),
        if hw.siren_on() { "ON" } else { "off" }
    );
}
