//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger, tagged with the topic a bus publisher would use. Security
//! and telemetry payloads are rendered as JSON so the log doubles as a
//! wire-format preview; a future MQTT adapter implements the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::config::SystemConfig;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink {
    topic_data: String,
    topic_events: String,
}

impl LogEventSink {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            topic_data: config.topic_data.as_str().to_owned(),
            topic_events: config.topic_events.as_str().to_owned(),
        }
    }

    fn publish(&self, topic: &str, payload: &impl serde::Serialize) {
        match serde_json::to_string(payload) {
            Ok(json) => info!("{} | {}", topic, json),
            Err(e) => warn!("{} | serialize failed: {}", topic, e),
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Security { .. } => {
                self.publish(&self.topic_events, event);
            }
            AppEvent::EnvSample(_) | AppEvent::Telemetry(_) => {
                self.publish(&self.topic_data, event);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
