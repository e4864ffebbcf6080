//! Fire-and-forget telemetry sink.
//!
//! One process-lifetime client owns a bounded queue; a background task
//! drains it, echoing each event to the local structured log and delivering
//! it to Loggly over HTTP when a token is configured. Delivery is
//! best-effort: a full queue drops the event instead of blocking a handler,
//! and delivery failures are logged and forgotten.

use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Bounded queue depth; events beyond this are dropped.
const QUEUE_CAPACITY: usize = 256;

const LOGGLY_BASE_URL: &str = "https://logs-01.loggly.com";

/// Severity of a telemetry event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Info,
    Error,
}

impl EventLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLevel::Info => "info",
            EventLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
struct Event {
    level: EventLevel,
    message: String,
}

/// Handle to the telemetry sink; cheap to clone into handlers.
#[derive(Debug, Clone)]
pub struct Telemetry {
    tx: mpsc::Sender<Event>,
}

impl Telemetry {
    /// Spawn the delivery task. Without a token the sink only echoes to the
    /// local log.
    pub fn new(tag: &str, token: Option<String>) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let endpoint = token.map(|token| format!("{LOGGLY_BASE_URL}/inputs/{token}/tag/{tag}/"));
        tokio::spawn(deliver(rx, endpoint));

        Self { tx }
    }

    /// Build from the `LOGGLY_TOKEN` environment variable.
    pub fn from_env(tag: &str) -> Self {
        Self::new(tag, std::env::var("LOGGLY_TOKEN").ok())
    }

    /// Emit an info-level event.
    pub fn info(&self, message: impl Into<String>) {
        self.send(EventLevel::Info, message.into());
    }

    /// Emit an error-level event.
    pub fn error(&self, message: impl Into<String>) {
        self.send(EventLevel::Error, message.into());
    }

    fn send(&self, level: EventLevel, message: String) {
        // Never block the request path: a full queue or a dead delivery
        // task drops the event.
        if self.tx.try_send(Event { level, message }).is_err() {
            warn!("telemetry queue full, dropping event");
        }
    }
}

async fn deliver(mut rx: mpsc::Receiver<Event>, endpoint: Option<String>) {
    let client = reqwest::Client::new();

    while let Some(event) = rx.recv().await {
        match event.level {
            EventLevel::Info => info!(target: "telemetry", "{}", event.message),
            EventLevel::Error => error!(target: "telemetry", "{}", event.message),
        }

        if let Some(url) = &endpoint {
            let body = serde_json::json!({
                "level": event.level.as_str(),
                "message": event.message,
            });

            if let Err(e) = client.post(url).json(&body).send().await {
                warn!("telemetry delivery failed: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_beyond_capacity_are_dropped_not_blocking() {
        let (tx, mut rx) = mpsc::channel(1);
        let telemetry = Telemetry { tx };

        telemetry.info("first");
        telemetry.info("second");

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.level, EventLevel::Info);
        assert_eq!(delivered.message, "first");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn send_survives_a_dead_delivery_task() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let telemetry = Telemetry { tx };
        telemetry.error("store error: unreachable");
    }

    #[test]
    fn levels_render_as_wire_strings() {
        assert_eq!(EventLevel::Info.as_str(), "info");
        assert_eq!(EventLevel::Error.as_str(), "error");
    }
}
