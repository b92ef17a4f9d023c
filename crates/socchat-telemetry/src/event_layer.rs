//! Tracing layer that streams pipeline events to the presentation layer.
//!
//! Events emitted on the `chat_pipeline` target (state transitions, retries,
//! degraded replies, appended results) are converted to `PipelineEvent`s and
//! sent over an unbounded channel.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Target used by the pipeline for events worth showing to the analyst.
pub const PIPELINE_TARGET: &str = "chat_pipeline";

/// Event data sent to the frontend
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineEvent {
    /// Event target (always `chat_pipeline`)
    pub target: String,
    /// Log level (INFO, DEBUG, WARN, ERROR)
    pub level: String,
    /// Human-readable message
    pub message: String,
    /// Structured fields from the event, excluding `message`
    pub fields: HashMap<String, Value>,
    /// Timestamp
    pub timestamp: String,
}

/// A tracing layer that forwards pipeline events to a channel
pub struct PipelineEventLayer {
    sender: mpsc::UnboundedSender<PipelineEvent>,
}

impl PipelineEventLayer {
    /// Create a new layer with the given channel sender
    pub fn new(sender: mpsc::UnboundedSender<PipelineEvent>) -> Self {
        Self { sender }
    }
}

impl<S> Layer<S> for PipelineEventLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target() != PIPELINE_TARGET {
            return;
        }

        let mut fields = HashMap::new();
        let mut visitor = FieldVisitor(&mut fields);
        event.record(&mut visitor);

        let message = match fields.remove("message") {
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let pipeline_event = PipelineEvent {
            target: metadata.target().to_string(),
            level: metadata.level().to_string(),
            message,
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver may be gone after the view closed; drop the event then.
        let _ = self.sender.send(pipeline_event);
    }
}

/// Field visitor that extracts tracing event fields into a HashMap
struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}
