use reqwest::StatusCode;
use tracing::{error, info, warn};

use crate::error::DeliveryError;
use crate::event::DetectionEvent;

/// Receives the outcome of every iteration.
pub trait Reporter {
    fn delivered(&self, event: &DetectionEvent);

    fn rejected(&self, event: &DetectionEvent, status: StatusCode);

    fn failed(&self, event: &DetectionEvent, error: &DeliveryError);
}

/// Writes outcomes to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn delivered(&self, event: &DetectionEvent) {
        info!(
            event_id = %event.id,
            kind = %event.kind,
            severity = %event.severity,
            "✅ Sent: {} ({})",
            event.kind,
            event.severity
        );
    }

    fn rejected(&self, event: &DetectionEvent, status: StatusCode) {
        error!(
            event_id = %event.id,
            status = status.as_u16(),
            "❌ Error: Server returned {}",
            status.as_u16()
        );
    }

    fn failed(&self, event: &DetectionEvent, error: &DeliveryError) {
        warn!(event_id = %event.id, "⚠️ Connection Failed: {}", error);
    }
}
