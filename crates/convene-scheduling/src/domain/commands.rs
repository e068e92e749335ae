//! Commands for the Event Scheduling context.

use chrono::NaiveTime;
use convene_core::command::Command;
use uuid::Uuid;

use super::date::DateComponents;

/// Command to create a new event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Proposed event name.
    pub name: String,
    /// Proposed date, as the raw submitted components.
    pub date: DateComponents,
    /// Requested time slots, drawn from the catalog.
    pub times_allowed: Vec<NaiveTime>,
}

impl Command for CreateEvent {
    fn command_type(&self) -> &'static str {
        "scheduling.create_event"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to update an existing event.
#[derive(Debug, Clone)]
pub struct UpdateEvent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The event to update.
    pub event_id: Uuid,
    /// Proposed event name.
    pub name: String,
    /// Proposed date, as the raw submitted components.
    pub date: DateComponents,
    /// Requested time slots, drawn from the catalog.
    pub times_allowed: Vec<NaiveTime>,
}

impl Command for UpdateEvent {
    fn command_type(&self) -> &'static str {
        "scheduling.update_event"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to destroy an event.
#[derive(Debug, Clone)]
pub struct DestroyEvent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The event to destroy.
    pub event_id: Uuid,
}

impl Command for DestroyEvent {
    fn command_type(&self) -> &'static str {
        "scheduling.destroy_event"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
