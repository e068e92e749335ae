//! Event persistence abstraction.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::DomainError;
use crate::identity::Identity;

/// Stored representation of a scheduled event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Unique event identifier, assigned by the store on insert.
    pub id: Uuid,
    /// Human-readable label.
    pub name: String,
    /// The event's calendar date. Always a real calendar date once
    /// persisted; handlers reject invalid dates before any store call.
    pub date: NaiveDate,
    /// The identity that created the event. Never overwritten by updates.
    pub owner: Identity,
    /// Times of day the owner allows, in insertion order.
    pub times_allowed: Vec<NaiveTime>,
    /// Timestamp of record creation.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

/// A validated event awaiting its first insert. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventRecord {
    /// Human-readable label.
    pub name: String,
    /// The event's calendar date.
    pub date: NaiveDate,
    /// The identity creating the event.
    pub owner: Identity,
    /// Times of day the owner allows, in insertion order.
    pub times_allowed: Vec<NaiveTime>,
    /// Timestamp of record creation.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

/// A user associated with an event. Population happens through an external
/// join relation; this core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    /// The participating user's identifier.
    pub user_id: Uuid,
    /// The participating user's display name.
    pub name: String,
}

/// Repository trait for loading and mutating event records.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Load a single event by id. `None` when absent.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<EventRecord>, DomainError>;

    /// Load all events. No order is guaranteed; callers re-sort.
    async fn find_all(&self) -> Result<Vec<EventRecord>, DomainError>;

    /// Persist a new event, assigning its identifier.
    async fn insert(&self, record: NewEventRecord) -> Result<EventRecord, DomainError>;

    /// Persist new field values for an existing event.
    async fn update(&self, record: &EventRecord) -> Result<(), DomainError>;

    /// Remove an event.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;

    /// Load the participants associated with an event.
    async fn participants_of(&self, event_id: Uuid) -> Result<Vec<Participant>, DomainError>;
}
