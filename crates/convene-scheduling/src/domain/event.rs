//! The event aggregate.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use convene_core::clock::Clock;
use convene_core::identity::Identity;
use convene_core::store::{EventRecord, NewEventRecord};
use thiserror::Error;
use uuid::Uuid;

use super::slots::SlotCatalog;

/// Field-level validation failures raised while constructing or changing an
/// event. Recoverable: callers re-present the form with the slot catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The event name is blank.
    #[error("name can't be blank")]
    BlankName,

    /// A requested time is not a member of the slot catalog.
    #[error("time {0} is not a selectable slot")]
    UnknownSlot(NaiveTime),
}

/// Checks every requested time against the catalog and collapses duplicates,
/// keeping the first occurrence of each slot.
fn normalize_times(
    times: Vec<NaiveTime>,
    catalog: &SlotCatalog,
) -> Result<Vec<NaiveTime>, FieldError> {
    let mut normalized = Vec::with_capacity(times.len());
    for time in times {
        if !catalog.contains(time) {
            return Err(FieldError::UnknownSlot(time));
        }
        if !normalized.contains(&time) {
            normalized.push(time);
        }
    }
    Ok(normalized)
}

fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError::BlankName);
    }
    Ok(())
}

/// A validated event that has not been persisted yet. The store assigns the
/// identifier on insert.
#[derive(Debug, Clone)]
pub struct EventDraft {
    name: String,
    date: NaiveDate,
    owner: Identity,
    times_allowed: Vec<NaiveTime>,
}

impl EventDraft {
    /// Validates the proposed fields into a draft.
    ///
    /// The date is expected to have passed calendar validation already; this
    /// checks the name and the requested slots.
    ///
    /// # Errors
    ///
    /// Returns `FieldError` when the name is blank or a requested time is
    /// not in the catalog.
    pub fn new(
        name: String,
        date: NaiveDate,
        owner: Identity,
        times_allowed: Vec<NaiveTime>,
        catalog: &SlotCatalog,
    ) -> Result<Self, FieldError> {
        validate_name(&name)?;
        let times_allowed = normalize_times(times_allowed, catalog)?;
        Ok(Self {
            name,
            date,
            owner,
            times_allowed,
        })
    }

    /// Converts the draft into a record ready for its first insert.
    #[must_use]
    pub fn into_record(self, clock: &dyn Clock) -> NewEventRecord {
        let now = clock.now();
        NewEventRecord {
            name: self.name,
            date: self.date,
            owner: self.owner,
            times_allowed: self.times_allowed,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A persisted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Unique identifier.
    pub id: Uuid,
    /// Human-readable label.
    pub name: String,
    /// The event's calendar date.
    pub date: NaiveDate,
    /// The identity that created the event.
    pub owner: Identity,
    /// Allowed times of day, in insertion order.
    pub times_allowed: Vec<NaiveTime>,
    /// Timestamp of record creation.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether `actor` created this event.
    #[must_use]
    pub fn is_owned_by(&self, actor: Identity) -> bool {
        self.owner == actor
    }

    /// The allowed times bound to this event's own date.
    #[must_use]
    pub fn anchored_times(&self) -> Vec<NaiveDateTime> {
        self.times_allowed
            .iter()
            .map(|time| self.date.and_time(*time))
            .collect()
    }

    /// Applies new field values, leaving `owner` and `created_at` untouched.
    ///
    /// # Errors
    ///
    /// Returns `FieldError` when the name is blank or a requested time is
    /// not in the catalog; the event is unchanged in that case.
    pub fn apply_changes(
        &mut self,
        name: String,
        date: NaiveDate,
        times_allowed: Vec<NaiveTime>,
        catalog: &SlotCatalog,
        clock: &dyn Clock,
    ) -> Result<(), FieldError> {
        validate_name(&name)?;
        let times_allowed = normalize_times(times_allowed, catalog)?;
        self.name = name;
        self.date = date;
        self.times_allowed = times_allowed;
        self.updated_at = clock.now();
        Ok(())
    }

    /// The persistence representation of this event.
    #[must_use]
    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            id: self.id,
            name: self.name.clone(),
            date: self.date,
            owner: self.owner,
            times_allowed: self.times_allowed.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            date: record.date,
            owner: record.owner,
            times_allowed: record.times_allowed,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
