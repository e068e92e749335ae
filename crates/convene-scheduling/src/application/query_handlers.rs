//! Query handlers for the Event Scheduling context.
//!
//! Read-only handlers that load records through the store port and return
//! view DTOs: the date-ordered event listing partitioned by ownership, and
//! the single-event view with date-anchored allowed times.

use chrono::{NaiveDate, NaiveDateTime};
use convene_core::error::DomainError;
use convene_core::identity::{Identity, IdentityProvider};
use convene_core::store::{EventStore, Participant};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::event::Event;

/// One row of the event listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    /// The event identifier.
    pub id: Uuid,
    /// The event name.
    pub name: String,
    /// The event's calendar date.
    pub date: NaiveDate,
    /// The identity that created the event.
    pub owner: Identity,
}

/// The full event listing, ordered by date ascending and partitioned
/// relative to the viewer. The two groups are disjoint and together cover
/// every stored event; an anonymous viewer owns nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventListView {
    /// Events created by the viewer.
    pub owned: Vec<EventSummary>,
    /// Everyone else's events.
    pub others: Vec<EventSummary>,
}

/// Read-only view of a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    /// The event identifier.
    pub id: Uuid,
    /// The event name.
    pub name: String,
    /// The event's calendar date.
    pub date: NaiveDate,
    /// The identity that created the event.
    pub owner: Identity,
    /// The allowed times anchored to the event's date.
    pub times_allowed: Vec<NaiveDateTime>,
    /// Users associated with the event.
    pub participants: Vec<Participant>,
}

/// Retrieves every event, ordered by date ascending and partitioned into
/// the viewer's own events and everyone else's.
///
/// # Errors
///
/// Returns any store-level error from the listing.
pub async fn list_events(
    identity: &dyn IdentityProvider,
    store: &dyn EventStore,
) -> Result<EventListView, DomainError> {
    let viewer = identity.current_identity();
    let mut records = store.find_all().await?;
    records.sort_by_key(|record| record.date);

    let (owned, others): (Vec<EventSummary>, Vec<EventSummary>) = records
        .into_iter()
        .map(|record| EventSummary {
            id: record.id,
            name: record.name,
            date: record.date,
            owner: record.owner,
        })
        .partition(|summary| viewer.is_some_and(|v| summary.owner == v));

    Ok(EventListView { owned, others })
}

/// Retrieves a single event with its anchored allowed times and its
/// participants.
///
/// # Errors
///
/// Returns `DomainError::EventNotFound` when the id does not resolve, or
/// any store-level error.
pub async fn get_event_by_id(
    event_id: Uuid,
    store: &dyn EventStore,
) -> Result<EventView, DomainError> {
    let record = store
        .find_by_id(event_id)
        .await?
        .ok_or(DomainError::EventNotFound(event_id))?;
    let participants = store.participants_of(event_id).await?;

    let event = Event::from(record);
    Ok(EventView {
        id: event.id,
        times_allowed: event.anchored_times(),
        name: event.name,
        date: event.date,
        owner: event.owner,
        participants,
    })
}
