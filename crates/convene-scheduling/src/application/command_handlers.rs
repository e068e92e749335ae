//! Command handlers for the Event Scheduling context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: resolve the actor, validate input, and persist
//! through the store port. Recoverable input failures are returned as
//! `NeedsInput` outcomes carrying the catalog view the caller needs to
//! re-present choices; only terminal failures surface as `DomainError`.

use chrono::{NaiveDateTime, NaiveTime};
use convene_core::clock::Clock;
use convene_core::error::DomainError;
use convene_core::identity::IdentityProvider;
use convene_core::store::{EventRecord, EventStore};
use thiserror::Error;

use crate::domain::commands::{CreateEvent, DestroyEvent, UpdateEvent};
use crate::domain::date::DateComponents;
use crate::domain::event::{Event, EventDraft, FieldError};
use crate::domain::slots::possible_times;

/// The catalog as it should be re-presented after a recoverable failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView {
    /// The bare catalog; no event date exists to anchor to.
    Unanchored(Vec<NaiveTime>),
    /// The catalog anchored to an existing event's current date.
    Anchored(Vec<NaiveDateTime>),
}

/// Recoverable input failure accompanying a `NeedsInput` outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The submitted components do not denote a real calendar date.
    #[error("{year}-{month}-{day} is not a valid calendar date")]
    InvalidDate {
        /// Submitted year.
        year: i32,
        /// Submitted month.
        month: i32,
        /// Submitted day.
        day: i32,
    },

    /// A field failed validation.
    #[error(transparent)]
    Field(#[from] FieldError),
}

fn invalid_date(components: DateComponents) -> InputError {
    InputError::InvalidDate {
        year: components.year,
        month: components.month,
        day: components.day,
    }
}

/// Result of a handled `CreateEvent` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The event was persisted; the store assigned its identifier.
    Created(EventRecord),
    /// Input must be corrected; nothing was persisted.
    NeedsInput {
        /// The catalog to re-present, unanchored (no date exists yet).
        catalog: CatalogView,
        /// What was wrong with the input.
        reason: InputError,
    },
}

/// Result of a handled `UpdateEvent` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The stored event now reflects the new field values.
    Updated(EventRecord),
    /// Input must be corrected; the stored event is unchanged.
    NeedsInput {
        /// The catalog to re-present, anchored to the stored (pre-update)
        /// date.
        catalog: CatalogView,
        /// What was wrong with the input.
        reason: InputError,
    },
}

/// Result of a handled `DestroyEvent` command. Both variants signal
/// completion to the caller identically; the distinction exists for logging
/// and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOutcome {
    /// The event was deleted.
    Deleted,
    /// The actor does not own the event; the delete was skipped.
    NotOwner,
}

/// Handles the `CreateEvent` command: validates the date and fields,
/// constructs the event with the actor as owner, and inserts it.
///
/// # Errors
///
/// Returns `DomainError::Unauthenticated` when no actor is present, or any
/// store-level error from the insert.
pub async fn handle_create_event(
    command: &CreateEvent,
    identity: &dyn IdentityProvider,
    clock: &dyn Clock,
    store: &dyn EventStore,
) -> Result<CreateOutcome, DomainError> {
    let Some(actor) = identity.current_identity() else {
        return Err(DomainError::Unauthenticated);
    };

    let catalog = possible_times();
    let Some(date) = command.date.resolve() else {
        return Ok(CreateOutcome::NeedsInput {
            catalog: CatalogView::Unanchored(catalog.slots().to_vec()),
            reason: invalid_date(command.date),
        });
    };

    let draft = match EventDraft::new(
        command.name.clone(),
        date,
        actor,
        command.times_allowed.clone(),
        catalog,
    ) {
        Ok(draft) => draft,
        Err(err) => {
            return Ok(CreateOutcome::NeedsInput {
                catalog: CatalogView::Unanchored(catalog.slots().to_vec()),
                reason: err.into(),
            });
        }
    };

    let record = store.insert(draft.into_record(clock)).await?;
    Ok(CreateOutcome::Created(record))
}

/// Handles the `UpdateEvent` command: loads the event, validates the new
/// date and fields, and persists the changes.
///
/// Ownership is not compared against the actor; any authenticated user may
/// update an event.
///
/// # Errors
///
/// Returns `DomainError::Unauthenticated` when no actor is present,
/// `DomainError::EventNotFound` when the id does not resolve, or any
/// store-level error.
pub async fn handle_update_event(
    command: &UpdateEvent,
    identity: &dyn IdentityProvider,
    clock: &dyn Clock,
    store: &dyn EventStore,
) -> Result<UpdateOutcome, DomainError> {
    if identity.current_identity().is_none() {
        return Err(DomainError::Unauthenticated);
    }

    let record = store
        .find_by_id(command.event_id)
        .await?
        .ok_or(DomainError::EventNotFound(command.event_id))?;
    let mut event = Event::from(record);

    let catalog = possible_times();
    let Some(date) = command.date.resolve() else {
        return Ok(UpdateOutcome::NeedsInput {
            catalog: CatalogView::Anchored(catalog.anchor_to(event.date)),
            reason: invalid_date(command.date),
        });
    };

    if let Err(err) = event.apply_changes(
        command.name.clone(),
        date,
        command.times_allowed.clone(),
        catalog,
        clock,
    ) {
        return Ok(UpdateOutcome::NeedsInput {
            catalog: CatalogView::Anchored(catalog.anchor_to(event.date)),
            reason: err.into(),
        });
    }

    let record = event.to_record();
    store.update(&record).await?;
    Ok(UpdateOutcome::Updated(record))
}

/// Handles the `DestroyEvent` command: loads the event and deletes it when
/// the actor is its owner. A non-owner request (including an anonymous one)
/// skips the delete and still completes.
///
/// # Errors
///
/// Returns `DomainError::EventNotFound` when the id does not resolve, or
/// any store-level error from the delete.
pub async fn handle_destroy_event(
    command: &DestroyEvent,
    identity: &dyn IdentityProvider,
    store: &dyn EventStore,
) -> Result<DestroyOutcome, DomainError> {
    let record = store
        .find_by_id(command.event_id)
        .await?
        .ok_or(DomainError::EventNotFound(command.event_id))?;
    let event = Event::from(record);

    let is_owner = identity
        .current_identity()
        .is_some_and(|actor| event.is_owned_by(actor));
    if !is_owner {
        tracing::warn!(event_id = %event.id, "destroy requested by a non-owner; delete skipped");
        return Ok(DestroyOutcome::NotOwner);
    }

    store.delete(event.id).await?;
    Ok(DestroyOutcome::Deleted)
}
