//! Routes for the Event Scheduling bounded context.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use convene_core::command::Command;
use convene_core::error::DomainError;
use convene_core::identity::Identity;
use convene_core::store::{EventRecord, Participant};
use convene_scheduling::application::command_handlers::{
    self, CatalogView, CreateOutcome, DestroyOutcome, InputError, UpdateOutcome,
};
use convene_scheduling::application::query_handlers::{self, EventListView};
use convene_scheduling::domain::commands::{CreateEvent, DestroyEvent, UpdateEvent};
use convene_scheduling::domain::date::DateComponents;
use convene_scheduling::domain::slots::possible_times;

use crate::error::ApiError;
use crate::format::DisplayPrefs;
use crate::identity::HeaderIdentity;
use crate::state::AppState;

const TIME_FORMAT: &str = "%H:%M";

/// Date components as submitted by the form.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DateParams {
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: i32,
    /// Calendar day.
    pub day: i32,
}

/// Request body for POST / and PUT /{id}.
#[derive(Debug, Deserialize)]
pub struct EventForm {
    /// Proposed event name.
    pub name: String,
    /// Proposed date.
    pub date: DateParams,
    /// Requested slots, as `HH:MM` strings.
    #[serde(default)]
    pub times_allowed: Vec<String>,
}

/// Response body for a persisted event.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    /// The event identifier.
    pub id: Uuid,
    /// The event name.
    pub name: String,
    /// The event date.
    pub date: NaiveDate,
    /// The identity that created the event.
    pub owner: Identity,
    /// Allowed slots, as `HH:MM` strings in insertion order.
    pub times_allowed: Vec<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Response body when input must be corrected: the error plus the catalog
/// to re-present.
#[derive(Debug, Serialize)]
pub struct NeedsInputResponse {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Catalog entries: `HH:MM` strings when unanchored, full date-times
    /// when anchored to an existing event's date.
    pub possible_times: serde_json::Value,
}

/// Response body for GET /slots.
#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    /// The catalog, as `HH:MM` strings.
    pub possible_times: Vec<String>,
}

/// Response body for GET /{id}/slots.
#[derive(Debug, Serialize)]
pub struct AnchoredSlotsResponse {
    /// The catalog anchored to the event's date.
    pub possible_times: Vec<NaiveDateTime>,
}

/// Response body for GET /{id}.
#[derive(Debug, Serialize)]
pub struct ShowResponse {
    /// The event identifier.
    pub id: Uuid,
    /// The event name.
    pub name: String,
    /// The event date.
    pub date: NaiveDate,
    /// The identity that created the event.
    pub owner: Identity,
    /// Allowed times anchored to the event date.
    pub times_allowed: Vec<NaiveDateTime>,
    /// Allowed times rendered per the requested hour format.
    pub times_display: Vec<String>,
    /// Users associated with the event.
    pub participants: Vec<Participant>,
}

fn render_slots(slots: &[NaiveTime]) -> Vec<String> {
    slots
        .iter()
        .map(|slot| slot.format(TIME_FORMAT).to_string())
        .collect()
}

fn parse_times(raw: &[String]) -> Result<Vec<NaiveTime>, ApiError> {
    raw.iter()
        .map(|text| {
            NaiveTime::parse_from_str(text, TIME_FORMAT).map_err(|_| {
                ApiError(DomainError::Validation(format!(
                    "times_allowed entries must be HH:MM, got {text:?}"
                )))
            })
        })
        .collect()
}

fn event_response(record: &EventRecord) -> EventResponse {
    EventResponse {
        id: record.id,
        name: record.name.clone(),
        date: record.date,
        owner: record.owner,
        times_allowed: render_slots(&record.times_allowed),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn needs_input_response(catalog: &CatalogView, reason: &InputError) -> Response {
    let error = match reason {
        InputError::InvalidDate { .. } => "invalid_date",
        InputError::Field(_) => "validation_error",
    };
    let possible_times = match catalog {
        CatalogView::Unanchored(slots) => serde_json::json!(render_slots(slots)),
        CatalogView::Anchored(slots) => serde_json::json!(slots),
    };
    let body = NeedsInputResponse {
        error,
        message: reason.to_string(),
        possible_times,
    };
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

/// GET /
#[instrument(skip(state, headers))]
async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<EventListView>, ApiError> {
    let identity = HeaderIdentity::from_headers(&headers);
    let view = query_handlers::list_events(&identity, &*state.store).await?;
    Ok(Json(view))
}

/// GET /slots
async fn new_slots() -> Json<SlotsResponse> {
    Json(SlotsResponse {
        possible_times: render_slots(possible_times().slots()),
    })
}

/// GET /{id}
#[instrument(skip(state, prefs))]
async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(prefs): Query<DisplayPrefs>,
) -> Result<Json<ShowResponse>, ApiError> {
    let view = query_handlers::get_event_by_id(id, &*state.store).await?;
    let times_display = view
        .times_allowed
        .iter()
        .map(|at| prefs.hour_format.render(*at))
        .collect();
    Ok(Json(ShowResponse {
        id: view.id,
        name: view.name,
        date: view.date,
        owner: view.owner,
        times_allowed: view.times_allowed,
        times_display,
        participants: view.participants,
    }))
}

/// GET /{id}/slots
#[instrument(skip(state))]
async fn edit_slots(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnchoredSlotsResponse>, ApiError> {
    let view = query_handlers::get_event_by_id(id, &*state.store).await?;
    Ok(Json(AnchoredSlotsResponse {
        possible_times: possible_times().anchor_to(view.date),
    }))
}

/// POST /
#[instrument(skip(state, headers, form), fields(event_name = %form.name))]
async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<EventForm>,
) -> Result<Response, ApiError> {
    let identity = HeaderIdentity::from_headers(&headers);
    let command = CreateEvent {
        correlation_id: Uuid::new_v4(),
        name: form.name,
        date: DateComponents::new(form.date.year, form.date.month, form.date.day),
        times_allowed: parse_times(&form.times_allowed)?,
    };

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        "handling command"
    );

    let outcome = command_handlers::handle_create_event(
        &command,
        &identity,
        state.clock.as_ref(),
        &*state.store,
    )
    .await?;

    Ok(match outcome {
        CreateOutcome::Created(record) => {
            (StatusCode::CREATED, Json(event_response(&record))).into_response()
        }
        CreateOutcome::NeedsInput { catalog, reason } => needs_input_response(&catalog, &reason),
    })
}

/// PUT /{id}
#[instrument(skip(state, headers, form), fields(event_id = %id))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(form): Json<EventForm>,
) -> Result<Response, ApiError> {
    let identity = HeaderIdentity::from_headers(&headers);
    let command = UpdateEvent {
        correlation_id: Uuid::new_v4(),
        event_id: id,
        name: form.name,
        date: DateComponents::new(form.date.year, form.date.month, form.date.day),
        times_allowed: parse_times(&form.times_allowed)?,
    };

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        "handling command"
    );

    let outcome = command_handlers::handle_update_event(
        &command,
        &identity,
        state.clock.as_ref(),
        &*state.store,
    )
    .await?;

    Ok(match outcome {
        UpdateOutcome::Updated(record) => Json(event_response(&record)).into_response(),
        UpdateOutcome::NeedsInput { catalog, reason } => needs_input_response(&catalog, &reason),
    })
}

/// DELETE /{id}
#[instrument(skip(state, headers), fields(event_id = %id))]
async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let identity = HeaderIdentity::from_headers(&headers);
    let command = DestroyEvent {
        correlation_id: Uuid::new_v4(),
        event_id: id,
    };

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        "handling command"
    );

    let outcome =
        command_handlers::handle_destroy_event(&command, &identity, &*state.store).await?;
    if outcome == DestroyOutcome::Deleted {
        info!(event_id = %id, "event deleted");
    }

    // Owner and non-owner requests complete identically.
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for the events context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/slots", get(new_slots))
        .route("/{id}", get(show).put(update).delete(destroy))
        .route("/{id}/slots", get(edit_slots))
}
