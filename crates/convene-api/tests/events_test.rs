//! Integration tests for the events endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use convene_core::identity::Identity;
use convene_test_support::InMemoryEventStore;
use serde_json::json;
use uuid::Uuid;

fn event_form(name: &str, year: i32, month: i32, day: i32) -> serde_json::Value {
    json!({
        "name": name,
        "date": { "year": year, "month": month, "day": day },
        "times_allowed": ["09:00", "13:00"],
    })
}

/// Creates an event through the API and returns its id.
async fn create_event(
    store: &Arc<InMemoryEventStore>,
    owner: Identity,
    form: &serde_json::Value,
) -> Uuid {
    let app = common::build_test_app(Arc::clone(store));
    let (status, json) = common::send(app, "POST", "/api/v1/events", Some(owner), Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_create_returns_201_with_the_persisted_event() {
    let store = Arc::new(InMemoryEventStore::new());
    let owner = Identity(Uuid::new_v4());
    let app = common::build_test_app(Arc::clone(&store));

    let (status, json) = common::send(
        app,
        "POST",
        "/api/v1/events",
        Some(owner),
        Some(&event_form("Planning session", 2024, 3, 10)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["name"], "Planning session");
    assert_eq!(json["date"], "2024-03-10");
    assert_eq!(json["owner"], owner.to_string());
    assert_eq!(json["times_allowed"], json!(["09:00", "13:00"]));
    assert_eq!(store.events().len(), 1);
}

#[tokio::test]
async fn test_create_without_identity_returns_401() {
    let store = Arc::new(InMemoryEventStore::new());
    let app = common::build_test_app(Arc::clone(&store));

    let (status, json) = common::send(
        app,
        "POST",
        "/api/v1/events",
        None,
        Some(&event_form("Planning session", 2024, 3, 10)),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "authentication_required");
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_create_with_invalid_date_returns_422_and_the_unanchored_catalog() {
    let store = Arc::new(InMemoryEventStore::new());
    let app = common::build_test_app(Arc::clone(&store));

    let (status, json) = common::send(
        app,
        "POST",
        "/api/v1/events",
        Some(Identity(Uuid::new_v4())),
        Some(&event_form("Planning session", 2024, 2, 30)),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "invalid_date");
    let slots = json["possible_times"].as_array().unwrap();
    assert_eq!(slots.len(), 24);
    assert_eq!(slots[0], "00:00");
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_create_accepts_a_leap_day() {
    let store = Arc::new(InMemoryEventStore::new());
    let app = common::build_test_app(Arc::clone(&store));

    let (status, json) = common::send(
        app,
        "POST",
        "/api/v1/events",
        Some(Identity(Uuid::new_v4())),
        Some(&event_form("Leap day standup", 2024, 2, 29)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["date"], "2024-02-29");
}

#[tokio::test]
async fn test_create_with_a_blank_name_returns_422() {
    let store = Arc::new(InMemoryEventStore::new());
    let app = common::build_test_app(Arc::clone(&store));

    let (status, json) = common::send(
        app,
        "POST",
        "/api/v1/events",
        Some(Identity(Uuid::new_v4())),
        Some(&event_form("  ", 2024, 3, 10)),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "validation_error");
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_index_partitions_events_relative_to_the_caller() {
    let store = Arc::new(InMemoryEventStore::new());
    let owner = Identity(Uuid::new_v4());
    let other = Identity(Uuid::new_v4());
    create_event(&store, owner, &event_form("Mine", 2024, 3, 10)).await;
    create_event(&store, other, &event_form("Theirs", 2024, 3, 11)).await;

    let app = common::build_test_app(Arc::clone(&store));
    let (status, json) = common::send(app, "GET", "/api/v1/events", Some(owner), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["owned"].as_array().unwrap().len(), 1);
    assert_eq!(json["owned"][0]["name"], "Mine");
    assert_eq!(json["others"].as_array().unwrap().len(), 1);
    assert_eq!(json["others"][0]["name"], "Theirs");
}

#[tokio::test]
async fn test_index_for_an_anonymous_caller_owns_nothing() {
    let store = Arc::new(InMemoryEventStore::new());
    create_event(
        &store,
        Identity(Uuid::new_v4()),
        &event_form("Somebody's", 2024, 3, 10),
    )
    .await;

    let app = common::build_test_app(Arc::clone(&store));
    let (status, json) = common::get_json(app, "/api/v1/events").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["owned"].as_array().unwrap().is_empty());
    assert_eq!(json["others"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_show_anchors_times_and_renders_both_hour_formats() {
    let store = Arc::new(InMemoryEventStore::new());
    let owner = Identity(Uuid::new_v4());
    let id = create_event(&store, owner, &event_form("Planning session", 2024, 3, 10)).await;

    let app = common::build_test_app(Arc::clone(&store));
    let (status, json) = common::get_json(app, &format!("/api/v1/events/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["times_allowed"],
        json!(["2024-03-10T09:00:00", "2024-03-10T13:00:00"])
    );
    // The default preference is the 12-hour clock.
    assert_eq!(
        json["times_display"],
        json!(["2024-03-10 09:00 AM", "2024-03-10 01:00 PM"])
    );

    let app = common::build_test_app(Arc::clone(&store));
    let (_, json) =
        common::get_json(app, &format!("/api/v1/events/{id}?hour_format=24")).await;
    assert_eq!(
        json["times_display"],
        json!(["2024-03-10 09:00", "2024-03-10 13:00"])
    );
}

#[tokio::test]
async fn test_show_returns_404_for_an_unknown_id() {
    let store = Arc::new(InMemoryEventStore::new());
    let app = common::build_test_app(store);

    let (status, json) =
        common::get_json(app, &format!("/api/v1/events/{}", Uuid::new_v4())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "event_not_found");
}

#[tokio::test]
async fn test_update_applies_new_fields() {
    let store = Arc::new(InMemoryEventStore::new());
    let owner = Identity(Uuid::new_v4());
    let id = create_event(&store, owner, &event_form("Planning session", 2024, 3, 10)).await;

    let app = common::build_test_app(Arc::clone(&store));
    let (status, json) = common::send(
        app,
        "PUT",
        &format!("/api/v1/events/{id}"),
        Some(owner),
        Some(&event_form("Rescheduled session", 2024, 4, 2)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Rescheduled session");
    assert_eq!(json["date"], "2024-04-02");
    assert_eq!(json["owner"], owner.to_string());
}

#[tokio::test]
async fn test_update_with_invalid_date_returns_the_catalog_anchored_to_the_stored_date() {
    let store = Arc::new(InMemoryEventStore::new());
    let owner = Identity(Uuid::new_v4());
    let id = create_event(&store, owner, &event_form("Planning session", 2024, 3, 10)).await;

    let app = common::build_test_app(Arc::clone(&store));
    let (status, json) = common::send(
        app,
        "PUT",
        &format!("/api/v1/events/{id}"),
        Some(owner),
        Some(&event_form("Planning session", 2024, 2, 30)),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "invalid_date");
    let slots = json["possible_times"].as_array().unwrap();
    assert_eq!(slots.len(), 24);
    assert!(
        slots
            .iter()
            .all(|slot| slot.as_str().unwrap().starts_with("2024-03-10T"))
    );
    // The stored event is unchanged.
    assert_eq!(store.events()[0].name, "Planning session");
}

#[tokio::test]
async fn test_destroy_by_the_owner_removes_the_event() {
    let store = Arc::new(InMemoryEventStore::new());
    let owner = Identity(Uuid::new_v4());
    let id = create_event(&store, owner, &event_form("Planning session", 2024, 3, 10)).await;

    let app = common::build_test_app(Arc::clone(&store));
    let (status, _) = common::send(
        app,
        "DELETE",
        &format!("/api/v1/events/{id}"),
        Some(owner),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_destroy_by_a_non_owner_answers_204_but_keeps_the_event() {
    let store = Arc::new(InMemoryEventStore::new());
    let owner = Identity(Uuid::new_v4());
    let id = create_event(&store, owner, &event_form("Planning session", 2024, 3, 10)).await;

    let app = common::build_test_app(Arc::clone(&store));
    let (status, _) = common::send(
        app,
        "DELETE",
        &format!("/api/v1/events/{id}"),
        Some(Identity(Uuid::new_v4())),
        None,
    )
    .await;

    // Same completion signal as an owner delete.
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(store.events().len(), 1);
}

#[tokio::test]
async fn test_destroy_returns_404_for_an_unknown_id() {
    let store = Arc::new(InMemoryEventStore::new());
    let app = common::build_test_app(store);

    let (status, json) = common::send(
        app,
        "DELETE",
        &format!("/api/v1/events/{}", Uuid::new_v4()),
        Some(Identity(Uuid::new_v4())),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "event_not_found");
}

#[tokio::test]
async fn test_new_slots_returns_the_unanchored_catalog() {
    let store = Arc::new(InMemoryEventStore::new());
    let app = common::build_test_app(store);

    let (status, json) = common::get_json(app, "/api/v1/events/slots").await;

    assert_eq!(status, StatusCode::OK);
    let slots = json["possible_times"].as_array().unwrap();
    assert_eq!(slots.len(), 24);
    assert_eq!(slots[0], "00:00");
    assert_eq!(slots[23], "23:00");
}

#[tokio::test]
async fn test_edit_slots_returns_the_catalog_anchored_to_the_event_date() {
    let store = Arc::new(InMemoryEventStore::new());
    let owner = Identity(Uuid::new_v4());
    let id = create_event(&store, owner, &event_form("Planning session", 2024, 3, 10)).await;

    let app = common::build_test_app(Arc::clone(&store));
    let (status, json) = common::get_json(app, &format!("/api/v1/events/{id}/slots")).await;

    assert_eq!(status, StatusCode::OK);
    let slots = json["possible_times"].as_array().unwrap();
    assert_eq!(slots.len(), 24);
    assert_eq!(slots[0], "2024-03-10T00:00:00");
    assert_eq!(slots[23], "2024-03-10T23:00:00");
}
