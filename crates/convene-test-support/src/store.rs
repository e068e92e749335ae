//! Test stores — `EventStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use convene_core::error::DomainError;
use convene_core::store::{EventRecord, EventStore, NewEventRecord, Participant};
use uuid::Uuid;

/// An event store backed by in-process collections. Records every call so
/// tests can assert how often each operation was reached (e.g. that an
/// invalid date never produces an insert).
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: Mutex<Vec<EventRecord>>,
    participants: Mutex<HashMap<Uuid, Vec<Participant>>>,
    insert_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryEventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the given records.
    #[must_use]
    pub fn with_events(events: Vec<EventRecord>) -> Self {
        Self {
            events: Mutex::new(events),
            ..Self::default()
        }
    }

    /// Associates participants with an event, standing in for the external
    /// join relation.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn add_participants(&self, event_id: Uuid, participants: Vec<Participant>) {
        self.participants
            .lock()
            .unwrap()
            .entry(event_id)
            .or_default()
            .extend(participants);
    }

    /// Returns a snapshot of the stored records.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.events.lock().unwrap().clone()
    }

    /// Number of `insert` calls received.
    #[must_use]
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::Relaxed)
    }

    /// Number of `update` calls received.
    #[must_use]
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::Relaxed)
    }

    /// Number of `delete` calls received.
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<EventRecord>, DomainError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<EventRecord>, DomainError> {
        Ok(self.events.lock().unwrap().clone())
    }

    async fn insert(&self, record: NewEventRecord) -> Result<EventRecord, DomainError> {
        self.insert_calls.fetch_add(1, Ordering::Relaxed);
        let record = EventRecord {
            id: Uuid::new_v4(),
            name: record.name,
            date: record.date,
            owner: record.owner,
            times_allowed: record.times_allowed,
            created_at: record.created_at,
            updated_at: record.updated_at,
        };
        self.events.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: &EventRecord) -> Result<(), DomainError> {
        self.update_calls.fetch_add(1, Ordering::Relaxed);
        let mut events = self.events.lock().unwrap();
        let stored = events
            .iter_mut()
            .find(|stored| stored.id == record.id)
            .ok_or(DomainError::EventNotFound(record.id))?;
        *stored = record.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.delete_calls.fetch_add(1, Ordering::Relaxed);
        self.events.lock().unwrap().retain(|record| record.id != id);
        Ok(())
    }

    async fn participants_of(&self, event_id: Uuid) -> Result<Vec<Participant>, DomainError> {
        Ok(self
            .participants
            .lock()
            .unwrap()
            .get(&event_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// An event store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug, Clone, Copy)]
pub struct FailingEventStore;

#[async_trait]
impl EventStore for FailingEventStore {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<EventRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_all(&self) -> Result<Vec<EventRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn insert(&self, _record: NewEventRecord) -> Result<EventRecord, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn update(&self, _record: &EventRecord) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete(&self, _id: Uuid) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn participants_of(&self, _event_id: Uuid) -> Result<Vec<Participant>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
