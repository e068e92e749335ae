//! Shared application state.

use std::sync::Arc;

use convene_core::clock::Clock;
use convene_core::store::EventStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The event store port.
    pub store: Arc<dyn EventStore>,
    /// The clock port.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}
