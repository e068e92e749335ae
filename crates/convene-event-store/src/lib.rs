//! PostgreSQL adapter for the `EventStore` port.

pub mod pg_event_store;
pub mod schema;

pub use pg_event_store::PgEventStore;
