//! Shared test doubles for the Convene scheduler.

mod clock;
mod identity;
mod store;

pub use clock::FixedClock;
pub use identity::{Anonymous, StaticIdentity};
pub use store::{FailingEventStore, InMemoryEventStore};
