//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// Only terminal failures live here. Recoverable input problems (an invalid
/// calendar date, a blank name) are returned as `NeedsInput` outcomes by the
/// scheduling handlers so callers can re-present the slot catalog.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The referenced event does not exist.
    #[error("event not found: {0}")]
    EventNotFound(Uuid),

    /// A field-level validation failure surfaced by the store.
    #[error("validation error: {0}")]
    Validation(String),

    /// The operation requires an authenticated actor and none was supplied.
    #[error("authentication required")]
    Unauthenticated,

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
