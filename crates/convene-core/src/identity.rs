//! Actor identity and the authentication port.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity of a user acting on the system.
///
/// Events compare their stored owner against this value; it carries no
/// profile data, only the user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub Uuid);

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Abstraction over the authentication collaborator.
///
/// Implementations resolve the actor behind the current request: the HTTP
/// layer reads a credential header, tests supply a fixed identity.
pub trait IdentityProvider: Send + Sync {
    /// Returns the identity of the current actor, or `None` when the
    /// request is unauthenticated.
    fn current_identity(&self) -> Option<Identity>;
}
