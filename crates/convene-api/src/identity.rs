//! Request-scoped identity resolution.

use axum::http::HeaderMap;
use convene_core::identity::{Identity, IdentityProvider};
use uuid::Uuid;

/// Header carrying the authenticated user's id.
///
/// Authentication itself happens upstream (a gateway or session layer);
/// this adapter only resolves the identity it forwarded.
pub const USER_ID_HEADER: &str = "x-user-id";

/// `IdentityProvider` backed by the current request's headers.
#[derive(Debug, Clone, Copy)]
pub struct HeaderIdentity(Option<Identity>);

impl HeaderIdentity {
    /// Reads the actor identity from the request headers. A missing or
    /// malformed header resolves to an anonymous request.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let identity = headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .map(Identity);
        Self(identity)
    }
}

impl IdentityProvider for HeaderIdentity {
    fn current_identity(&self) -> Option<Identity> {
        self.0
    }
}
