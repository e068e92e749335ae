//! Test identity providers — deterministic `IdentityProvider` implementations.

use convene_core::identity::{Identity, IdentityProvider};

/// A provider that always resolves to the given identity.
#[derive(Debug, Clone, Copy)]
pub struct StaticIdentity(pub Identity);

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> Option<Identity> {
        Some(self.0)
    }
}

/// A provider that never resolves an identity. Used for testing
/// unauthenticated and non-owner paths.
#[derive(Debug, Clone, Copy)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn current_identity(&self) -> Option<Identity> {
        None
    }
}
