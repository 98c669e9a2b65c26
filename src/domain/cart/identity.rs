//! Cart ownership identity.

use std::fmt;

use crate::domain::foundation::{OwnerId, ValidationError};

/// Whether a cart belongs to an authenticated user or an anonymous guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKind {
    User,
    Guest,
}

/// The owner a cart is keyed by, plus the kind that selects its lifetime.
///
/// User and guest identifiers share one key space; the kind only drives the
/// default time-to-live.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartIdentity {
    id: OwnerId,
    kind: IdentityKind,
}

impl CartIdentity {
    pub fn user(id: OwnerId) -> Self {
        Self {
            id,
            kind: IdentityKind::User,
        }
    }

    pub fn guest(id: OwnerId) -> Self {
        Self {
            id,
            kind: IdentityKind::Guest,
        }
    }

    /// Parses a raw guest identifier from a request path.
    pub fn parse_guest(raw: &str) -> Result<Self, ValidationError> {
        OwnerId::new(raw).map(Self::guest)
    }

    pub fn id(&self) -> &OwnerId {
        &self.id
    }

    pub fn kind(&self) -> IdentityKind {
        self.kind
    }
}

impl fmt::Display for CartIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IdentityKind::User => write!(f, "user:{}", self.id),
            IdentityKind::Guest => write!(f, "guest:{}", self.id),
        }
    }
}
