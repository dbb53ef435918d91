// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity and per-request context.
//!
//! The caller's user id is supplied by the surrounding platform and trusted
//! verbatim. Nothing here issues or verifies credentials.

use goaltrack_audit::{Actor, Cause};
use goaltrack_domain::UserId;
use time::OffsetDateTime;

use crate::error::AuthError;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The caller's user id.
    pub user_id: UserId,
}

impl AuthenticatedActor {
    /// Creates an authenticated actor.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Builds an actor from a raw identity value such as a request header.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the value is missing or blank.
    pub fn from_identity(raw: Option<&str>) -> Result<Self, AuthError> {
        let value: &str = raw.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("missing caller identity"),
            });
        }
        Ok(Self::new(UserId::new(value)))
    }

    /// Converts this caller into the audit actor recorded on events.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::user(self.user_id.clone())
    }
}

/// Everything an operation needs to know about the request it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// The caller.
    pub actor: AuthenticatedActor,
    /// Why the operation is running, recorded on audit events.
    pub cause: Cause,
    /// The request timestamp.
    pub now: OffsetDateTime,
}

impl RequestContext {
    /// Creates a request context.
    #[must_use]
    pub const fn new(actor: AuthenticatedActor, cause: Cause, now: OffsetDateTime) -> Self {
        Self { actor, cause, now }
    }

    /// Returns the caller's user id.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.actor.user_id
    }
}
