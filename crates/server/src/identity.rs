// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity extraction.
//!
//! The surrounding platform authenticates users and forwards the caller's id
//! in the `X-User-Id` header. The server trusts that value verbatim.

use axum::{extract::FromRequestParts, http::request::Parts};
use goaltrack_api::{ApiError, AuthenticatedActor};
use tracing::{debug, warn};

use crate::error::HttpError;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extractor for the calling user.
///
/// ```ignore
/// async fn my_handler(CallerIdentity(actor): CallerIdentity) -> ... { ... }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing, not valid UTF-8, or blank.
pub struct CallerIdentity(pub AuthenticatedActor);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw: Option<&str> = match parts.headers.get(USER_ID_HEADER) {
            Some(value) => Some(value.to_str().map_err(|_| {
                warn!("Invalid {USER_ID_HEADER} header encoding");
                HttpError::from(ApiError::AuthenticationFailed {
                    reason: String::from("caller identity is not valid text"),
                })
            })?),
            None => None,
        };

        let actor: AuthenticatedActor = AuthenticatedActor::from_identity(raw).map_err(|e| {
            debug!(error = %e, "Rejected request without caller identity");
            HttpError::from(ApiError::from(e))
        })?;

        Ok(Self(actor))
    }
}
