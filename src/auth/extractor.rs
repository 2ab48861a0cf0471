// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::state::AppState;

use super::{AuthenticatedUser, AuthError};

/// Extractor for authenticated users.
///
/// Validates the bearer token from the `Authorization` header against the
/// process-wide token codec and yields the caller's identity. Authorization
/// decisions are a separate step; handlers pass the identity to the policy
/// module.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?
            .trim();

        let claims = state.codec.decode(token)?;

        Ok(Auth(claims.into()))
    }
}
