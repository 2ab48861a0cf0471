// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! Token claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Claims carried in a signed access token.
///
/// The payload is deliberately small: enough to attribute a request to a
/// user and decide authorization without touching storage. Validity is
/// determined purely by the signature and the expiration instant; there is
/// no server-side token record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject username.
    #[serde(default)]
    pub sub: String,

    /// Subject numeric id.
    #[serde(default)]
    pub id: i64,

    /// Subject role.
    pub role: Role,

    /// Expiration instant (epoch seconds).
    pub exp: i64,
}

/// Authenticated user information extracted from a verified token.
///
/// This is the primary type used throughout the application to represent
/// the caller making a request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Numeric user id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Role.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Check if this user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.sub,
            role: claims.role,
        }
    }
}
