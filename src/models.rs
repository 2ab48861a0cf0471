// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! Domain records and API request/response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

/// A stored user identity.
///
/// Owned by the store; the password hash never leaves the server
/// (responses use [`UserResponse`]).
#[derive(Debug, Clone)]
pub struct User {
    /// Numeric id, assigned by the store.
    pub id: i64,
    /// Unique username (exact-match comparison).
    pub username: String,
    /// Argon2 PHC-format password hash.
    pub hashed_password: String,
    /// Role determining operation-level permissions.
    pub role: Role,
    /// Whether the account is active.
    pub active: bool,
}

/// User record as exposed over the API (no password hash).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Numeric id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Role.
    pub role: Role,
    /// Whether the account is active.
    pub active: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            active: user.active,
        }
    }
}

/// An IP address exempted from the external exit-node block list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IpExemption {
    /// Numeric id, assigned by the store.
    pub id: i64,
    /// The exempted IP address (unique).
    pub ipaddress: String,
}

/// Request body for creating a user.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Username for the new account.
    pub username: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
    /// Role name: `admin`, `contributor` or `reader`.
    pub role: String,
    /// Requested active flag (new accounts are always stored active).
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Request body for the one-time superadmin bootstrap.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSuperAdminRequest {
    /// Plaintext password for the superadmin account.
    pub password: String,
}

/// Request body for updating a user.
///
/// `None` means "no change". An explicit value, including `active: false`,
/// is applied.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// New plaintext password; unset or empty leaves the password unchanged.
    #[serde(default)]
    pub password: Option<String>,
    /// New active flag; unset leaves the flag unchanged.
    #[serde(default)]
    pub active: Option<bool>,
}

/// Request body for creating an exit-node exemption.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateExemptionRequest {
    /// The IP address to exempt.
    pub ipaddress: String,
}

/// Form body for the login endpoint (form-encoded, OAuth2 password style).
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginForm {
    /// Username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// The signed access token.
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
}
