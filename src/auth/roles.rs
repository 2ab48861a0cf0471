// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Admin` - Full access to all endpoints, including user management
/// - `Contributor` - Can manage exemptions and read audit logs
/// - `Reader` - Read-only access to exemptions and exit-node lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Can manage exemptions and read audit logs
    Contributor,
    /// Read-only access
    Reader,
}

/// All roles, in descending order of privilege.
pub const ALL_ROLES: [Role; 3] = [Role::Admin, Role::Contributor, Role::Reader];

impl Role {
    /// Parse role from string (case-insensitive).
    ///
    /// Used when validating role names supplied in user-creation requests.
    pub fn from_str(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "contributor" => Some(Role::Contributor),
            "reader" => Some(Role::Reader),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Contributor => write!(f, "contributor"),
            Role::Reader => write!(f, "reader"),
        }
    }
}
