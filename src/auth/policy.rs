// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! Role-based authorization policy.
//!
//! The policy is a pure table from (role, operation) to allow/deny. Handlers
//! never compare roles directly; they name the operation they are about to
//! perform and ask the table. This keeps the full permission matrix in one
//! place where it can be reviewed and tested in isolation.
//!
//! Two rules are layered on top of the boolean gate by the handlers
//! themselves:
//!
//! - User listing is allowed for every role, but non-admin callers only see
//!   their own record (a data filter, not a permission).
//! - User updates follow the more permissive of two rules: an admin may
//!   update anyone ([`Operation::UpdateAnyUser`]), and any caller may update
//!   their own record ([`Operation::UpdateOwnUser`]).

use super::claims::AuthenticatedUser;
use super::error::AuthError;
use super::roles::Role;

/// Operations gated by the authorization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// List user accounts (non-admins are scoped to their own record).
    ListUsers,
    /// Create a new user account.
    CreateUser,
    /// Update any user account.
    UpdateAnyUser,
    /// Update the caller's own account (self-service password change).
    UpdateOwnUser,
    /// Delete a user account.
    DeleteUser,
    /// List the audit trail.
    ListAuditLogs,
    /// List exit-node exemptions.
    ListExemptions,
    /// Add an exit-node exemption.
    CreateExemption,
    /// Remove an exit-node exemption.
    DeleteExemption,
    /// Fetch the external exit-node list (raw or filtered).
    FetchExternalNodes,
}

/// Roles permitted to perform the given operation.
pub fn allowed_roles(operation: Operation) -> &'static [Role] {
    use Role::{Admin, Contributor, Reader};

    match operation {
        Operation::ListUsers => &[Admin, Contributor, Reader],
        Operation::CreateUser => &[Admin],
        Operation::UpdateAnyUser => &[Admin],
        Operation::UpdateOwnUser => &[Admin, Contributor, Reader],
        Operation::DeleteUser => &[Admin],
        Operation::ListAuditLogs => &[Admin, Contributor],
        Operation::ListExemptions => &[Admin, Contributor, Reader],
        Operation::CreateExemption => &[Admin, Contributor],
        Operation::DeleteExemption => &[Admin, Contributor],
        Operation::FetchExternalNodes => &[Admin, Contributor, Reader],
    }
}

/// Check whether a role may perform an operation.
pub fn is_allowed(role: Role, operation: Operation) -> bool {
    allowed_roles(operation).contains(&role)
}

/// Require that the authenticated caller may perform an operation.
pub fn require(user: &AuthenticatedUser, operation: Operation) -> Result<(), AuthError> {
    if is_allowed(user.role, operation) {
        Ok(())
    } else {
        Err(AuthError::InsufficientPermissions)
    }
}

/// Require that the caller may update the given user record.
///
/// Tie-break rule: the more permissive rule wins. An admin may update any
/// record; a non-admin may update only their own.
pub fn require_update(user: &AuthenticatedUser, target_user_id: i64) -> Result<(), AuthError> {
    if is_allowed(user.role, Operation::UpdateAnyUser) {
        return Ok(());
    }
    if user.id == target_user_id {
        return require(user, Operation::UpdateOwnUser);
    }
    Err(AuthError::InsufficientPermissions)
}
