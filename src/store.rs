// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! In-memory store for users, exemptions and audit records.
//!
//! The store is the narrow repository surface the rest of the crate builds
//! on: exact-key lookups, inserts, updates and deletes, plus an append-only
//! audit trail. It holds no authorization logic; handlers gate access
//! through the policy module before touching it.

use std::collections::HashMap;

use crate::audit::AuditRecord;
use crate::auth::Role;
use crate::error::ApiError;
use crate::models::{IpExemption, User};

#[derive(Default)]
pub struct InMemoryStore {
    users: HashMap<i64, User>,
    exemptions: HashMap<i64, IpExemption>,
    audit_records: Vec<AuditRecord>,
    next_user_id: i64,
    next_exemption_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Exact-match lookup by username.
    pub fn find_user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|user| user.username == username)
    }

    pub fn get_user(&self, user_id: i64) -> Option<&User> {
        self.users.get(&user_id)
    }

    pub fn username_taken(&self, username: &str) -> bool {
        self.find_user_by_username(username).is_some()
    }

    /// Insert a new user with a store-assigned id.
    pub fn insert_user(
        &mut self,
        username: impl Into<String>,
        hashed_password: String,
        role: Role,
        active: bool,
    ) -> User {
        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            username: username.into(),
            hashed_password,
            role,
            active,
        };
        self.users.insert(user.id, user.clone());
        user
    }

    /// List all users, ordered by id.
    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|user| user.id);
        users
    }

    /// Apply an update to a user record.
    ///
    /// `None` fields mean "no change"; an explicit `active` value, including
    /// `false`, is applied.
    pub fn update_user(
        &mut self,
        user_id: i64,
        hashed_password: Option<String>,
        active: Option<bool>,
    ) -> Result<(), ApiError> {
        let Some(user) = self.users.get_mut(&user_id) else {
            return Err(ApiError::not_found(format!(
                "The user with ID '{user_id}' was not found."
            )));
        };

        if let Some(hash) = hashed_password {
            user.hashed_password = hash;
        }
        if let Some(active) = active {
            user.active = active;
        }

        Ok(())
    }

    pub fn delete_user(&mut self, user_id: i64) -> Result<(), ApiError> {
        if self.users.remove(&user_id).is_some() {
            Ok(())
        } else {
            Err(ApiError::bad_request(format!(
                "The user with user ID '{user_id}' doesn't exist!"
            )))
        }
    }

    // ------------------------------------------------------------------
    // Exit-node exemptions
    // ------------------------------------------------------------------

    pub fn insert_exemption(&mut self, ipaddress: impl Into<String>) -> Result<IpExemption, ApiError> {
        let ipaddress = ipaddress.into();
        if self
            .exemptions
            .values()
            .any(|exemption| exemption.ipaddress == ipaddress)
        {
            return Err(ApiError::bad_request(format!(
                "The IP Address '{ipaddress}' already exists."
            )));
        }

        self.next_exemption_id += 1;
        let exemption = IpExemption {
            id: self.next_exemption_id,
            ipaddress,
        };
        self.exemptions.insert(exemption.id, exemption.clone());
        Ok(exemption)
    }

    /// List all exemptions, ordered by id.
    pub fn list_exemptions(&self) -> Vec<IpExemption> {
        let mut exemptions: Vec<IpExemption> = self.exemptions.values().cloned().collect();
        exemptions.sort_by_key(|exemption| exemption.id);
        exemptions
    }

    pub fn delete_exemption(&mut self, exemption_id: i64) -> Result<(), ApiError> {
        if self.exemptions.remove(&exemption_id).is_some() {
            Ok(())
        } else {
            Err(ApiError::bad_request(format!(
                "The IP Address with ID '{exemption_id}' was not found."
            )))
        }
    }

    // ------------------------------------------------------------------
    // Audit trail
    // ------------------------------------------------------------------

    /// Append one immutable audit record.
    pub fn append_audit_record(&mut self, record: AuditRecord) {
        self.audit_records.push(record);
    }

    pub fn list_audit_records(&self) -> Vec<AuditRecord> {
        self.audit_records.clone()
    }
}
