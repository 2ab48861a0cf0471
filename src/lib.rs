// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! Torgate - Tor Exit-Node Administration API
//!
//! This crate provides an administrative HTTP API for managing Tor
//! exit-node exemptions, fronted by stateless token authentication,
//! role-based authorization and a per-request audit trail.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `audit` - Request/response audit interception
//! - `auth` - Authentication and authorization (HS256 tokens, role policy)
//! - `store` - In-memory repository for users, exemptions and audit records

pub mod api;
pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
