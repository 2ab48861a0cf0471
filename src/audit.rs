// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! Audit trail middleware.
//!
//! Every inbound request is wrapped by [`audit_trail`], which appends one
//! [`AuditRecord`] after the handler has produced its response. The record
//! attributes the call to the bearer-token identity when one can be decoded
//! and to `"anonymous"` otherwise; auditing never rejects a request and
//! never alters the response the caller sees. Requests for the interactive
//! documentation assets are excluded.

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, HOST},
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::TokenCodec;
use crate::state::AppState;

/// Identity recorded when no valid bearer token accompanies a request.
pub const ANONYMOUS: &str = "anonymous";

/// Paths that never generate an audit record.
pub const EXCLUDED_PATHS: &[&str] = &["/docs", "/favicon.ico", "/api-doc/openapi.json"];

/// One immutable log entry per inbound request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditRecord {
    /// Caller's username, or `"anonymous"`.
    pub username: String,
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub endpoint: String,
    /// Request hostname.
    pub host: String,
    /// Response status code.
    pub status_code: u16,
    /// Server-assigned creation time.
    pub timestamp: DateTime<Utc>,
}

/// Resolve the caller's username from the request headers.
///
/// This function cannot fail: a missing, malformed, mis-signed or expired
/// token all resolve to [`ANONYMOUS`]. Auditing must never abort or alter
/// the response because of an auditing-internal error.
pub fn resolve_identity(codec: &TokenCodec, headers: &HeaderMap) -> String {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.rsplit(' ').next());

    match token.map(|token| codec.decode(token)) {
        Some(Ok(claims)) => claims.sub,
        _ => ANONYMOUS.to_string(),
    }
}

/// Middleware wrapping the full lifetime of a request.
///
/// The response streams through byte-identical; the audit append is a
/// strictly observational side channel running after the status code is
/// known.
pub async fn audit_trail(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let endpoint = request.uri().path().to_string();
    let host = request
        .headers()
        .get(HOST)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.split(':').next())
        .unwrap_or_default()
        .to_string();
    let username = resolve_identity(&state.codec, request.headers());

    let response = next.run(request).await;

    if EXCLUDED_PATHS.contains(&endpoint.as_str()) {
        return response;
    }

    let record = AuditRecord {
        username,
        method,
        endpoint,
        host,
        status_code: response.status().as_u16(),
        timestamp: Utc::now(),
    };

    tracing::debug!(
        username = %record.username,
        method = %record.method,
        endpoint = %record.endpoint,
        status = record.status_code,
        "audit record",
    );

    // The in-memory append completes synchronously and cannot block on I/O;
    // the already-computed response flows through regardless.
    state.store.write().await.append_audit_record(record);

    response
}
