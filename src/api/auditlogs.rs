// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! Audit log listing endpoint.

use axum::{extract::State, Json};

use crate::{
    audit::AuditRecord,
    auth::{policy, policy::Operation, Auth},
    error::ApiError,
    state::AppState,
};

/// List the full audit trail. Admins and contributors only.
#[utoipa::path(
    get,
    path = "/logs",
    tag = "Logs",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All audit records", body = [AuditRecord]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized (reader role)"),
    )
)]
pub async fn list_logs(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<AuditRecord>>, ApiError> {
    policy::require(&user, Operation::ListAuditLogs)?;

    let store = state.store.read().await;
    Ok(Json(store.list_audit_records()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthenticatedUser, Role};
    use axum::http::StatusCode;
    use chrono::Utc;

    fn caller(role: Role) -> Auth {
        Auth(AuthenticatedUser {
            id: 1,
            username: "caller".to_string(),
            role,
        })
    }

    async fn state_with_record() -> AppState {
        let state = AppState::default();
        state.store.write().await.append_audit_record(AuditRecord {
            username: "anonymous".to_string(),
            method: "POST".to_string(),
            endpoint: "/authentication/token".to_string(),
            host: "localhost".to_string(),
            status_code: 401,
            timestamp: Utc::now(),
        });
        state
    }

    #[tokio::test]
    async fn contributor_lists_records() {
        let state = state_with_record().await;
        let Json(records) = list_logs(caller(Role::Contributor), State(state))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status_code, 401);
    }

    #[tokio::test]
    async fn reader_is_forbidden() {
        let state = state_with_record().await;
        let err = list_logs(caller(Role::Reader), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
