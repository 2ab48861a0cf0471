// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! Tor exit-node endpoints: the external block list and local exemptions.

use std::net::IpAddr;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{policy, policy::Operation, Auth},
    error::ApiError,
    models::{CreateExemptionRequest, IpExemption},
    state::AppState,
};

/// External source of Tor exit-node addresses.
///
/// The source rate-limits to one fetch every 30 minutes.
pub const EXIT_NODE_LIST_URL: &str = "https://www.dan.me.uk/torlist/?exit";

/// Failure while fetching the external exit-node list.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to the external source failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("the external source rejected the request")]
    Upstream,
}

impl From<FetchError> for ApiError {
    fn from(_: FetchError) -> Self {
        ApiError::forbidden(
            "The external sources only allows you to get the data once every 30 minutes.",
        )
    }
}

/// Fetch the raw exit-node list from the external source, one address per line.
async fn fetch_exit_nodes(client: &reqwest::Client) -> Result<Vec<String>, FetchError> {
    let response = client.get(EXIT_NODE_LIST_URL).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Upstream);
    }

    let body = response.text().await?;
    Ok(body.split('\n').map(str::to_string).collect())
}

/// Remove each exempted address from the node list (first occurrence).
fn remove_exemptions(mut nodes: Vec<String>, exemptions: &[IpExemption]) -> Vec<String> {
    for exemption in exemptions {
        if let Some(position) = nodes.iter().position(|node| node == &exemption.ipaddress) {
            nodes.remove(position);
        }
    }
    nodes
}

/// Fetch the exit-node list from the external source.
#[utoipa::path(
    get,
    path = "/tor-nodes/external-all",
    tag = "Tor Nodes",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Exit-node addresses", body = [String]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "External source refused the request"),
    )
)]
pub async fn external_exit_nodes(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    policy::require(&user, Operation::FetchExternalNodes)?;

    let nodes = fetch_exit_nodes(&state.http).await?;
    Ok(Json(nodes))
}

/// Fetch the exit-node list with exempted addresses removed.
#[utoipa::path(
    get,
    path = "/tor-nodes/external-filtered-exemptions",
    tag = "Tor Nodes",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Exit-node addresses minus exemptions", body = [String]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "External source refused the request"),
    )
)]
pub async fn external_exit_nodes_filtered(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    policy::require(&user, Operation::FetchExternalNodes)?;

    let nodes = fetch_exit_nodes(&state.http).await?;
    let exemptions = state.store.read().await.list_exemptions();
    Ok(Json(remove_exemptions(nodes, &exemptions)))
}

/// List all exit-node exemptions.
#[utoipa::path(
    get,
    path = "/tor-nodes/exemptions",
    tag = "Tor Nodes",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All exemptions", body = [IpExemption]),
        (status = 401, description = "Not authenticated"),
    )
)]
pub async fn list_exemptions(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<IpExemption>>, ApiError> {
    policy::require(&user, Operation::ListExemptions)?;

    let store = state.store.read().await;
    Ok(Json(store.list_exemptions()))
}

/// Add an exit-node exemption. Admins and contributors only.
#[utoipa::path(
    post,
    path = "/tor-nodes/exemptions",
    tag = "Tor Nodes",
    security(("bearer" = [])),
    request_body = CreateExemptionRequest,
    responses(
        (status = 201, description = "Exemption created"),
        (status = 400, description = "Invalid or duplicate IP address"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized (reader role)"),
    )
)]
pub async fn create_exemption(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateExemptionRequest>,
) -> Result<StatusCode, ApiError> {
    policy::require(&user, Operation::CreateExemption)?;

    if request.ipaddress.parse::<IpAddr>().is_err() {
        return Err(ApiError::bad_request(format!(
            "The IP Address '{}' is invalid.",
            request.ipaddress
        )));
    }

    let mut store = state.store.write().await;
    store.insert_exemption(&request.ipaddress)?;

    Ok(StatusCode::CREATED)
}

/// Remove an exit-node exemption. Admins and contributors only.
#[utoipa::path(
    delete,
    path = "/tor-nodes/exemptions/{exemption_id}",
    tag = "Tor Nodes",
    security(("bearer" = [])),
    params(("exemption_id" = i64, Path, description = "The exemption ID")),
    responses(
        (status = 204, description = "Exemption deleted"),
        (status = 400, description = "Unknown exemption id"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized (reader role)"),
    )
)]
pub async fn delete_exemption(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(exemption_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    policy::require(&user, Operation::DeleteExemption)?;

    let mut store = state.store.write().await;
    store.delete_exemption(exemption_id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthenticatedUser, Role};

    fn caller(role: Role) -> Auth {
        Auth(AuthenticatedUser {
            id: 1,
            username: "caller".to_string(),
            role,
        })
    }

    fn exemption(id: i64, ipaddress: &str) -> IpExemption {
        IpExemption {
            id,
            ipaddress: ipaddress.to_string(),
        }
    }

    #[test]
    fn remove_exemptions_drops_matching_addresses() {
        let nodes = vec![
            "1.1.1.1".to_string(),
            "2.2.2.2".to_string(),
            "3.3.3.3".to_string(),
        ];
        let exemptions = [exemption(1, "2.2.2.2"), exemption(2, "9.9.9.9")];

        let filtered = remove_exemptions(nodes, &exemptions);
        assert_eq!(filtered, vec!["1.1.1.1".to_string(), "3.3.3.3".to_string()]);
    }

    #[test]
    fn fetch_error_maps_to_forbidden() {
        let err: ApiError = FetchError::Upstream.into();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn create_exemption_validates_the_address() {
        let state = AppState::default();

        let err = create_exemption(
            caller(Role::Contributor),
            State(state.clone()),
            Json(CreateExemptionRequest {
                ipaddress: "not-an-ip".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let created = create_exemption(
            caller(Role::Contributor),
            State(state.clone()),
            Json(CreateExemptionRequest {
                ipaddress: "8.8.8.8".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(created, StatusCode::CREATED);

        let duplicate = create_exemption(
            caller(Role::Admin),
            State(state),
            Json(CreateExemptionRequest {
                ipaddress: "8.8.8.8".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ipv6_addresses_are_accepted() {
        let state = AppState::default();
        let created = create_exemption(
            caller(Role::Admin),
            State(state),
            Json(CreateExemptionRequest {
                ipaddress: "2001:db8::1".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(created, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn reader_cannot_modify_exemptions() {
        let state = AppState::default();

        let create = create_exemption(
            caller(Role::Reader),
            State(state.clone()),
            Json(CreateExemptionRequest {
                ipaddress: "8.8.8.8".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(create.status, StatusCode::FORBIDDEN);

        let delete = delete_exemption(caller(Role::Reader), State(state), Path(1))
            .await
            .unwrap_err();
        assert_eq!(delete.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn list_and_delete_round_trip() {
        let state = AppState::default();
        state
            .store
            .write()
            .await
            .insert_exemption("8.8.8.8")
            .unwrap();

        let Json(exemptions) = list_exemptions(caller(Role::Reader), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(exemptions.len(), 1);

        let deleted = delete_exemption(
            caller(Role::Contributor),
            State(state.clone()),
            Path(exemptions[0].id),
        )
        .await
        .unwrap();
        assert_eq!(deleted, StatusCode::NO_CONTENT);

        let missing = delete_exemption(caller(Role::Admin), State(state), Path(42))
            .await
            .unwrap_err();
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    }
}
