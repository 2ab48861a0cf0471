// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! User administration endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{credentials::hash_password, policy, policy::Operation, Auth, Role},
    error::ApiError,
    models::{CreateSuperAdminRequest, CreateUserRequest, UpdateUserRequest, UserResponse},
    state::AppState,
};

/// Username reserved for the one-time bootstrap account.
pub const SUPERADMIN_USERNAME: &str = "SuperAdmin";

/// List user accounts.
///
/// Admins see every account; contributors and readers see only their own
/// record. Password hashes are never included.
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Visible user accounts", body = [UserResponse]),
        (status = 401, description = "Not authenticated"),
    )
)]
pub async fn list_users(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    policy::require(&user, Operation::ListUsers)?;

    let store = state.store.read().await;
    let users = if user.is_admin() {
        store.list_users().iter().map(UserResponse::from).collect()
    } else {
        // Non-admins are scoped to their own record.
        store
            .get_user(user.id)
            .map(UserResponse::from)
            .into_iter()
            .collect()
    };

    Ok(Json(users))
}

/// Create a new user account. Admin only.
#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "Admin",
    security(("bearer" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Invalid role or duplicate username"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized (admin required)"),
    )
)]
pub async fn create_user(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<StatusCode, ApiError> {
    policy::require(&user, Operation::CreateUser)?;

    let Some(role) = Role::from_str(&request.role) else {
        return Err(ApiError::bad_request(format!(
            "The role '{}' is invalid. Only 'Admin', 'Contributor' or 'Reader' are available!",
            request.role
        )));
    };

    let mut store = state.store.write().await;
    if store.username_taken(&request.username) {
        return Err(ApiError::bad_request(format!(
            "The user with username '{}' already exists!",
            request.username
        )));
    }

    let hash = hash_password(&request.password)?;
    // New accounts are always stored active, whatever the request says.
    store.insert_user(&request.username, hash, role, true);

    Ok(StatusCode::CREATED)
}

/// One-time bootstrap of the superadmin account.
///
/// Runs unauthenticated, since no privileged identity exists yet. The
/// existence check is storage state, not a role check, and makes a second
/// attempt fail with a conflict.
#[utoipa::path(
    post,
    path = "/admin/users/new-superadmin",
    tag = "Admin",
    request_body = CreateSuperAdminRequest,
    responses(
        (status = 201, description = "Superadmin created"),
        (status = 409, description = "The superadmin already exists"),
    )
)]
pub async fn create_superadmin(
    State(state): State<AppState>,
    Json(request): Json<CreateSuperAdminRequest>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    if store.username_taken(SUPERADMIN_USERNAME) {
        return Err(ApiError::conflict(
            "The SuperAdmin has already been created.",
        ));
    }

    let hash = hash_password(&request.password)?;
    store.insert_user(SUPERADMIN_USERNAME, hash, Role::Admin, true);

    Ok(StatusCode::CREATED)
}

/// Update a user account.
///
/// Admins may update anyone; contributors and readers only themselves.
/// Unset fields mean "no change"; an explicit `active: false` is applied.
#[utoipa::path(
    put,
    path = "/admin/users/{user_id}",
    tag = "Admin",
    security(("bearer" = [])),
    request_body = UpdateUserRequest,
    params(("user_id" = i64, Path, description = "The ID of the user")),
    responses(
        (status = 204, description = "User updated"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized for this record"),
        (status = 404, description = "Unknown user id"),
    )
)]
pub async fn update_user(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    policy::require_update(&user, user_id)?;

    // Empty password strings mean "no change", same as unset.
    let hash = match request.password.as_deref() {
        Some(password) if !password.is_empty() => Some(hash_password(password)?),
        _ => None,
    };

    let mut store = state.store.write().await;
    store.update_user(user_id, hash, request.active)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user account. Admin only.
#[utoipa::path(
    delete,
    path = "/admin/users/{user_id}",
    tag = "Admin",
    security(("bearer" = [])),
    params(("user_id" = i64, Path, description = "The ID of the user")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Unknown user id"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized (admin required)"),
    )
)]
pub async fn delete_user(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    policy::require(&user, Operation::DeleteUser)?;

    let mut store = state.store.write().await;
    store.delete_user(user_id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{credentials::verify_password, AuthenticatedUser};

    fn caller(role: Role, id: i64) -> Auth {
        Auth(AuthenticatedUser {
            id,
            username: format!("caller_{id}"),
            role,
        })
    }

    async fn seed_user(state: &AppState, username: &str, role: Role) -> i64 {
        state
            .store
            .write()
            .await
            .insert_user(username, "hash".to_string(), role, true)
            .id
    }

    #[tokio::test]
    async fn admin_lists_all_users() {
        let state = AppState::default();
        seed_user(&state, "first", Role::Reader).await;
        seed_user(&state, "second", Role::Contributor).await;

        let Json(users) = list_users(caller(Role::Admin, 99), State(state))
            .await
            .unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn non_admin_sees_only_own_record() {
        let state = AppState::default();
        let own_id = seed_user(&state, "reader", Role::Reader).await;
        seed_user(&state, "other", Role::Contributor).await;

        let Json(users) = list_users(caller(Role::Reader, own_id), State(state))
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "reader");
    }

    #[tokio::test]
    async fn create_user_requires_admin() {
        let state = AppState::default();
        let request = CreateUserRequest {
            username: "newbie".to_string(),
            password: "pw".to_string(),
            role: "reader".to_string(),
            active: true,
        };

        let err = create_user(
            caller(Role::Contributor, 1),
            State(state),
            Json(request),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn create_user_validates_role_and_uniqueness() {
        let state = AppState::default();
        seed_user(&state, "taken", Role::Reader).await;

        let bad_role = create_user(
            caller(Role::Admin, 1),
            State(state.clone()),
            Json(CreateUserRequest {
                username: "newbie".to_string(),
                password: "pw".to_string(),
                role: "superuser".to_string(),
                active: true,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);

        let duplicate = create_user(
            caller(Role::Admin, 1),
            State(state),
            Json(CreateUserRequest {
                username: "taken".to_string(),
                password: "pw".to_string(),
                role: "reader".to_string(),
                active: true,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_user_stores_hashed_password() {
        let state = AppState::default();

        let status = create_user(
            caller(Role::Admin, 1),
            State(state.clone()),
            Json(CreateUserRequest {
                username: "newbie".to_string(),
                password: "supersecret".to_string(),
                role: "contributor".to_string(),
                active: true,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let store = state.store.read().await;
        let user = store.find_user_by_username("newbie").unwrap();
        assert_eq!(user.role, Role::Contributor);
        assert!(user.active);
        assert_ne!(user.hashed_password, "supersecret");
        assert!(verify_password(&user.hashed_password, "supersecret"));
    }

    #[tokio::test]
    async fn superadmin_bootstrap_succeeds_once() {
        let state = AppState::default();

        let first = create_superadmin(
            State(state.clone()),
            Json(CreateSuperAdminRequest {
                password: "supersecret".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(first, StatusCode::CREATED);

        let second = create_superadmin(
            State(state.clone()),
            Json(CreateSuperAdminRequest {
                password: "different".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(second.status, StatusCode::CONFLICT);

        // The first identity is unchanged.
        let store = state.store.read().await;
        let superadmin = store.find_user_by_username(SUPERADMIN_USERNAME).unwrap();
        assert_eq!(superadmin.role, Role::Admin);
        assert!(verify_password(&superadmin.hashed_password, "supersecret"));
    }

    #[tokio::test]
    async fn update_applies_explicit_inactive_flag() {
        let state = AppState::default();
        let id = seed_user(&state, "target", Role::Reader).await;

        let status = update_user(
            caller(Role::Admin, 1),
            State(state.clone()),
            Path(id),
            Json(UpdateUserRequest {
                password: None,
                active: Some(false),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        assert!(!state.store.read().await.get_user(id).unwrap().active);
    }

    #[tokio::test]
    async fn update_ignores_empty_password() {
        let state = AppState::default();
        let id = seed_user(&state, "target", Role::Reader).await;

        update_user(
            caller(Role::Admin, 1),
            State(state.clone()),
            Path(id),
            Json(UpdateUserRequest {
                password: Some(String::new()),
                active: None,
            }),
        )
        .await
        .unwrap();

        let store = state.store.read().await;
        let user = store.get_user(id).unwrap();
        assert_eq!(user.hashed_password, "hash");
        assert!(user.active);
    }

    #[tokio::test]
    async fn reader_updates_own_record_but_not_others() {
        let state = AppState::default();
        let own_id = seed_user(&state, "reader", Role::Reader).await;
        let other_id = seed_user(&state, "other", Role::Reader).await;

        let own = update_user(
            caller(Role::Reader, own_id),
            State(state.clone()),
            Path(own_id),
            Json(UpdateUserRequest {
                password: Some("newpassword".to_string()),
                active: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(own, StatusCode::NO_CONTENT);

        let other = update_user(
            caller(Role::Reader, own_id),
            State(state),
            Path(other_id),
            Json(UpdateUserRequest::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(other.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn delete_requires_admin_and_known_id() {
        let state = AppState::default();
        let id = seed_user(&state, "target", Role::Reader).await;

        let forbidden = delete_user(caller(Role::Reader, 5), State(state.clone()), Path(id))
            .await
            .unwrap_err();
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

        let deleted = delete_user(caller(Role::Admin, 1), State(state.clone()), Path(id))
            .await
            .unwrap();
        assert_eq!(deleted, StatusCode::NO_CONTENT);

        let missing = delete_user(caller(Role::Admin, 1), State(state), Path(id))
            .await
            .unwrap_err();
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    }
}
