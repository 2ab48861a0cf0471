// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! Authentication endpoint.

use axum::{extract::State, Form, Json};
use chrono::Duration;

use crate::{
    auth::{credentials, token::LOGIN_TOKEN_TTL_MINUTES, AuthError},
    models::{LoginForm, TokenResponse},
    state::AppState,
};

/// Issue a bearer token for a username/password pair.
///
/// The request body is form-encoded (OAuth2 password flow style). Failures
/// are a generic 401 regardless of whether the username or the password was
/// wrong.
#[utoipa::path(
    post,
    path = "/authentication/token",
    tag = "Authentication",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Bearer token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AuthError> {
    let store = state.store.read().await;
    let user = credentials::authenticate(&store, &form.username, &form.password)?;
    drop(store);

    let token = state.codec.issue(
        &user.username,
        user.id,
        user.role,
        Duration::minutes(LOGIN_TOKEN_TTL_MINUTES),
    )?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
    }))
}
