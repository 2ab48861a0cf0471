// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    audit::{self, AuditRecord},
    models::{
        CreateExemptionRequest, CreateSuperAdminRequest, CreateUserRequest, IpExemption,
        LoginForm, TokenResponse, UpdateUserRequest, UserResponse,
    },
    state::AppState,
};

pub mod admin;
pub mod auditlogs;
pub mod auth;
pub mod tornodes;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/authentication/token", post(auth::login))
        .route(
            "/admin/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route("/admin/users/new-superadmin", post(admin::create_superadmin))
        .route(
            "/admin/users/{user_id}",
            put(admin::update_user).delete(admin::delete_user),
        )
        .route("/logs", get(auditlogs::list_logs))
        .route("/tor-nodes/external-all", get(tornodes::external_exit_nodes))
        .route(
            "/tor-nodes/external-filtered-exemptions",
            get(tornodes::external_exit_nodes_filtered),
        )
        .route(
            "/tor-nodes/exemptions",
            get(tornodes::list_exemptions).post(tornodes::create_exemption),
        )
        .route(
            "/tor-nodes/exemptions/{exemption_id}",
            delete(tornodes::delete_exemption),
        )
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // The audit layer wraps every route above, including the docs UI;
        // documentation paths are skipped inside the middleware itself.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            audit::audit_trail,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        admin::list_users,
        admin::create_user,
        admin::create_superadmin,
        admin::update_user,
        admin::delete_user,
        auditlogs::list_logs,
        tornodes::external_exit_nodes,
        tornodes::external_exit_nodes_filtered,
        tornodes::list_exemptions,
        tornodes::create_exemption,
        tornodes::delete_exemption
    ),
    components(
        schemas(
            LoginForm,
            TokenResponse,
            UserResponse,
            CreateUserRequest,
            CreateSuperAdminRequest,
            UpdateUserRequest,
            IpExemption,
            CreateExemptionRequest,
            AuditRecord
        )
    ),
    tags(
        (name = "Authentication", description = "Token issuance"),
        (name = "Admin", description = "User administration"),
        (name = "Logs", description = "Audit trail"),
        (name = "Tor Nodes", description = "Exit-node lists and exemptions")
    )
)]
struct ApiDoc;
