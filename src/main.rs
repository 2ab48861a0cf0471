// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use torgate::api::router;
use torgate::auth::TokenCodec;
use torgate::config::Config;
use torgate::state::AppState;
use torgate::store::InMemoryStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    // The signing secret is loaded once here and shared immutably across
    // all request handlers for the lifetime of the process.
    let codec = TokenCodec::new(&config.token_secret);
    let state = AppState::new(InMemoryStore::new(), codec);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Torgate server listening on http://{addr} (docs at /docs)");

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .expect("HTTP server failed");
}
