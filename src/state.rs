// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenCodec;
use crate::config;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// The token codec is immutable after startup; the store is the only shared
/// mutable state, guarded by a single read/write lock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub codec: Arc<TokenCodec>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(store: InMemoryStore, codec: TokenCodec) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            codec: Arc::new(codec),
            http: reqwest::Client::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            InMemoryStore::new(),
            TokenCodec::new(config::DEFAULT_TOKEN_SECRET),
        )
    }
}
