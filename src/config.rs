// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup and never mutated afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `TOKEN_SECRET` | HMAC-SHA256 signing secret for access tokens | Development fallback |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the token signing secret.
///
/// The secret is loaded once at startup and shared immutably across all
/// request handlers. There is no runtime rotation.
pub const TOKEN_SECRET_ENV: &str = "TOKEN_SECRET";

/// Development fallback signing secret.
///
/// Used when `TOKEN_SECRET` is not set. Deployments must override it.
pub const DEFAULT_TOKEN_SECRET: &str =
    "4de9ea34a3ef5306415f8e5289c2d8998343fb13261944f340e702f02df2bea1";

/// Process-wide configuration, resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Symmetric signing secret for access tokens.
    pub token_secret: String,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var(PORT_ENV)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let token_secret =
            env::var(TOKEN_SECRET_ENV).unwrap_or_else(|_| DEFAULT_TOKEN_SECRET.to_string());

        Self {
            host,
            port,
            token_secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_falls_back_to_defaults() {
        let config = Config::from_env();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(!config.token_secret.is_empty());
    }
}
