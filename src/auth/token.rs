// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! Access token issuance and validation.
//!
//! Tokens are compact HS256-signed JWTs carrying [`Claims`]. The signing
//! secret is process-wide configuration: loaded once at startup, shared
//! immutably across all request handlers, never rotated at runtime. Both
//! `issue` and `decode` are pure and safe to call concurrently.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use super::error::AuthError;
use super::roles::Role;

/// Fixed lifetime of login-issued tokens.
pub const LOGIN_TOKEN_TTL_MINUTES: i64 = 30;

/// Encoder/decoder for signed access tokens.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec from the symmetric signing secret.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiration is an exact instant, no clock-skew allowance.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a signed token for the given identity, expiring after `ttl`.
    pub fn issue(
        &self,
        username: &str,
        user_id: i64,
        role: Role,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: username.to_string(),
            id: user_id,
            role,
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AuthError::MalformedToken)
    }

    /// Decode and verify a token, returning its claims.
    ///
    /// Fails if the signature does not verify, the encoding is malformed,
    /// or the expiration instant has passed. A payload without a subject
    /// username or id is also rejected, even though `issue` always sets
    /// them.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            }
        })?;

        let claims = data.claims;
        if claims.sub.is_empty() || claims.id == 0 {
            return Err(AuthError::MissingSubject);
        }

        Ok(claims)
    }
}
