// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! Password hashing and credential verification.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use argon2::password_hash::{PasswordHash, SaltString};

use crate::models::User;
use crate::store::InMemoryStore;

use super::error::AuthError;

/// Hash a plaintext password into a PHC-format argon2 string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|_| AuthError::InvalidCredentials)?;
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|_| AuthError::InvalidCredentials)?;

    let argon2 = Argon2::default();
    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::InvalidCredentials)?
        .to_string();

    Ok(phc)
}

/// Verify a plaintext password against a stored PHC hash.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Verify a username/password pair against stored identities.
///
/// Username lookup is exact-match. An unknown username and a wrong password
/// produce the same [`AuthError::InvalidCredentials`], so the two cases are
/// indistinguishable to the caller. Read-only: no record is mutated, and the
/// returned identity is a clone that the caller must not leak the hash from.
pub fn authenticate(
    store: &InMemoryStore,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let user = store
        .find_user_by_username(username)
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(&user.hashed_password, password) {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user.clone())
}
