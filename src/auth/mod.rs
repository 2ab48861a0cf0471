// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Torgate Contributors

//! # Authentication and Authorization
//!
//! This module is the security backbone of the API.
//!
//! ## Auth Flow
//!
//! 1. Client posts username/password to `/authentication/token`
//! 2. [`credentials::authenticate`] verifies the pair against stored
//!    identities (argon2, exact-match username)
//! 3. [`token::TokenCodec`] issues a signed HS256 token with a fixed
//!    30-minute lifetime
//! 4. Subsequent requests send `Authorization: Bearer <token>`; the
//!    [`extractor::Auth`] extractor decodes it into an
//!    [`AuthenticatedUser`]
//! 5. Handlers gate each operation through the table-driven
//!    [`policy`] module
//!
//! ## Security
//!
//! - Tokens are stateless: validity is signature + expiration, nothing
//!   server-side
//! - Credential failures are indistinguishable (no username enumeration)
//! - The signing secret is immutable after startup

pub mod claims;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod policy;
pub mod roles;
pub mod token;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::Auth;
pub use roles::Role;
pub use token::TokenCodec;
