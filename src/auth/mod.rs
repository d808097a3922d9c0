// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer token authentication.
//!
//! ## Auth Flow
//!
//! 1. Client sends `Authorization: Bearer <JWT>`
//! 2. The request adapter (middleware, extractor or hook):
//!    - Strips the configured prefix from the configured header
//!    - Verifies algorithm, signature and expiry
//!    - Maps the verified claims to an [`Identity`]
//! 3. The identity is attached to the request and the handler runs
//!
//! Issuance and rotation of access + refresh pairs go through
//! [`TokenManager::issue_pair`] and [`TokenManager::rotate_pair`].
//!
//! ## Security
//!
//! - Only the configured algorithm is accepted; `none` never is
//! - Expired tokens are rejected with no clock skew leeway
//! - Refresh tokens are marked with `type = "refresh"` and are the only
//!   tokens rotation accepts
//! - Every failure is a `401` over HTTP

pub mod claims;
pub mod codec;
pub mod config;
pub mod error;
pub mod extractor;
pub mod hook;
pub mod identity;
pub mod manager;
pub mod middleware;

#[cfg(test)]
pub(crate) mod test_support;

pub use claims::{ClaimValue, ClaimsSet};
pub use codec::{KeyMaterial, SigningMethod, TokenCodec};
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractor::{Auth, OptionalAuth};
pub use hook::{AuthHook, CallContext};
pub use identity::{ClaimsExtractor, DefaultClaimsExtractor, Identity};
pub use manager::{CredentialPair, TokenManager, UserLookup};
pub use middleware::require_auth;
