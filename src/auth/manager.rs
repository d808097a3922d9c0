// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token lifecycle: request extraction, authentication, issuance and
//! rotation of credential pairs.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, HeaderName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::claims::{
    ClaimsSet, CLAIM_EMAIL, CLAIM_EXPIRES_AT, CLAIM_ISSUED_AT, CLAIM_ROLES, CLAIM_SUBJECT,
    CLAIM_TYPE, CLAIM_USER_ID, REFRESH_TOKEN_TYPE,
};
use super::codec::{unix_now, SigningMethod, TokenCodec};
use super::identity::{ClaimsExtractor, Identity};
use super::{AuthConfig, AuthError};

/// Access + refresh tokens issued together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CredentialPair {
    /// Short-lived token for authenticating requests
    pub access_token: String,
    /// Longer-lived token accepted only by rotation
    pub refresh_token: String,
    /// Expiry of the access token (RFC 3339)
    pub expires_at: DateTime<Utc>,
}

/// Looks up the current state of an account during rotation.
///
/// Implementations return the full identity for a still-valid account, or
/// `None` when the account is gone or disabled. They are called on the
/// request path and own their own timeout behaviour.
pub trait UserLookup: Send + Sync {
    fn fetch_user(&self, user_id: &str) -> Option<Identity>;
}

/// Verifies and issues tokens according to a frozen [`AuthConfig`].
pub struct TokenManager {
    codec: TokenCodec,
    extractor: Arc<dyn ClaimsExtractor>,
    header_name: HeaderName,
    header_prefix: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
    refresh_enabled: bool,
}

impl TokenManager {
    /// Validate `config` and resolve its keys.
    ///
    /// Returns [`AuthError::Configuration`] for unusable key material, an
    /// invalid header name, or issuance enabled without a signing key.
    pub fn new(config: AuthConfig) -> Result<Self, AuthError> {
        let codec = TokenCodec::new(config.method, &config.keys)?;

        let header_name = HeaderName::from_bytes(config.header_name.as_bytes()).map_err(|_| {
            AuthError::config(format!("invalid credential header name '{}'", config.header_name))
        })?;

        if config.refresh_enabled && !codec.can_sign() {
            return Err(AuthError::config(format!(
                "issuance is enabled but no {} signing key is configured",
                config.method
            )));
        }

        tracing::info!(
            method = %config.method,
            header = %header_name,
            access_ttl_secs = config.access_ttl.as_secs(),
            issuance = config.refresh_enabled,
            "Token manager initialized"
        );

        Ok(Self {
            codec,
            extractor: config.extractor,
            header_name,
            header_prefix: config.header_prefix,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
            refresh_enabled: config.refresh_enabled,
        })
    }

    pub fn signing_method(&self) -> SigningMethod {
        self.codec.method()
    }

    pub fn issuance_enabled(&self) -> bool {
        self.refresh_enabled
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Raw token from the configured header.
    ///
    /// `None` when the header is absent or not valid UTF-8, when the value
    /// does not start with the configured prefix (case-sensitive), or when
    /// nothing follows the prefix.
    pub fn extract_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        let value = headers.get(&self.header_name)?.to_str().ok()?;
        let token = value.strip_prefix(self.header_prefix.as_str())?;
        (!token.is_empty()).then_some(token)
    }

    /// Authenticate the request carrying `headers`.
    ///
    /// Any verified token is accepted, refresh tokens included. A refresh
    /// token carries no email or roles, so it yields an identity with an
    /// empty profile. Install a [`ClaimsExtractor`] that rejects
    /// [`ClaimsSet::is_refresh`] claims to keep refresh tokens off this path.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        let token = self.extract_token(headers).ok_or(AuthError::TokenMissing)?;
        self.identify(token)
    }

    /// Verify a raw token and derive its identity.
    pub fn identify(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.codec.verify(token)?;
        self.extractor.extract(&claims)
    }

    /// Issue a fresh access + refresh pair for `identity`.
    pub fn issue_pair(&self, identity: &Identity) -> Result<CredentialPair, AuthError> {
        if !self.refresh_enabled {
            return Err(AuthError::config("credential issuance is disabled"));
        }

        let issued_at = unix_now();
        let access_exp = issued_at + ttl_secs(self.access_ttl);
        let refresh_exp = issued_at + ttl_secs(self.refresh_ttl);

        let access_claims = ClaimsSet::new()
            .with(CLAIM_USER_ID, identity.user_id())
            .with(CLAIM_SUBJECT, identity.user_id())
            .with(CLAIM_EMAIL, identity.email())
            .with(
                CLAIM_ROLES,
                identity.roles().iter().cloned().collect::<Vec<String>>(),
            )
            .with(CLAIM_ISSUED_AT, issued_at)
            .with(CLAIM_EXPIRES_AT, access_exp);

        // Rotation credential only: no email or roles.
        let refresh_claims = ClaimsSet::new()
            .with(CLAIM_USER_ID, identity.user_id())
            .with(CLAIM_SUBJECT, identity.user_id())
            .with(CLAIM_ISSUED_AT, issued_at)
            .with(CLAIM_EXPIRES_AT, refresh_exp)
            .with(CLAIM_TYPE, REFRESH_TOKEN_TYPE);

        let access_token = self.codec.sign(&access_claims)?;
        let refresh_token = self.codec.sign(&refresh_claims)?;

        let expires_at = DateTime::from_timestamp(access_exp, 0)
            .ok_or_else(|| AuthError::config("access token expiry out of range"))?;

        tracing::info!(user_id = %identity.user_id(), %expires_at, "Issued credential pair");

        Ok(CredentialPair {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    /// Exchange a refresh token for a new pair.
    ///
    /// The new pair carries only the user identifier: email and roles are
    /// not part of a refresh token and this manager has no user store. Use
    /// [`rotate_pair_with`](Self::rotate_pair_with) to restore them from an
    /// account lookup.
    pub fn rotate_pair(&self, refresh_token: &str) -> Result<CredentialPair, AuthError> {
        let user_id = self.verify_refresh(refresh_token)?;
        self.issue_pair(&Identity::new(user_id))
    }

    /// Exchange a refresh token for a new pair, re-reading the account
    /// through `users` between verification and issuance.
    pub fn rotate_pair_with(
        &self,
        refresh_token: &str,
        users: &dyn UserLookup,
    ) -> Result<CredentialPair, AuthError> {
        let user_id = self.verify_refresh(refresh_token)?;
        let identity = users.fetch_user(&user_id).ok_or_else(|| {
            tracing::debug!(%user_id, "Refresh token subject no longer resolves to an account");
            AuthError::UserNotFound
        })?;
        self.issue_pair(&identity)
    }

    /// Verify a refresh token and return its `user_id`.
    fn verify_refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        if !self.refresh_enabled {
            return Err(AuthError::config("credential issuance is disabled"));
        }

        let claims = self.codec.verify(refresh_token)?;
        if !claims.is_refresh() {
            return Err(AuthError::NotARefreshToken);
        }

        match claims.get_str(CLAIM_USER_ID) {
            Some(user_id) if !user_id.is_empty() => Ok(user_id.to_string()),
            _ => Err(AuthError::InvalidClaims),
        }
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("codec", &self.codec)
            .field("header_name", &self.header_name)
            .field("header_prefix", &self.header_prefix)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("refresh_enabled", &self.refresh_enabled)
            .finish_non_exhaustive()
    }
}

fn ttl_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX / 2)
}
