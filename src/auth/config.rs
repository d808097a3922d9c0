// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication configuration.
//!
//! Built once at startup by layering overrides onto defaults, then frozen
//! inside a [`TokenManager`](super::TokenManager).

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::AUTHORIZATION;

use super::codec::{KeyMaterial, SigningMethod};
use super::identity::{ClaimsExtractor, DefaultClaimsExtractor};
use super::AuthError;
use crate::config::{
    AUTH_ACCESS_TTL_SECS_ENV, AUTH_HEADER_ENV, AUTH_HEADER_PREFIX_ENV, AUTH_PRIVATE_KEY_PATH_ENV,
    AUTH_PUBLIC_KEY_PATH_ENV, AUTH_REFRESH_ENABLED_ENV, AUTH_REFRESH_TTL_SECS_ENV, AUTH_SECRET_ENV,
    AUTH_SIGNING_METHOD_ENV,
};

/// Default access token lifetime (15 minutes).
pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(15 * 60);

/// Default refresh token lifetime (7 days).
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default credential header prefix.
pub const DEFAULT_HEADER_PREFIX: &str = "Bearer ";

/// Authentication configuration.
#[derive(Clone)]
pub struct AuthConfig {
    pub(crate) method: SigningMethod,
    pub(crate) keys: KeyMaterial,
    pub(crate) access_ttl: Duration,
    pub(crate) refresh_ttl: Duration,
    pub(crate) refresh_enabled: bool,
    pub(crate) header_name: String,
    pub(crate) header_prefix: String,
    pub(crate) extractor: Arc<dyn ClaimsExtractor>,
}

impl AuthConfig {
    /// Create a configuration for `method` with the given key material and
    /// default policy.
    pub fn new(method: SigningMethod, keys: KeyMaterial) -> Self {
        Self {
            method,
            keys,
            access_ttl: DEFAULT_ACCESS_TTL,
            refresh_ttl: DEFAULT_REFRESH_TTL,
            refresh_enabled: false,
            header_name: AUTHORIZATION.as_str().to_string(),
            header_prefix: DEFAULT_HEADER_PREFIX.to_string(),
            extractor: Arc::new(DefaultClaimsExtractor),
        }
    }

    /// HS256 with a shared secret.
    pub fn hmac(secret: impl Into<Vec<u8>>) -> Self {
        Self::new(SigningMethod::HS256, KeyMaterial::Secret(secret.into()))
    }

    /// RS256 with PEM keys. Pass `None` for the private key on verify-only
    /// deployments.
    pub fn rsa(public_pem: impl Into<Vec<u8>>, private_pem: Option<Vec<u8>>) -> Self {
        Self::new(
            SigningMethod::RS256,
            KeyMaterial::Rsa {
                public_pem: public_pem.into(),
                private_pem,
            },
        )
    }

    /// Override the signing method within the key material's family.
    pub fn with_method(mut self, method: SigningMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Enable issuance and rotation of credential pairs.
    pub fn with_refresh(mut self, enabled: bool) -> Self {
        self.refresh_enabled = enabled;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>) -> Self {
        self.header_name = name.into();
        self
    }

    /// Set the literal prefix stripped from the header value, e.g. `"Bearer "`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.header_prefix = prefix.into();
        self
    }

    /// Replace the default claims-to-identity strategy.
    pub fn with_claims_extractor(mut self, extractor: impl ClaimsExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    pub fn method(&self) -> SigningMethod {
        self.method
    }

    pub fn refresh_enabled(&self) -> bool {
        self.refresh_enabled
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Key files named by path variables are read from disk.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let method = match lookup(AUTH_SIGNING_METHOD_ENV) {
            Some(value) => value.parse()?,
            None => SigningMethod::default(),
        };

        let keys = if method.is_hmac() {
            let secret = lookup(AUTH_SECRET_ENV)
                .ok_or_else(|| AuthError::config(format!("{AUTH_SECRET_ENV} is required for {method}")))?;
            KeyMaterial::Secret(secret.into_bytes())
        } else {
            let public_path = lookup(AUTH_PUBLIC_KEY_PATH_ENV).ok_or_else(|| {
                AuthError::config(format!("{AUTH_PUBLIC_KEY_PATH_ENV} is required for {method}"))
            })?;
            let private_pem = lookup(AUTH_PRIVATE_KEY_PATH_ENV)
                .map(|path| read_key_file(&path))
                .transpose()?;
            KeyMaterial::Rsa {
                public_pem: read_key_file(&public_path)?,
                private_pem,
            }
        };

        let mut config = Self::new(method, keys);

        if let Some(secs) = lookup(AUTH_ACCESS_TTL_SECS_ENV) {
            config.access_ttl = parse_secs(AUTH_ACCESS_TTL_SECS_ENV, &secs)?;
        }
        if let Some(secs) = lookup(AUTH_REFRESH_TTL_SECS_ENV) {
            config.refresh_ttl = parse_secs(AUTH_REFRESH_TTL_SECS_ENV, &secs)?;
        }
        if let Some(flag) = lookup(AUTH_REFRESH_ENABLED_ENV) {
            config.refresh_enabled = parse_flag(AUTH_REFRESH_ENABLED_ENV, &flag)?;
        }
        if let Some(name) = lookup(AUTH_HEADER_ENV) {
            config.header_name = name;
        }
        if let Some(prefix) = lookup(AUTH_HEADER_PREFIX_ENV) {
            config.header_prefix = prefix;
        }

        Ok(config)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("method", &self.method)
            .field("keys", &self.keys)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("refresh_enabled", &self.refresh_enabled)
            .field("header_name", &self.header_name)
            .field("header_prefix", &self.header_prefix)
            .finish_non_exhaustive()
    }
}

fn read_key_file(path: &str) -> Result<Vec<u8>, AuthError> {
    std::fs::read(path).map_err(|e| AuthError::config(format!("failed to read key file {path}: {e}")))
}

fn parse_secs(name: &str, value: &str) -> Result<Duration, AuthError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| AuthError::config(format!("{name} must be a whole number of seconds")))
}

fn parse_flag(name: &str, value: &str) -> Result<bool, AuthError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AuthError::config(format!("{name} must be true or false"))),
    }
}
