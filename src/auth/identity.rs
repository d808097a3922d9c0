// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authenticated identity and the strategies that derive it from claims.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::claims::{ClaimValue, ClaimsSet, CLAIM_EMAIL, CLAIM_ROLES, CLAIM_SUBJECT, CLAIM_USER_ID};
use super::AuthError;

/// The principal a verified token speaks for.
///
/// Handlers read it from request extensions (see [`Auth`](super::Auth));
/// it is rebuilt from the token on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    /// Opaque user identifier
    user_id: String,

    /// Contact email, empty when the token carries none
    #[serde(default)]
    email: String,

    /// Role names (unordered)
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    roles: BTreeSet<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: String::new(),
            roles: BTreeSet::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// Maps verified claims to an [`Identity`].
///
/// Install a custom strategy with
/// [`AuthConfig::with_claims_extractor`](super::AuthConfig::with_claims_extractor).
/// Closures of the right shape implement this trait.
pub trait ClaimsExtractor: Send + Sync {
    fn extract(&self, claims: &ClaimsSet) -> Result<Identity, AuthError>;
}

impl<F> ClaimsExtractor for F
where
    F: Fn(&ClaimsSet) -> Result<Identity, AuthError> + Send + Sync,
{
    fn extract(&self, claims: &ClaimsSet) -> Result<Identity, AuthError> {
        self(claims)
    }
}

/// Default strategy.
///
/// - identifier: `user_id`, falling back to `sub`, both must be strings
/// - email: `email` when it is a string, empty otherwise
/// - roles: the string entries of `roles`; anything else in the list is dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClaimsExtractor;

impl ClaimsExtractor for DefaultClaimsExtractor {
    fn extract(&self, claims: &ClaimsSet) -> Result<Identity, AuthError> {
        let user_id = claims
            .get_str(CLAIM_USER_ID)
            .or_else(|| claims.get_str(CLAIM_SUBJECT))
            .ok_or(AuthError::InvalidClaims)?;

        let email = claims.get_str(CLAIM_EMAIL).unwrap_or_default();

        let roles = claims
            .get(CLAIM_ROLES)
            .and_then(ClaimValue::as_sequence)
            .unwrap_or_default()
            .iter()
            .filter_map(ClaimValue::as_str);

        Ok(Identity::new(user_id).with_email(email).with_roles(roles))
    }
}
