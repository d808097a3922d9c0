// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims representation.
//!
//! Claims are kept as a map of claim name to [`ClaimValue`], a closed set of
//! JSON shapes, so identity strategies can match on them without casting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Primary subject identifier.
pub const CLAIM_USER_ID: &str = "user_id";
/// Fallback subject identifier (registered JWT claim).
pub const CLAIM_SUBJECT: &str = "sub";
/// Contact email.
pub const CLAIM_EMAIL: &str = "email";
/// Role names.
pub const CLAIM_ROLES: &str = "roles";
/// Issued at (Unix seconds).
pub const CLAIM_ISSUED_AT: &str = "iat";
/// Expiry (Unix seconds).
pub const CLAIM_EXPIRES_AT: &str = "exp";
/// Token class marker.
pub const CLAIM_TYPE: &str = "type";
/// Value of [`CLAIM_TYPE`] carried by refresh tokens.
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// A single claim value.
///
/// Variant order matters for deserialization: integers are tried before
/// floats so Unix timestamps stay integral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<ClaimValue>),
    Map(BTreeMap<String, ClaimValue>),
}

impl ClaimValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value as whole seconds. Floats are truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ClaimValue::Integer(n) => Some(*n),
            ClaimValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ClaimValue]> {
        match self {
            ClaimValue::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Integer(value)
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Bool(value)
    }
}

impl From<Vec<String>> for ClaimValue {
    fn from(values: Vec<String>) -> Self {
        ClaimValue::Sequence(values.into_iter().map(ClaimValue::String).collect())
    }
}

impl From<Vec<ClaimValue>> for ClaimValue {
    fn from(values: Vec<ClaimValue>) -> Self {
        ClaimValue::Sequence(values)
    }
}

/// Token payload: claim name to value.
///
/// [`TokenCodec::verify`](super::TokenCodec::verify) is the only producer of
/// claims that the rest of the crate trusts. Building one by hand is only
/// meaningful as input to signing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimsSet(BTreeMap<String, ClaimValue>);

impl ClaimsSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a claim, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ClaimValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.0.get(name)
    }

    /// String claim, `None` when absent or not a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ClaimValue::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ClaimValue::as_i64)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// `exp` claim in Unix seconds.
    pub fn expires_at(&self) -> Option<i64> {
        self.get_i64(CLAIM_EXPIRES_AT)
    }

    /// Whether the `type` claim marks a refresh token.
    pub fn is_refresh(&self) -> bool {
        self.get_str(CLAIM_TYPE) == Some(REFRESH_TOKEN_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_payload() {
        let json = r#"{
            "user_id": "u1",
            "roles": ["admin", 42, "ops"],
            "exp": 1700003600,
            "score": 0.5,
            "verified": true,
            "meta": {"plan": "pro"},
            "nothing": null
        }"#;
        let claims: ClaimsSet = serde_json::from_str(json).unwrap();

        assert_eq!(claims.get_str("user_id"), Some("u1"));
        assert_eq!(claims.expires_at(), Some(1700003600));
        assert_eq!(claims.get("score"), Some(&ClaimValue::Float(0.5)));
        assert_eq!(claims.get("verified"), Some(&ClaimValue::Bool(true)));
        assert_eq!(claims.get("nothing"), Some(&ClaimValue::Null));
        assert!(matches!(claims.get("meta"), Some(ClaimValue::Map(_))));

        let roles = claims.get("roles").and_then(ClaimValue::as_sequence).unwrap();
        assert_eq!(roles[1], ClaimValue::Integer(42));
    }

    #[test]
    fn get_str_ignores_non_string_values() {
        let claims = ClaimsSet::new().with("user_id", 7i64);
        assert_eq!(claims.get_str("user_id"), None);
        assert!(claims.contains("user_id"));
    }

    #[test]
    fn refresh_marker_requires_exact_value() {
        assert!(ClaimsSet::new().with(CLAIM_TYPE, "refresh").is_refresh());
        assert!(!ClaimsSet::new().with(CLAIM_TYPE, "Refresh").is_refresh());
        assert!(!ClaimsSet::new().with(CLAIM_TYPE, true).is_refresh());
        assert!(!ClaimsSet::new().is_refresh());
    }

    #[test]
    fn serializes_as_flat_object() {
        let claims = ClaimsSet::new()
            .with("sub", "u1")
            .with("roles", vec!["a".to_string()]);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json, serde_json::json!({"sub": "u1", "roles": ["a"]}));
    }
}
