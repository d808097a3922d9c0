// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT signing and verification.
//!
//! ## Security
//!
//! - Exactly one algorithm is accepted, the configured one. A token whose
//!   header names anything else is rejected before any key is touched.
//! - Keys are resolved once at construction from the configured method.
//! - Expiry is checked after the signature: `now >= exp` is expired, with no
//!   clock skew leeway.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::ClaimsSet;
use super::AuthError;

/// Supported signing methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SigningMethod {
    #[default]
    HS256,
    HS384,
    HS512,
    RS256,
    RS384,
    RS512,
}

impl SigningMethod {
    pub fn algorithm(self) -> Algorithm {
        match self {
            SigningMethod::HS256 => Algorithm::HS256,
            SigningMethod::HS384 => Algorithm::HS384,
            SigningMethod::HS512 => Algorithm::HS512,
            SigningMethod::RS256 => Algorithm::RS256,
            SigningMethod::RS384 => Algorithm::RS384,
            SigningMethod::RS512 => Algorithm::RS512,
        }
    }

    /// Whether this is a shared-secret (HMAC) method.
    pub fn is_hmac(self) -> bool {
        matches!(
            self,
            SigningMethod::HS256 | SigningMethod::HS384 | SigningMethod::HS512
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SigningMethod::HS256 => "HS256",
            SigningMethod::HS384 => "HS384",
            SigningMethod::HS512 => "HS512",
            SigningMethod::RS256 => "RS256",
            SigningMethod::RS384 => "RS384",
            SigningMethod::RS512 => "RS512",
        }
    }
}

impl FromStr for SigningMethod {
    type Err = AuthError;

    /// Parse a JOSE algorithm name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HS256" => Ok(SigningMethod::HS256),
            "HS384" => Ok(SigningMethod::HS384),
            "HS512" => Ok(SigningMethod::HS512),
            "RS256" => Ok(SigningMethod::RS256),
            "RS384" => Ok(SigningMethod::RS384),
            "RS512" => Ok(SigningMethod::RS512),
            other => Err(AuthError::config(format!("unsupported signing method '{other}'"))),
        }
    }
}

impl fmt::Display for SigningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key material for a signing method.
#[derive(Clone)]
pub enum KeyMaterial {
    /// Shared secret for HMAC methods
    Secret(Vec<u8>),
    /// PEM-encoded RSA keys. The private key may be absent on verify-only
    /// deployments.
    Rsa {
        public_pem: Vec<u8>,
        private_pem: Option<Vec<u8>>,
    },
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::Secret(_) => f.write_str("Secret(<redacted>)"),
            KeyMaterial::Rsa { private_pem, .. } => f
                .debug_struct("Rsa")
                .field("public_pem", &"<pem>")
                .field("has_private_key", &private_pem.is_some())
                .finish(),
        }
    }
}

/// Signs and verifies tokens for a single configured method.
pub struct TokenCodec {
    method: SigningMethod,
    encoding_key: Option<EncodingKey>,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Resolve keys for `method`.
    ///
    /// Fails with [`AuthError::Configuration`] when the material does not
    /// belong to the method's family or cannot be parsed.
    pub fn new(method: SigningMethod, keys: &KeyMaterial) -> Result<Self, AuthError> {
        let (encoding_key, decoding_key) = match (method.is_hmac(), keys) {
            (true, KeyMaterial::Secret(secret)) => {
                if secret.is_empty() {
                    return Err(AuthError::config(format!("{method} requires a non-empty secret")));
                }
                (
                    Some(EncodingKey::from_secret(secret)),
                    DecodingKey::from_secret(secret),
                )
            }
            (
                false,
                KeyMaterial::Rsa {
                    public_pem,
                    private_pem,
                },
            ) => {
                let decoding_key = DecodingKey::from_rsa_pem(public_pem)
                    .map_err(|e| AuthError::config(format!("invalid RSA public key: {e}")))?;
                let encoding_key = private_pem
                    .as_deref()
                    .map(EncodingKey::from_rsa_pem)
                    .transpose()
                    .map_err(|e| AuthError::config(format!("invalid RSA private key: {e}")))?;
                (encoding_key, decoding_key)
            }
            (true, KeyMaterial::Rsa { .. }) => {
                return Err(AuthError::config(format!("{method} requires a shared secret, got RSA keys")));
            }
            (false, KeyMaterial::Secret(_)) => {
                return Err(AuthError::config(format!("{method} requires an RSA key pair, got a secret")));
            }
        };

        let mut validation = Validation::new(method.algorithm());
        // Expiry is enforced in `verify` with `now >= exp` semantics.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        // `exp` presence is checked on the decoded claims so that negative
        // values still count as expired.
        validation.required_spec_claims.clear();

        Ok(Self {
            method,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    pub fn method(&self) -> SigningMethod {
        self.method
    }

    /// Whether signing key material is available.
    pub fn can_sign(&self) -> bool {
        self.encoding_key.is_some()
    }

    /// Sign `claims` as-is.
    pub fn sign(&self, claims: &ClaimsSet) -> Result<String, AuthError> {
        let key = self.encoding_key.as_ref().ok_or_else(|| {
            AuthError::config(format!("{} signing requires a private key", self.method))
        })?;

        encode(&Header::new(self.method.algorithm()), claims, key)
            .map_err(|e| AuthError::config(format!("failed to sign token: {e}")))
    }

    /// Verify `token` and return its claims.
    pub fn verify(&self, token: &str) -> Result<ClaimsSet, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::TokenInvalid)?;
        if header.alg != self.method.algorithm() {
            tracing::debug!(
                declared = ?header.alg,
                expected = %self.method,
                "Rejecting token with unexpected algorithm"
            );
            return Err(AuthError::TokenInvalid);
        }
        check_segments(token)?;

        let token_data = decode::<ClaimsSet>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })?;

        let claims = token_data.claims;
        let expires_at = claims.expires_at().ok_or(AuthError::TokenInvalid)?;
        if unix_now() >= expires_at {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("method", &self.method)
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

/// Reject a token whose signature segment is not valid base64url.
///
/// Runs after the header decoded, so a segment that fails here on an
/// otherwise well-formed token is a corrupted signature.
fn check_segments(token: &str) -> Result<(), AuthError> {
    let mut segments = token.split('.');
    let (Some(_), Some(payload), Some(signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Err(AuthError::TokenInvalid);
    };

    if URL_SAFE_NO_PAD.decode(payload).is_err() {
        return Err(AuthError::TokenInvalid);
    }
    if URL_SAFE_NO_PAD.decode(signature).is_err() {
        return Err(AuthError::InvalidSignature);
    }
    Ok(())
}

/// Current Unix time in seconds.
pub(crate) fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
