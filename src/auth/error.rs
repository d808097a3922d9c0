// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// Every variant is terminal for the current attempt. Over HTTP they all
/// collapse to `401 Unauthorized` so the failing stage is only visible in
/// the message text; the pre-processing hook hands the variant itself to
/// its host pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No credential header, wrong prefix, or nothing after the prefix
    #[error("Authorization token is required")]
    TokenMissing,
    /// Token is structurally malformed or declares an unexpected algorithm
    #[error("Token is invalid")]
    TokenInvalid,
    /// Signature is valid but the token is past its expiry
    #[error("Token has expired")]
    TokenExpired,
    /// Signature does not verify against the configured key
    #[error("Token signature is invalid")]
    InvalidSignature,
    /// Verified claims do not yield an identity
    #[error("Token claims are invalid")]
    InvalidClaims,
    /// Deployment defect: missing key material, disabled issuance, bad settings
    #[error("Authentication is misconfigured: {0}")]
    Configuration(String),
    /// Rotation attempted with a token that is not a refresh token
    #[error("Token is not a refresh token")]
    NotARefreshToken,
    /// Pre-processing hook invoked without a request in its context
    #[error("No request available in call context")]
    AmbientRequestMissing,
    /// User lookup during rotation found no active account
    #[error("User account not found")]
    UserNotFound,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
}

impl AuthError {
    /// Stable code for this error, suitable for metrics tags and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::TokenMissing => "token_missing",
            AuthError::TokenInvalid => "token_invalid",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::InvalidClaims => "invalid_claims",
            AuthError::Configuration(_) => "configuration_error",
            AuthError::NotARefreshToken => "not_a_refresh_token",
            AuthError::AmbientRequestMissing => "ambient_request_missing",
            AuthError::UserNotFound => "user_not_found",
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        AuthError::Configuration(message.into())
    }

    /// Whether this error points at the deployment rather than the request.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AuthError::Configuration(_))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self.is_configuration() {
            tracing::error!(error = %self, "Authentication configuration error");
        }
        let body = Json(AuthErrorBody {
            error: self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header::CONTENT_TYPE;

    #[tokio::test]
    async fn missing_token_returns_401_json() {
        let response = AuthError::TokenMissing.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"Authorization token is required"}"#);
    }

    #[tokio::test]
    async fn every_kind_maps_to_401() {
        let kinds = [
            AuthError::TokenMissing,
            AuthError::TokenInvalid,
            AuthError::TokenExpired,
            AuthError::InvalidSignature,
            AuthError::InvalidClaims,
            AuthError::config("no key"),
            AuthError::NotARefreshToken,
            AuthError::AmbientRequestMissing,
            AuthError::UserNotFound,
        ];
        for kind in kinds {
            assert_eq!(kind.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn error_codes_are_distinct() {
        let codes = [
            AuthError::TokenInvalid.error_code(),
            AuthError::TokenExpired.error_code(),
            AuthError::InvalidSignature.error_code(),
            AuthError::NotARefreshToken.error_code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
