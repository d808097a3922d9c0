// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authenticated identities.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is the verified Identity
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use super::{AuthError, Identity, TokenManager};

/// Extractor for authenticated identities.
///
/// Reads the identity stored by [`require_auth`](super::middleware::require_auth)
/// when the route sits behind it, and otherwise authenticates the request
/// headers itself.
pub struct Auth(pub Identity);

impl<S> FromRequestParts<S> for Auth
where
    Arc<TokenManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // First check if middleware already set the identity
        if let Some(identity) = parts.extensions.get::<Identity>().cloned() {
            return Ok(Auth(identity));
        }

        let tokens = Arc::<TokenManager>::from_ref(state);
        let identity = tokens.authenticate(&parts.headers)?;
        parts.extensions.insert(identity.clone());

        Ok(Auth(identity))
    }
}

/// Optional authentication extractor.
///
/// Returns `None` if no valid authentication is present, instead of rejecting.
pub struct OptionalAuth(pub Option<Identity>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    Arc<TokenManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(identity)) => Ok(OptionalAuth(Some(identity))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthConfig;
    use axum::http::Request;

    fn create_test_state() -> Arc<TokenManager> {
        Arc::new(TokenManager::new(AuthConfig::hmac("s3cret").with_refresh(true)).unwrap())
    }

    fn request_parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_token() {
        let state = create_test_state();
        let mut parts = request_parts(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::TokenMissing)));
    }

    #[tokio::test]
    async fn auth_extractor_succeeds_with_jwt() {
        let state = create_test_state();
        let pair = state.issue_pair(&Identity::new("user_123")).unwrap();
        let header = format!("Bearer {}", pair.access_token);
        let mut parts = request_parts(Some(header.as_str()));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert_eq!(result.unwrap().0.user_id(), "user_123");
        assert!(parts.extensions.get::<Identity>().is_some());
    }

    #[tokio::test]
    async fn auth_extractor_prefers_extensions() {
        let state = create_test_state();
        let mut parts = request_parts(None);
        parts.extensions.insert(Identity::new("user_from_middleware"));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert_eq!(result.unwrap().0.user_id(), "user_from_middleware");
    }

    #[tokio::test]
    async fn auth_extractor_rejects_malformed_token() {
        let state = create_test_state();
        let mut parts = request_parts(Some("Bearer garbage"));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[tokio::test]
    async fn optional_auth_returns_none_without_identity() {
        let state = create_test_state();
        let mut parts = request_parts(None);

        let result = OptionalAuth::from_request_parts(&mut parts, &state).await;
        assert!(result.unwrap().0.is_none());
    }
}
