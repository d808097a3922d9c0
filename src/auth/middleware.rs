// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Apply it to a router subtree so every route below it requires a valid
//! access token:
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/me", get(me))
//!     .route_layer(axum::middleware::from_fn_with_state(tokens.clone(), require_auth));
//! ```
//!
//! On success the [`Identity`](super::Identity) is stored in the request
//! extensions, where the [`Auth`](super::Auth) extractor picks it up.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::TokenManager;

/// Authentication middleware function.
///
/// Rejections are `401` with a JSON `{"error": ...}` body; downstream
/// handlers are not invoked.
pub async fn require_auth(
    State(tokens): State<Arc<TokenManager>>,
    mut request: Request,
    next: Next,
) -> Response {
    match tokens.authenticate(request.headers()) {
        Ok(identity) => {
            tracing::debug!(user_id = %identity.user_id(), "Request authenticated");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(
                error_code = e.error_code(),
                path = %request.uri().path(),
                "Rejecting unauthenticated request"
            );
            e.into_response()
        }
    }
}
