// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::{AuthError, CredentialPair};
use crate::state::AppState;

/// Request body for POST /v1/token/refresh
#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    /// Refresh token from a previously issued pair
    pub refresh_token: String,
}

/// Exchange a refresh token for a new credential pair.
#[utoipa::path(
    post,
    path = "/v1/token/refresh",
    tag = "Tokens",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New credential pair", body = CredentialPair),
        (status = 401, description = "Refresh token rejected"),
    )
)]
pub async fn refresh_tokens(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<CredentialPair>, AuthError> {
    let pair = match &state.users {
        Some(users) => state
            .tokens
            .rotate_pair_with(&request.refresh_token, users.as_ref())?,
        None => state.tokens.rotate_pair(&request.refresh_token)?,
    };
    Ok(Json(pair))
}
