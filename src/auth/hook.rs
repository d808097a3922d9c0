// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Pre-processing hook for typed call pipelines.
//!
//! Pipelines that do not run through the Axum middleware stack (RPC
//! dispatchers, job runners, websocket frames) carry a [`CallContext`] with
//! the originating request parts in a typed slot. [`AuthHook::before`] runs
//! the same checks as [`require_auth`](super::middleware::require_auth) and
//! fills the identity slot, or hands back the exact [`AuthError`] for the
//! host to act on.

use std::sync::Arc;

use axum::http::request::Parts;

use super::{AuthError, Identity, TokenManager};

/// Per-call context with typed request and identity slots.
#[derive(Debug, Default)]
pub struct CallContext {
    request: Option<Parts>,
    identity: Option<Identity>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a call originating from `request`.
    pub fn with_request(mut self, request: Parts) -> Self {
        self.request = Some(request);
        self
    }

    pub fn request(&self) -> Option<&Parts> {
        self.request.as_ref()
    }

    /// Identity established by [`AuthHook::before`].
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

/// Authentication hook run before a call is dispatched.
#[derive(Debug, Clone)]
pub struct AuthHook {
    tokens: Arc<TokenManager>,
}

impl AuthHook {
    pub fn new(tokens: Arc<TokenManager>) -> Self {
        Self { tokens }
    }

    /// Authenticate the call described by `ctx`.
    ///
    /// Any identity already present in the context is discarded and derived
    /// again from the request.
    pub fn before(&self, mut ctx: CallContext) -> Result<CallContext, AuthError> {
        ctx.identity = None;
        let request = ctx.request.as_ref().ok_or(AuthError::AmbientRequestMissing)?;

        match self.tokens.authenticate(&request.headers) {
            Ok(identity) => {
                ctx.identity = Some(identity);
                Ok(ctx)
            }
            Err(e) => {
                tracing::debug!(error_code = e.error_code(), "Call rejected by auth hook");
                Err(e)
            }
        }
    }
}
