// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{TokenManager, UserLookup};

#[derive(Clone)]
pub struct AppState {
    /// Frozen token configuration, shared by every request
    pub tokens: Arc<TokenManager>,
    /// Account lookup used during refresh, when the deployment has one
    pub users: Option<Arc<dyn UserLookup>>,
}

impl AppState {
    pub fn new(tokens: TokenManager) -> Self {
        Self {
            tokens: Arc::new(tokens),
            users: None,
        }
    }

    /// Re-read accounts through `users` when rotating refresh tokens.
    pub fn with_user_lookup(mut self, users: Arc<dyn UserLookup>) -> Self {
        self.users = Some(users);
        self
    }
}

impl FromRef<AppState> for Arc<TokenManager> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
