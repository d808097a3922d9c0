// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer Guard - Stateless Bearer Token Authentication
//!
//! This crate verifies JWT bearer tokens on inbound requests, derives the
//! caller's identity from the verified claims, and issues/rotates
//! access + refresh credential pairs.
//!
//! ## Modules
//!
//! - `auth` - Token codec, claims extraction, lifecycle manager and request adapters
//! - `api` - HTTP API handlers (Axum)
//! - `config` - Environment variable names and defaults
//! - `state` - Shared application state

pub mod api;
pub mod auth;
pub mod config;
pub mod state;
