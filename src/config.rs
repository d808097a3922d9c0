// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `AUTH_SIGNING_METHOD` | `HS256`/`HS384`/`HS512`/`RS256`/`RS384`/`RS512` | `HS256` |
//! | `AUTH_SECRET` | Shared secret for HMAC methods | Required for HMAC |
//! | `AUTH_PUBLIC_KEY_PATH` | RSA public key (PEM) | Required for RSA |
//! | `AUTH_PRIVATE_KEY_PATH` | RSA private key (PEM) | Optional (verify-only without it) |
//! | `AUTH_ACCESS_TTL_SECS` | Access token lifetime | `900` |
//! | `AUTH_REFRESH_TTL_SECS` | Refresh token lifetime | `604800` |
//! | `AUTH_REFRESH_ENABLED` | Enable issuance and rotation | `false` |
//! | `AUTH_HEADER` | Credential header name | `Authorization` |
//! | `AUTH_HEADER_PREFIX` | Literal prefix before the token | `Bearer ` |

/// Server bind address.
pub const HOST_ENV: &str = "HOST";
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Server bind port.
pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_PORT: u16 = 8080;

/// Log output format: `json` or `pretty`.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default `RUST_LOG` filter when the variable is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

pub const AUTH_SIGNING_METHOD_ENV: &str = "AUTH_SIGNING_METHOD";
pub const AUTH_SECRET_ENV: &str = "AUTH_SECRET";
pub const AUTH_PUBLIC_KEY_PATH_ENV: &str = "AUTH_PUBLIC_KEY_PATH";
pub const AUTH_PRIVATE_KEY_PATH_ENV: &str = "AUTH_PRIVATE_KEY_PATH";
pub const AUTH_ACCESS_TTL_SECS_ENV: &str = "AUTH_ACCESS_TTL_SECS";
pub const AUTH_REFRESH_TTL_SECS_ENV: &str = "AUTH_REFRESH_TTL_SECS";
pub const AUTH_REFRESH_ENABLED_ENV: &str = "AUTH_REFRESH_ENABLED";
pub const AUTH_HEADER_ENV: &str = "AUTH_HEADER";
pub const AUTH_HEADER_PREFIX_ENV: &str = "AUTH_HEADER_PREFIX";
