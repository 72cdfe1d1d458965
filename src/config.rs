// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

//! # Runtime Configuration
//!
//! This module defines environment variable names and the immutable
//! [`GatewayConfig`] value loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `API_1INCH_TOKEN` | Bearer credential for the upstream aggregator | Unset (proxy endpoints return 400) |
//! | `API_1INCH_BASE_URL` | Upstream aggregator base URL | Unset (proxy endpoints return 400) |
//! | `UPSTREAM_TIMEOUT_SECS` | Timeout for outbound aggregator calls | `15` |
//! | `STATIC_IMAGE_PATH` | Image file served by `/metaimg` | `static/smartwallet.png` |
//! | `META_PUBLIC_BASE_URL` | Public base URL embedded in metadata image links | `https://apidev.envelop.is` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{path::PathBuf, time::Duration};

/// Environment variable name for the upstream bearer credential.
pub const API_TOKEN_ENV: &str = "API_1INCH_TOKEN";

/// Environment variable name for the upstream aggregator base URL.
pub const API_BASE_URL_ENV: &str = "API_1INCH_BASE_URL";

/// Environment variable name for the outbound call timeout in seconds.
pub const UPSTREAM_TIMEOUT_ENV: &str = "UPSTREAM_TIMEOUT_SECS";

/// Environment variable name for the static token image path.
pub const STATIC_IMAGE_PATH_ENV: &str = "STATIC_IMAGE_PATH";

/// Environment variable name for the public base URL used in metadata links.
pub const META_PUBLIC_BASE_URL_ENV: &str = "META_PUBLIC_BASE_URL";

const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 15;
const DEFAULT_STATIC_IMAGE_PATH: &str = "static/smartwallet.png";
const DEFAULT_META_PUBLIC_BASE_URL: &str = "https://apidev.envelop.is";

/// Chain identifiers the gateway forwards for. Everything else is rejected
/// with `Unsupported chain` before any outbound call is made.
pub const SUPPORTED_CHAINS: [&str; 1] = ["42161"];

/// Immutable process-wide configuration, loaded once in `main` and passed
/// into the handlers through [`crate::state::AppState`].
///
/// The credential and base URL stay optional: their absence is not fatal at
/// boot, every proxying request re-checks them and fails with HTTP 400.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bearer credential injected into every outbound aggregator call.
    /// Never exposed to callers.
    pub api_token: Option<String>,
    /// Upstream aggregator base URL, stored with trailing slashes trimmed.
    pub api_base_url: Option<String>,
    /// Timeout applied to the shared outbound HTTP client.
    pub upstream_timeout: Duration,
    /// File served by `/metaimg/{chain_id}/{contract_address}/{token_id}`.
    pub static_image_path: PathBuf,
    /// Public base URL embedded in `/meta` image links.
    pub meta_public_base_url: String,
}

impl GatewayConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let upstream_timeout = env_optional(UPSTREAM_TIMEOUT_ENV)
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS));

        Self {
            api_token: env_optional(API_TOKEN_ENV),
            api_base_url: env_optional(API_BASE_URL_ENV).map(|url| normalize_base_url(&url)),
            upstream_timeout,
            static_image_path: PathBuf::from(env_or_default(
                STATIC_IMAGE_PATH_ENV,
                DEFAULT_STATIC_IMAGE_PATH,
            )),
            meta_public_base_url: normalize_base_url(&env_or_default(
                META_PUBLIC_BASE_URL_ENV,
                DEFAULT_META_PUBLIC_BASE_URL,
            )),
        }
    }

    /// Whether a chain identifier is on the allow-list.
    pub fn is_supported_chain(chain_id: &str) -> bool {
        SUPPORTED_CHAINS.contains(&chain_id)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_base_url: None,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            static_image_path: PathBuf::from(DEFAULT_STATIC_IMAGE_PATH),
            meta_public_base_url: DEFAULT_META_PUBLIC_BASE_URL.to_string(),
        }
    }
}

/// Trim trailing slashes so path segments can be appended with a single `/`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn env_optional(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
