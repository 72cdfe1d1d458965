// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

//! Authenticated passthrough to the 1inch swap API.

use axum::{
    extract::{Path, RawQuery, State},
    response::Response,
};
use tracing::warn;

use crate::{
    api::{ensure_supported_chain, relay_error, relay_success},
    error::ApiError,
    state::AppState,
};

/// Forward a swap API call. The method name may contain further path
/// segments and the query string is passed through verbatim; the gateway
/// only injects the bearer credential and the fixed header set.
///
/// Preconditions, each answered with 400: credential configured, base URL
/// configured, chain on the allow-list. Upstream HTTP errors are relayed
/// with their original status and body.
#[utoipa::path(
    get,
    path = "/swapproxy/{chain_id}/{method_name}",
    tag = "Proxy",
    params(
        ("chain_id" = String, Path, description = "Chain identifier, checked against the allow-list"),
        ("method_name" = String, Path, description = "Upstream swap API method path")
    ),
    responses(
        (status = 200, description = "Upstream response, relayed verbatim"),
        (status = 400, description = "Missing configuration, unsupported chain or transport failure")
    )
)]
pub async fn swapproxy(
    State(state): State<AppState>,
    Path((chain_id, method_name)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let client = state
        .aggregator()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    ensure_supported_chain(&chain_id)?;

    match client
        .forward_swap(&chain_id, &method_name, query.as_deref())
        .await
    {
        Ok(upstream) => Ok(relay_success(upstream)),
        Err(error) => {
            warn!(
                chain_id = %chain_id,
                method_name = %method_name,
                error = %error,
                "swap proxy upstream call failed"
            );
            Ok(relay_error(error))
        }
    }
}
