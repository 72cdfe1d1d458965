// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

use axum::Json;
use serde_json::{json, Value};

/// Root endpoint.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service banner")
    )
)]
pub async fn root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// Liveness probe. Does not check the upstream aggregator.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn health() -> Json<Value> {
    Json(json!({ "health": "ok" }))
}
