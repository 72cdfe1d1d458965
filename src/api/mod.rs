// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::GatewayConfig,
    error::ApiError,
    models::TokenMetadata,
    providers::{AggregatorError, UpstreamResponse},
    state::AppState,
};

pub mod health;
pub mod meta;
pub mod proxy;
pub mod wallets;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route(
            "/meta/{chain_id}/{contract_address}/{token_id}",
            get(meta::token_metadata),
        )
        .route(
            "/metaimg/{chain_id}/{contract_address}/{token_id}",
            get(meta::token_image),
        )
        .route(
            "/swapproxy/{chain_id}/{*method_name}",
            get(proxy::swapproxy),
        )
        .route("/wallets/{chain_id}/{user_address}", get(wallets::wallets))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

/// Allow-list guard shared by the proxying endpoints. Runs after the
/// credential checks, before any outbound call.
pub(crate) fn ensure_supported_chain(chain_id: &str) -> Result<(), ApiError> {
    if GatewayConfig::is_supported_chain(chain_id) {
        Ok(())
    } else {
        Err(ApiError::bad_request("Unsupported chain"))
    }
}

/// Relay a successful upstream answer: status 200, body unchanged,
/// content-type as reported by the aggregator.
pub(crate) fn relay_success(upstream: UpstreamResponse) -> Response {
    match upstream
        .content_type
        .as_deref()
        .and_then(|value| HeaderValue::from_str(value).ok())
    {
        Some(content_type) => {
            ([(header::CONTENT_TYPE, content_type)], upstream.body).into_response()
        }
        None => upstream.body.into_response(),
    }
}

/// Map an aggregator failure to its client-facing response: upstream HTTP
/// errors keep their status and body with the content-type forced to JSON,
/// everything else becomes 400 with the stringified cause.
pub(crate) fn relay_error(error: AggregatorError) -> Response {
    match error {
        AggregatorError::Status { status, body } => (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            body,
        )
            .into_response(),
        other => ApiError::bad_request(other.to_string()).into_response(),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        meta::token_metadata,
        meta::token_image,
        proxy::swapproxy,
        wallets::wallets
    ),
    components(schemas(TokenMetadata)),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Meta", description = "Smart-wallet token metadata"),
        (name = "Proxy", description = "Authenticated passthrough to the 1inch swap API"),
        (name = "Wallets", description = "Smart-wallet lookup via the 1inch NFT API")
    )
)]
struct ApiDoc;
