// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

//! Smart-wallet lookup: fetches the NFT assets held by an address from the
//! aggregator and keeps only the smart-wallet tokens.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::warn;

use crate::{
    api::{ensure_supported_chain, relay_error},
    error::ApiError,
    models::SMART_WALLET_TOKEN_NAME,
    state::AppState,
};

/// List the smart-wallet tokens held by an address.
///
/// Same preconditions as the swap proxy. The upstream document must carry
/// an `assets` array; elements whose `name` equals `"Smart wallet token"`
/// case-insensitively are returned with their fields untouched. Upstream
/// HTTP errors are relayed with their original status and body.
#[utoipa::path(
    get,
    path = "/wallets/{chain_id}/{user_address}",
    tag = "Wallets",
    params(
        ("chain_id" = String, Path, description = "Chain identifier, checked against the allow-list"),
        ("user_address" = String, Path, description = "Holder address")
    ),
    responses(
        (status = 200, description = "Smart-wallet assets held by the address"),
        (status = 400, description = "Missing configuration, unsupported chain or malformed upstream document")
    )
)]
pub async fn wallets(
    State(state): State<AppState>,
    Path((chain_id, user_address)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let client = state
        .aggregator()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    ensure_supported_chain(&chain_id)?;

    let upstream = match client.nft_by_address(&chain_id, &user_address).await {
        Ok(upstream) => upstream,
        Err(error) => {
            warn!(
                chain_id = %chain_id,
                user_address = %user_address,
                error = %error,
                "wallet lookup upstream call failed"
            );
            return Ok(relay_error(error));
        }
    };

    let document: Value = serde_json::from_slice(&upstream.body)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let found = filter_smart_wallets(&document)?;
    Ok(Json(found).into_response())
}

/// Keep the elements of `assets` whose `name` equals the smart-wallet token
/// name, case-insensitively. Elements without a string `name` are skipped;
/// a missing or non-array `assets` key fails the whole lookup.
fn filter_smart_wallets(document: &Value) -> Result<Vec<Value>, ApiError> {
    let assets = document
        .get("assets")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::bad_request("missing `assets` array in upstream response"))?;

    Ok(assets
        .iter()
        .filter(|asset| {
            asset
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| name.eq_ignore_ascii_case(SMART_WALLET_TOKEN_NAME))
        })
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::{api::router, config::GatewayConfig};

    #[derive(Clone, Default)]
    struct StubRecorder {
        hits: Arc<AtomicUsize>,
        seen_query: Arc<Mutex<Option<String>>>,
    }

    async fn spawn_stub(
        status: StatusCode,
        body: &'static str,
        recorder: StubRecorder,
    ) -> String {
        let app = Router::new().fallback(move |request: Request<Body>| {
            let recorder = recorder.clone();
            async move {
                recorder.hits.fetch_add(1, Ordering::SeqCst);
                *recorder.seen_query.lock().unwrap() =
                    request.uri().query().map(str::to_string);
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn gateway(base_url: String) -> Router {
        let config = GatewayConfig {
            api_token: Some("secret".to_string()),
            api_base_url: Some(base_url),
            ..GatewayConfig::default()
        };
        router(AppState::new(config, reqwest::Client::new()))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn filter_matches_case_insensitively_and_preserves_fields() {
        let document = json!({
            "assets": [
                { "name": "Smart Wallet Token", "id": 1 },
                { "name": "Other", "id": 2 },
                { "name": "smart wallet token", "id": 3, "priority": 9 }
            ]
        });
        let found = filter_smart_wallets(&document).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0]["id"], 1);
        assert_eq!(found[1]["id"], 3);
        assert_eq!(found[1]["priority"], 9);
    }

    #[test]
    fn filter_requires_exact_equality_not_substring() {
        let document = json!({
            "assets": [
                { "name": "Smart wallet token v2", "id": 1 },
                { "name": "A Smart wallet token", "id": 2 }
            ]
        });
        assert!(filter_smart_wallets(&document).unwrap().is_empty());
    }

    #[test]
    fn filter_skips_assets_without_a_string_name() {
        let document = json!({
            "assets": [
                { "id": 1 },
                { "name": 42, "id": 2 },
                { "name": "Smart wallet token", "id": 3 }
            ]
        });
        let found = filter_smart_wallets(&document).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["id"], 3);
    }

    #[test]
    fn filter_fails_without_assets_array() {
        let error = filter_smart_wallets(&json!({"items": []}))
            .expect_err("missing assets should fail");
        assert_eq!(error.status, StatusCode::BAD_REQUEST);

        let error = filter_smart_wallets(&json!({"assets": "nope"}))
            .expect_err("non-array assets should fail");
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn lookup_returns_matching_assets_with_field_order_preserved() {
        let recorder = StubRecorder::default();
        let base = spawn_stub(
            StatusCode::OK,
            r#"{"assets":[{"name":"Smart Wallet Token","id":1},{"name":"Other","id":2}]}"#,
            recorder.clone(),
        )
        .await;

        let app = gateway(base);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/wallets/42161/0xabc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            r#"[{"name":"Smart Wallet Token","id":1}]"#
        );
        assert_eq!(
            recorder.seen_query.lock().unwrap().as_deref(),
            Some("chainIds=42161&address=0xabc")
        );
    }

    #[tokio::test]
    async fn malformed_upstream_json_maps_to_bad_request() {
        let recorder = StubRecorder::default();
        let base = spawn_stub(StatusCode::OK, "not json", recorder.clone()).await;

        let app = gateway(base);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/wallets/42161/0xabc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upstream_error_passes_through_status_and_body() {
        let recorder = StubRecorder::default();
        let base = spawn_stub(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"upstream down"}"#,
            recorder.clone(),
        )
        .await;

        let app = gateway(base);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/wallets/42161/0xabc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(body_string(response).await, r#"{"error":"upstream down"}"#);
    }

    #[tokio::test]
    async fn missing_token_is_rejected_before_any_outbound_call() {
        let recorder = StubRecorder::default();
        let base = spawn_stub(StatusCode::OK, r#"{"assets":[]}"#, recorder.clone()).await;

        let config = GatewayConfig {
            api_token: None,
            api_base_url: Some(base),
            ..GatewayConfig::default()
        };
        let app = router(AppState::new(config, reqwest::Client::new()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/wallets/42161/0xabc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, r#"{"error":"No auth key"}"#);
        assert_eq!(recorder.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_base_url_is_rejected_with_legacy_message() {
        let config = GatewayConfig {
            api_token: Some("secret".to_string()),
            api_base_url: None,
            ..GatewayConfig::default()
        };
        let app = router(AppState::new(config, reqwest::Client::new()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/wallets/42161/0xabc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"No remote api base url"}"#
        );
    }

    #[tokio::test]
    async fn unsupported_chain_is_rejected_before_any_outbound_call() {
        let recorder = StubRecorder::default();
        let base = spawn_stub(StatusCode::OK, r#"{"assets":[]}"#, recorder.clone()).await;

        let app = gateway(base);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/wallets/1/0xabc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, r#"{"error":"Unsupported chain"}"#);
        assert_eq!(recorder.hits.load(Ordering::SeqCst), 0);
    }
}
