// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

//! Static smart-wallet token metadata and image serving.

use std::{ffi::OsStr, path::Path as FilePath};

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::ApiError,
    models::{TokenMetadata, SMART_WALLET_TOKEN_NAME},
    state::AppState,
};

/// ERC-721 metadata for a smart-wallet token. Pure construction: no
/// upstream call, no validation — the path parameters are reflected
/// verbatim into the image link.
#[utoipa::path(
    get,
    path = "/meta/{chain_id}/{contract_address}/{token_id}",
    tag = "Meta",
    params(
        ("chain_id" = String, Path, description = "Chain identifier"),
        ("contract_address" = String, Path, description = "Wallet contract address"),
        ("token_id" = String, Path, description = "Token identifier")
    ),
    responses(
        (status = 200, description = "Token metadata", body = TokenMetadata)
    )
)]
pub async fn token_metadata(
    State(state): State<AppState>,
    Path((chain_id, contract_address, token_id)): Path<(String, String, String)>,
) -> Json<TokenMetadata> {
    Json(TokenMetadata {
        name: SMART_WALLET_TOKEN_NAME.to_string(),
        description: SMART_WALLET_TOKEN_NAME.to_string(),
        image: format!(
            "{}/metaimg/{chain_id}/{contract_address}/{token_id}",
            state.config.meta_public_base_url
        ),
    })
}

/// Token image. Every token resolves to the same configured file; the path
/// parameters exist so metadata image links stay well-formed.
#[utoipa::path(
    get,
    path = "/metaimg/{chain_id}/{contract_address}/{token_id}",
    tag = "Meta",
    params(
        ("chain_id" = String, Path, description = "Chain identifier"),
        ("contract_address" = String, Path, description = "Wallet contract address"),
        ("token_id" = String, Path, description = "Token identifier")
    ),
    responses(
        (status = 200, description = "Token image"),
        (status = 404, description = "Image file not available")
    )
)]
pub async fn token_image(
    State(state): State<AppState>,
    Path((_chain_id, _contract_address, _token_id)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    let path = &state.config.static_image_path;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|_| ApiError::not_found("token image not available"))?;

    let content_type = image_content_type(path);
    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static(content_type))],
        bytes,
    )
        .into_response())
}

fn image_content_type(path: &FilePath) -> &'static str {
    match path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
