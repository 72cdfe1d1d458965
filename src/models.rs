// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

//! # API Data Models
//!
//! Response data structures used by the REST API. All types derive
//! `Serialize` and `ToSchema` for automatic JSON handling and OpenAPI
//! documentation.

use serde::Serialize;
use utoipa::ToSchema;

/// Display name of an Envelop smart-wallet token. Used both as the static
/// metadata name and as the filter the wallet lookup matches NFT assets
/// against (case-insensitively).
pub const SMART_WALLET_TOKEN_NAME: &str = "Smart wallet token";

/// Static ERC-721 metadata for a smart-wallet token.
///
/// Every token carries the same name and description; the image link embeds
/// the chain, contract and token identifiers verbatim.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Token display name.
    pub name: String,
    /// Token description.
    pub description: String,
    /// Absolute URL of the token image, served by this gateway.
    pub image: String,
}
