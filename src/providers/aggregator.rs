// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

//! 1inch aggregator client for swap quoting and NFT asset lookups.

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::{
    header::{
        HeaderMap, HeaderValue, ACCEPT, ACCEPT_CHARSET, ACCEPT_ENCODING, ACCEPT_LANGUAGE,
        CONNECTION, CONTENT_TYPE, USER_AGENT,
    },
    Client,
};

use crate::config::GatewayConfig;

const SWAP_API_POSTFIX: &str = "swap/v6.1";
const NFT_API_POSTFIX: &str = "nft/v2";

// Legacy browser fingerprint, kept for upstream compatibility.
const UPSTREAM_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.11 (KHTML, like Gecko) Chrome/23.0.1271.64 Safari/537.11";

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("No auth key")]
    MissingAuthKey,

    #[error("No remote api base url")]
    MissingBaseUrl,

    /// Non-2xx answer from the aggregator. The boundary relays status and
    /// body to the caller verbatim instead of mapping this to 400.
    #[error("upstream returned {status}")]
    Status { status: StatusCode, body: Bytes },

    #[error("{0}")]
    Request(String),
}

/// Successful aggregator answer: raw body plus the content type the
/// aggregator reported, relayed to the caller unchanged.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Stateless client for one upstream call. Constructed per request from the
/// injected [`GatewayConfig`] so a missing credential or base URL surfaces
/// as a request-scoped error, never as a process failure.
#[derive(Debug, Clone)]
pub struct AggregatorClient {
    base_url: String,
    token: String,
    http: Client,
}

impl AggregatorClient {
    pub fn from_config(config: &GatewayConfig, http: Client) -> Result<Self, AggregatorError> {
        let token = config
            .api_token
            .clone()
            .ok_or(AggregatorError::MissingAuthKey)?;
        let base_url = config
            .api_base_url
            .clone()
            .ok_or(AggregatorError::MissingBaseUrl)?;

        Ok(Self {
            base_url,
            token,
            http,
        })
    }

    /// Forward a swap API call, passing the caller's query string through
    /// verbatim.
    pub async fn forward_swap(
        &self,
        chain_id: &str,
        method_name: &str,
        raw_query: Option<&str>,
    ) -> Result<UpstreamResponse, AggregatorError> {
        let url = build_swap_url(&self.base_url, chain_id, method_name, raw_query);
        self.get(&url).await
    }

    /// Fetch the NFT assets held by an address. The chain identifier travels
    /// in the query string here, not in the path.
    pub async fn nft_by_address(
        &self,
        chain_id: &str,
        user_address: &str,
    ) -> Result<UpstreamResponse, AggregatorError> {
        let url = build_nft_by_address_url(&self.base_url, chain_id, user_address);
        self.get(&url).await
    }

    async fn get(&self, url: &str) -> Result<UpstreamResponse, AggregatorError> {
        let response = self
            .http
            .get(url)
            .headers(fixed_headers())
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| AggregatorError::Request(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| AggregatorError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(AggregatorError::Status { status, body });
        }

        Ok(UpstreamResponse { content_type, body })
    }
}

/// `{base}/swap/v6.1/{chain}/{method}?{query}`. The `?` is always appended
/// and the query string is not re-encoded, matching what callers sent.
pub fn build_swap_url(
    base_url: &str,
    chain_id: &str,
    method_name: &str,
    raw_query: Option<&str>,
) -> String {
    format!(
        "{base_url}/{SWAP_API_POSTFIX}/{chain_id}/{method_name}?{}",
        raw_query.unwrap_or_default()
    )
}

/// `{base}/nft/v2/byaddress?chainIds={chain}&address={address}`.
pub fn build_nft_by_address_url(base_url: &str, chain_id: &str, user_address: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("chainIds", chain_id)
        .append_pair("address", user_address)
        .finish();
    format!("{base_url}/{NFT_API_POSTFIX}/byaddress?{query}")
}

fn fixed_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(UPSTREAM_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        ACCEPT_CHARSET,
        HeaderValue::from_static("ISO-8859-1,utf-8;q=0.7,*;q=0.3"),
    );
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("none"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.8"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_url_keeps_query_string_verbatim() {
        let url = build_swap_url(
            "https://api.1inch.dev",
            "42161",
            "quote",
            Some("src=0xa&dst=0xb&amount=10&note=a%26b%3Dc"),
        );
        assert_eq!(
            url,
            "https://api.1inch.dev/swap/v6.1/42161/quote?src=0xa&dst=0xb&amount=10&note=a%26b%3Dc"
        );
    }

    #[test]
    fn swap_url_appends_question_mark_even_without_query() {
        let url = build_swap_url("https://api.1inch.dev", "42161", "tokens", None);
        assert_eq!(url, "https://api.1inch.dev/swap/v6.1/42161/tokens?");
    }

    #[test]
    fn swap_url_allows_nested_method_paths() {
        let url = build_swap_url("https://api.1inch.dev", "42161", "approve/spender", Some(""));
        assert_eq!(url, "https://api.1inch.dev/swap/v6.1/42161/approve/spender?");
    }

    #[test]
    fn nft_url_places_chain_in_query_not_path() {
        let url = build_nft_by_address_url("https://api.1inch.dev", "42161", "0xabc");
        assert_eq!(
            url,
            "https://api.1inch.dev/nft/v2/byaddress?chainIds=42161&address=0xabc"
        );
    }

    #[test]
    fn from_config_reports_missing_credentials_in_legacy_wording() {
        let mut config = GatewayConfig::default();
        let error = AggregatorClient::from_config(&config, Client::new())
            .expect_err("missing token should fail");
        assert_eq!(error.to_string(), "No auth key");

        config.api_token = Some("secret".to_string());
        let error = AggregatorClient::from_config(&config, Client::new())
            .expect_err("missing base url should fail");
        assert_eq!(error.to_string(), "No remote api base url");

        config.api_base_url = Some("https://api.1inch.dev".to_string());
        assert!(AggregatorClient::from_config(&config, Client::new()).is_ok());
    }

    #[test]
    fn fixed_headers_carry_the_legacy_fingerprint() {
        let headers = fixed_headers();
        assert_eq!(
            headers.get(USER_AGENT).and_then(|v| v.to_str().ok()),
            Some(UPSTREAM_USER_AGENT)
        );
        assert_eq!(
            headers.get(ACCEPT).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(
            headers.get(ACCEPT_ENCODING).and_then(|v| v.to_str().ok()),
            Some("none")
        );
        assert_eq!(
            headers.get(CONNECTION).and_then(|v| v.to_str().ok()),
            Some("keep-alive")
        );
        // The bearer credential is attached per request, never part of the
        // fixed set.
        assert!(headers.get("Authorization").is_none());
    }
}
