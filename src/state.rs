// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

use std::sync::Arc;

use reqwest::Client;

use crate::{
    config::GatewayConfig,
    providers::{AggregatorClient, AggregatorError},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub http: Client,
}

impl AppState {
    pub fn new(config: GatewayConfig, http: Client) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }

    /// Build an upstream client for one request. Fails when the bearer
    /// credential or base URL is not configured; the handlers map those
    /// errors to HTTP 400 without attempting an outbound call.
    pub fn aggregator(&self) -> Result<AggregatorClient, AggregatorError> {
        AggregatorClient::from_config(&self.config, self.http.clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(GatewayConfig::default(), Client::new())
    }
}
