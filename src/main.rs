// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

use std::{env, net::SocketAddr};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use envelop_gateway::{
    api::router,
    config::{GatewayConfig, API_BASE_URL_ENV, API_TOKEN_ENV},
    state::AppState,
};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = GatewayConfig::from_env();
    if config.api_token.is_none() {
        warn!("{API_TOKEN_ENV} is not set; proxy endpoints will reject every request");
    }
    if config.api_base_url.is_none() {
        warn!("{API_BASE_URL_ENV} is not set; proxy endpoints will reject every request");
    }

    let http = match reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build upstream HTTP client");
            std::process::exit(1);
        }
    };

    let state = AppState::new(config, http);
    let app = router(state);

    // Parse bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = match format!("{host}:{port}").parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(host = %host, port = %port, error = %e, "failed to parse bind address");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "envelop-gateway listening (docs at /docs)");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let json = env::var("LOG_FORMAT")
        .map(|value| value.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
