// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

//! Envelop Gateway - Smart Wallet API Gateway
//!
//! This crate fronts the 1inch aggregator API for Envelop smart wallets,
//! injecting the server-side bearer credential and restricting queries to
//! the supported chain allow-list.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `config` - Environment-sourced runtime configuration
//! - `providers` - Upstream aggregator client (reqwest)
//! - `models` - Response data models

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod state;
