// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Envelop

pub mod aggregator;

pub use aggregator::{AggregatorClient, AggregatorError, UpstreamResponse};
