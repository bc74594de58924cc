// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider construction for the chain client
//!
//! [`AlloyChainClient`](crate::AlloyChainClient) is generic over
//! `Provider<N: Network>`. This module builds the common case: an HTTP
//! provider over `AnyNetwork`, so one binary can talk to any EVM chain chosen
//! at runtime.
//!
//! # Examples
//!
//! ```rust,ignore
//! use chainseek::provider::{create_http_provider, ProviderConfig};
//! use std::time::Duration;
//!
//! let provider = create_http_provider(
//!     ProviderConfig::new("https://eth.llamarpc.com").with_timeout(Duration::from_secs(10)),
//! )?;
//! ```
//!
//! Note: RPC request/response logging is handled natively by alloy's transport
//! layer at DEBUG/TRACE level.

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::{create_http_provider, create_typed_http_provider};

use alloy_network::{AnyNetwork, Ethereum};

/// HTTP provider over `AnyNetwork`
pub type AnyHttpProvider = alloy_provider::RootProvider<AnyNetwork>;

/// HTTP provider for Ethereum-typed networks
pub type EthereumHttpProvider = alloy_provider::RootProvider<Ethereum>;
