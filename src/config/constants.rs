// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Default endpoints, intervals and environment variable names
//!
//! This module centralizes magic constants used throughout the chainseek
//! crate.

use std::time::Duration;

/// Chain height poll period
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// RPC endpoint used when none is configured
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Per-request timeout for the chain node
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Public Ethplorer API
pub const DEFAULT_EXPLORER_URL: &str = "https://api.ethplorer.io";

/// Ethplorer's shared, heavily rate-limited key
pub const DEFAULT_EXPLORER_API_KEY: &str = "freekey";

/// Per-request timeout for the explorer service
pub const DEFAULT_EXPLORER_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable names read by
/// [`ChainseekConfig::from_env`](super::ChainseekConfig::from_env)
pub mod env {
    pub const CHAIN: &str = "CHAINSEEK_CHAIN";
    pub const RPC_URL: &str = "CHAINSEEK_RPC_URL";
    pub const RPC_TIMEOUT_MS: &str = "CHAINSEEK_RPC_TIMEOUT_MS";
    pub const EXPLORER_URL: &str = "CHAINSEEK_EXPLORER_URL";
    pub const EXPLORER_API_KEY: &str = "CHAINSEEK_EXPLORER_API_KEY";
    pub const POLL_INTERVAL_MS: &str = "CHAINSEEK_POLL_INTERVAL_MS";
}
