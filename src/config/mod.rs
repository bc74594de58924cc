// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for chainseek sessions
//!
//! # Example: Using defaults
//!
//! ```rust
//! use chainseek::ChainseekConfig;
//! use std::time::Duration;
//!
//! let config = ChainseekConfig::default();
//! assert_eq!(config.poll_interval, Duration::from_millis(3000));
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use chainseek::ChainseekConfigBuilder;
//! use alloy_chains::NamedChain;
//! use std::time::Duration;
//!
//! let config = ChainseekConfigBuilder::new()
//!     .chain(NamedChain::Sepolia)
//!     .rpc_url("https://rpc.sepolia.org")
//!     .poll_interval(Duration::from_secs(12))
//!     .build()
//!     .unwrap();
//! ```

use std::str::FromStr;
use std::time::Duration;

use alloy_chains::NamedChain;

use crate::errors::ConfigError;
use crate::provider::ProviderConfig;

pub mod constants;

use constants::{
    env, DEFAULT_EXPLORER_API_KEY, DEFAULT_EXPLORER_TIMEOUT, DEFAULT_EXPLORER_URL,
    DEFAULT_POLL_INTERVAL,
};

/// Configuration for a chainseek session
///
/// Use [`ChainseekConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainseekConfig {
    /// Chain the RPC endpoint is expected to serve
    ///
    /// Informational: it is logged when a session is built and is not
    /// checked against the endpoint's chain id.
    /// Default: Mainnet
    pub chain: NamedChain,

    /// Period of the chain height poller
    /// Default: 3 seconds
    pub poll_interval: Duration,

    /// Chain node connection
    pub rpc: ProviderConfig,

    /// Explorer service connection
    pub explorer: ExplorerConfig,
}

/// Explorer service connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EXPLORER_URL.to_string(),
            api_key: DEFAULT_EXPLORER_API_KEY.to_string(),
            timeout: DEFAULT_EXPLORER_TIMEOUT,
        }
    }
}

impl Default for ChainseekConfig {
    fn default() -> Self {
        Self {
            chain: NamedChain::Mainnet,
            poll_interval: DEFAULT_POLL_INTERVAL,
            rpc: ProviderConfig::default(),
            explorer: ExplorerConfig::default(),
        }
    }
}

impl ChainseekConfig {
    /// Load configuration from the environment (and a `.env` file, if present)
    ///
    /// Unset variables fall back to defaults. See [`constants::env`] for the
    /// variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparsable numbers or chain
    /// names and [`ConfigError::ZeroPollInterval`] for a zero poll interval.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ChainseekConfigBuilder::new();

        if let Some(chain) = lookup(env::CHAIN) {
            let parsed = NamedChain::from_str(chain.trim())
                .map_err(|_| invalid_value(env::CHAIN, &chain))?;
            builder = builder.chain(parsed);
        }
        if let Some(url) = lookup(env::RPC_URL) {
            builder = builder.rpc_url(url);
        }
        if let Some(ms) = lookup(env::RPC_TIMEOUT_MS) {
            builder = builder.rpc_timeout(parse_millis(env::RPC_TIMEOUT_MS, &ms)?);
        }
        if let Some(url) = lookup(env::EXPLORER_URL) {
            builder = builder.explorer_url(url);
        }
        if let Some(key) = lookup(env::EXPLORER_API_KEY) {
            builder = builder.explorer_api_key(key);
        }
        if let Some(ms) = lookup(env::POLL_INTERVAL_MS) {
            builder = builder.poll_interval(parse_millis(env::POLL_INTERVAL_MS, &ms)?);
        }

        builder.build()
    }
}

fn invalid_value(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| invalid_value(key, value))
}

/// Builder for [`ChainseekConfig`]
///
/// # Example
///
/// ```rust
/// use chainseek::ChainseekConfigBuilder;
/// use std::time::Duration;
///
/// let config = ChainseekConfigBuilder::new()
///     .explorer_api_key("my-key")
///     .explorer_timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
/// assert_eq!(config.explorer.api_key, "my-key");
/// ```
#[derive(Debug, Default)]
pub struct ChainseekConfigBuilder {
    config: ChainseekConfig,
}

impl ChainseekConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain(mut self, chain: NamedChain) -> Self {
        self.config.chain = chain;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.config.rpc.url = url.into();
        self
    }

    pub fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.config.rpc.timeout = timeout;
        self
    }

    pub fn explorer_url(mut self, url: impl Into<String>) -> Self {
        self.config.explorer.base_url = url.into();
        self
    }

    pub fn explorer_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.explorer.api_key = key.into();
        self
    }

    pub fn explorer_timeout(mut self, timeout: Duration) -> Self {
        self.config.explorer.timeout = timeout;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ChainseekConfig, ConfigError> {
        if self.config.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ChainseekConfig::default();
        assert_eq!(config.chain, NamedChain::Mainnet);
        assert_eq!(config.poll_interval, Duration::from_millis(3000));
        assert_eq!(config.explorer.base_url, "https://api.ethplorer.io");
        assert_eq!(config.explorer.api_key, "freekey");
        assert_eq!(config.rpc.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_lookup_gives_defaults() {
        let config = ChainseekConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ChainseekConfig::default());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = ChainseekConfig::from_lookup(lookup_from(&[
            (env::CHAIN, "sepolia"),
            (env::RPC_URL, "https://rpc.example"),
            (env::POLL_INTERVAL_MS, "500"),
            (env::EXPLORER_API_KEY, "secret"),
        ]))
        .unwrap();

        assert_eq!(config.chain, NamedChain::Sepolia);
        assert_eq!(config.rpc.url, "https://rpc.example");
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.explorer.api_key, "secret");
    }

    #[test]
    fn test_malformed_interval_rejected() {
        let err = ChainseekConfig::from_lookup(lookup_from(&[(env::POLL_INTERVAL_MS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == env::POLL_INTERVAL_MS));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = ChainseekConfig::from_lookup(lookup_from(&[(env::POLL_INTERVAL_MS, "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPollInterval));
    }

    #[test]
    fn test_unknown_chain_rejected() {
        let err =
            ChainseekConfig::from_lookup(lookup_from(&[(env::CHAIN, "atlantis")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
