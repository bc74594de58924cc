// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

use std::time::Duration;

use crate::config::constants::{DEFAULT_RPC_TIMEOUT, DEFAULT_RPC_URL};

/// Configuration for creating providers
///
/// # Example
///
/// ```rust
/// use chainseek::provider::ProviderConfig;
/// use std::time::Duration;
///
/// let config = ProviderConfig::new("https://eth.llamarpc.com")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Create a new provider configuration with the specified URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_RPC_TIMEOUT,
        }
    }

    /// Set request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_URL)
    }
}

/// Preset configurations for common RPC providers
impl ProviderConfig {
    /// Configuration preset for local nodes (long timeout)
    #[must_use]
    pub fn local_node(url: impl Into<String>) -> Self {
        Self::new(url).with_timeout(Duration::from_secs(120))
    }

    /// Configuration preset for Infura
    #[must_use]
    pub fn infura(project_id: &str, network: &str) -> Self {
        Self::new(format!("https://{network}.infura.io/v3/{project_id}"))
    }

    /// Configuration preset for Alchemy
    #[must_use]
    pub fn alchemy(api_key: &str, network: &str) -> Self {
        Self::new(format!("https://{network}.g.alchemy.com/v2/{api_key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_new() {
        let config = ProviderConfig::new("https://eth.llamarpc.com");
        assert_eq!(config.url, "https://eth.llamarpc.com");
        assert_eq!(config.timeout, DEFAULT_RPC_TIMEOUT);
    }

    #[test]
    fn test_provider_config_default_is_local() {
        assert_eq!(ProviderConfig::default().url, "http://localhost:8545");
    }

    #[test]
    fn test_provider_config_presets() {
        let config = ProviderConfig::infura("abc", "mainnet");
        assert_eq!(config.url, "https://mainnet.infura.io/v3/abc");

        let config = ProviderConfig::alchemy("key", "eth-mainnet");
        assert_eq!(config.url, "https://eth-mainnet.g.alchemy.com/v2/key");

        let config = ProviderConfig::local_node("http://127.0.0.1:8545");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }
}
