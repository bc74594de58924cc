// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions

use alloy_network::{AnyNetwork, Network};
use alloy_provider::{ProviderBuilder, RootProvider};
use alloy_rpc_client::{ClientBuilder, RpcClient};
use alloy_transport_http::{Client as HttpClient, Http};

use crate::errors::RpcError;

use super::config::ProviderConfig;
use super::AnyHttpProvider;

/// Create an HTTP provider with the given configuration
///
/// Uses `AnyNetwork` so the chain can be chosen at runtime. The configured
/// timeout applies to every request.
///
/// # Examples
///
/// ```rust,ignore
/// use chainseek::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(ProviderConfig::new("https://eth.llamarpc.com"))?;
/// ```
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL does not parse and
/// [`RpcError::ProviderConnectionFailed`] if the HTTP client cannot be built.
pub fn create_http_provider(config: ProviderConfig) -> Result<AnyHttpProvider, RpcError> {
    create_typed_http_provider::<AnyNetwork>(config)
}

/// Create an HTTP provider for a specific network type
///
/// # Examples
///
/// ```rust,ignore
/// use alloy_network::Ethereum;
/// use chainseek::provider::{create_typed_http_provider, ProviderConfig};
///
/// let provider = create_typed_http_provider::<Ethereum>(
///     ProviderConfig::new("https://eth.llamarpc.com"),
/// )?;
/// ```
pub fn create_typed_http_provider<N>(config: ProviderConfig) -> Result<RootProvider<N>, RpcError>
where
    N: Network,
{
    let client = build_client(&config)?;

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<N>()
        .connect_client(client))
}

fn build_client(config: &ProviderConfig) -> Result<RpcClient, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{}: {e}", config.url)))?;

    let http_client = HttpClient::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| RpcError::ProviderConnectionFailed(e.to_string()))?;

    let transport = Http::with_client(http_client, url);
    let is_local = transport.guess_local();

    Ok(ClientBuilder::default().transport(transport, is_local))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected() {
        let err = create_http_provider(ProviderConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, RpcError::ProviderUrlInvalid(_)));
    }

    #[test]
    fn test_valid_url_builds_without_network() {
        // Construction never touches the network
        assert!(create_http_provider(ProviderConfig::new("http://localhost:8545")).is_ok());
    }
}
