// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`ExplorerClient`] over the Ethplorer `getAddressInfo` endpoint

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn, Instrument};
use url::Url;

use super::ExplorerClient;
use crate::config::ExplorerConfig;
use crate::errors::ExplorerError;
use crate::tracing::spans;
use crate::types::address::{AddressInfo, ContractMeta, TokenHolding, TokenMeta};
use crate::types::wei::WeiAmount;

/// Longest error body kept in [`ExplorerError::Status`]
const MAX_ERROR_BODY: usize = 256;

/// HTTP client for the Ethplorer API
///
/// # Examples
///
/// ```rust,ignore
/// use chainseek::{EthplorerClient, ExplorerClient};
/// use chainseek::config::ExplorerConfig;
///
/// let client = EthplorerClient::from_config(&ExplorerConfig::default())?;
/// let info = client.get_address_info(address).await?;
/// ```
#[derive(Debug, Clone)]
pub struct EthplorerClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EthplorerClient {
    /// Create a client for `base_url` authenticating with `api_key`
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ExplorerError> {
        Url::parse(base_url).map_err(|e| ExplorerError::BaseUrlInvalid {
            url: base_url.to_string(),
            details: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExplorerError::request_failed("<client>", e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &ExplorerConfig) -> Result<Self, ExplorerError> {
        Self::new(&config.base_url, config.api_key.clone(), config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn address_info_url(&self, address: Address) -> String {
        format!("{}/getAddressInfo/{address:#x}", self.base_url)
    }

    async fn fetch(&self, address: Address) -> Result<Option<AddressInfo>, ExplorerError> {
        let label = format!("{address:#x}");
        let response = self
            .http
            .get(self.address_info_url(address))
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ExplorerError::request_failed(label.clone(), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExplorerError::request_failed(label, e))?;

        if status == StatusCode::NOT_FOUND {
            debug!(%address, "Explorer has no record of address");
            return Ok(None);
        }

        // Ethplorer reports most failures as an error object, sometimes with a 4xx status
        if let Ok(ErrorEnvelope { error }) = serde_json::from_str::<ErrorEnvelope>(&body) {
            return Err(ExplorerError::Api {
                code: error.code,
                message: error.message,
            });
        }

        if !status.is_success() {
            return Err(ExplorerError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        parse_address_info(address, &body).map(Some)
    }
}

#[async_trait]
impl ExplorerClient for EthplorerClient {
    async fn get_address_info(
        &self,
        address: Address,
    ) -> Result<Option<AddressInfo>, ExplorerError> {
        self.fetch(address)
            .instrument(spans::get_address_info(address))
            .await
    }
}

fn truncate(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAddressInfo {
    #[serde(rename = "ETH")]
    eth: Option<RawEth>,
    count_txs: Option<u64>,
    contract_info: Option<RawContractInfo>,
    token_info: Option<RawTokenInfo>,
    /// Decoded one by one so a single malformed holding is skipped
    #[serde(default)]
    tokens: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEth {
    balance: Option<f64>,
    raw_balance: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContractInfo {
    creator_address: Option<String>,
    transaction_hash: Option<String>,
    timestamp: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTokenInfo {
    address: String,
    name: Option<String>,
    symbol: Option<String>,
    decimals: Option<NumberOrString>,
    total_supply: Option<NumberOrString>,
    holders_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawToken {
    token_info: RawTokenInfo,
    raw_balance: Option<String>,
}

/// Ethplorer is inconsistent about quoting numeric fields
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

impl NumberOrString {
    fn as_text(&self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::String(s) => s.trim().to_string(),
        }
    }
}

fn parse_address_info(address: Address, body: &str) -> Result<AddressInfo, ExplorerError> {
    let raw: RawAddressInfo =
        serde_json::from_str(body).map_err(|e| ExplorerError::decode(e.to_string()))?;

    let balance = match raw.eth {
        Some(eth) => eth_balance(&eth)?,
        None => WeiAmount::ZERO,
    };

    let is_contract = raw.contract_info.is_some();
    let token = raw.token_info.as_ref().and_then(|info| match token_meta(info) {
        Ok(meta) => Some(meta),
        Err(e) => {
            warn!(%address, error = %e, "Ignoring malformed tokenInfo");
            None
        }
    });
    let contract_meta = raw
        .contract_info
        .map(|info| -> Result<ContractMeta, ExplorerError> {
            Ok(ContractMeta {
                creator: optional_address(info.creator_address.as_deref())?,
                creation_tx: optional_hash(info.transaction_hash.as_deref())?,
                created_at: info.timestamp,
                token,
            })
        })
        .transpose()?;

    let tokens = raw
        .tokens
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match token_holding(value) {
            Ok(holding) => Some(holding),
            Err(e) => {
                warn!(%address, index, error = %e, "Skipping malformed token holding");
                None
            }
        })
        .collect();

    Ok(AddressInfo {
        address,
        balance,
        is_contract,
        contract_meta,
        transaction_count: raw.count_txs,
        tokens,
    })
}

/// Prefer the exact `rawBalance`, fall back to the float `balance` in ether
fn eth_balance(eth: &RawEth) -> Result<WeiAmount, ExplorerError> {
    if let Some(raw) = eth.raw_balance.as_deref() {
        return parse_u256("ETH.rawBalance", raw).map(WeiAmount::new);
    }

    let Some(ether) = eth.balance else {
        return Ok(WeiAmount::ZERO);
    };

    let ether = BigDecimal::from_str(&ether.to_string())
        .map_err(|e| ExplorerError::decode(format!("ETH.balance {ether}: {e}")))?;
    let wei = ether * BigDecimal::from(1_000_000_000_000_000_000u64);
    let (int, _) = wei.with_scale(0).into_bigint_and_exponent();
    parse_u256("ETH.balance", &int.to_string()).map(WeiAmount::new)
}

fn token_holding(value: serde_json::Value) -> Result<TokenHolding, ExplorerError> {
    let raw: RawToken =
        serde_json::from_value(value).map_err(|e| ExplorerError::decode(e.to_string()))?;
    Ok(TokenHolding {
        token: token_meta(&raw.token_info)?,
        raw_balance: parse_u256("rawBalance", raw.raw_balance.as_deref().unwrap_or("0"))?,
    })
}

/// Token metadata; an unreadable `decimals` or `totalSupply` becomes `None`
fn token_meta(info: &RawTokenInfo) -> Result<TokenMeta, ExplorerError> {
    let decimals = info.decimals.as_ref().and_then(|d| {
        let text = d.as_text();
        match text.parse::<u8>() {
            Ok(decimals) => Some(decimals),
            Err(e) => {
                warn!(token = %info.address, decimals = %text, error = %e, "Ignoring token decimals");
                None
            }
        }
    });

    let total_supply = info.total_supply.as_ref().and_then(|s| {
        let text = s.as_text();
        match token_supply(&text) {
            Ok(supply) => Some(supply),
            Err(e) => {
                warn!(token = %info.address, error = %e, "Ignoring token total supply");
                None
            }
        }
    });

    Ok(TokenMeta {
        address: parse_address("tokenInfo.address", &info.address)?,
        name: info.name.clone().filter(|n| !n.is_empty()),
        symbol: info.symbol.clone().filter(|s| !s.is_empty()),
        decimals,
        total_supply,
        holders: info.holders_count,
    })
}

/// Integer supply, also accepting exponent notation such as `1e+27`
fn token_supply(text: &str) -> Result<U256, ExplorerError> {
    if let Ok(supply) = U256::from_str(text) {
        return Ok(supply);
    }

    let decimal = BigDecimal::from_str(text)
        .map_err(|e| ExplorerError::decode(format!("tokenInfo.totalSupply {text}: {e}")))?;
    let int = decimal.with_scale(0);
    if int != decimal {
        return Err(ExplorerError::decode(format!(
            "tokenInfo.totalSupply {text}: not an integer"
        )));
    }
    let (digits, _) = int.into_bigint_and_exponent();
    parse_u256("tokenInfo.totalSupply", &digits.to_string())
}

fn parse_u256(field: &str, value: &str) -> Result<U256, ExplorerError> {
    U256::from_str(value).map_err(|e| ExplorerError::decode(format!("{field} {value}: {e}")))
}

fn parse_address(field: &str, value: &str) -> Result<Address, ExplorerError> {
    Address::from_str(value).map_err(|e| ExplorerError::decode(format!("{field} {value}: {e}")))
}

fn optional_address(value: Option<&str>) -> Result<Option<Address>, ExplorerError> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| parse_address("contractInfo.creatorAddress", v))
        .transpose()
}

fn optional_hash(value: Option<&str>) -> Result<Option<TxHash>, ExplorerError> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| {
            TxHash::from_str(v).map_err(|e| {
                ExplorerError::decode(format!("contractInfo.transactionHash {v}: {e}"))
            })
        })
        .transpose()
}
