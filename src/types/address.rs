// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Address and contract metadata from the explorer service

use alloy_primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};

use super::wei::WeiAmount;

/// Everything the explorer knows about an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub address: Address,
    /// Native currency balance
    pub balance: WeiAmount,
    pub is_contract: bool,
    /// Present when `is_contract` is true
    pub contract_meta: Option<ContractMeta>,
    /// Number of transactions the explorer has indexed for the address
    pub transaction_count: Option<u64>,
    /// Token balances held by the address
    #[serde(default)]
    pub tokens: Vec<TokenHolding>,
}

/// Deployment details of a contract address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMeta {
    pub creator: Option<Address>,
    pub creation_tx: Option<TxHash>,
    /// Unix seconds of the creation transaction
    pub created_at: Option<u64>,
    /// Set when the contract is itself a token
    pub token: Option<TokenMeta>,
}

/// Token descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMeta {
    pub address: Address,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    /// Raw total supply, in the token's smallest unit
    pub total_supply: Option<U256>,
    pub holders: Option<u64>,
}

/// A token balance held by an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHolding {
    pub token: TokenMeta,
    /// Raw balance in the token's smallest unit
    pub raw_balance: U256,
}
