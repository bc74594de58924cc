// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain data resolved by a search
//!
//! These are plain, network-agnostic snapshots of what the chain node returned.
//! They are immutable once fetched; reorgs are not tracked.

use alloy_primitives::{Address, BlockHash, BlockNumber, TxHash, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::wei::{EtherUnit, WeiAmount};

/// A transaction as returned by `eth_getTransactionByHash`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: TxHash,
    pub from: Address,
    /// `None` for contract creations
    pub to: Option<Address>,
    /// Transferred value in wei
    pub value: U256,
    /// Gas limit
    pub gas: u64,
    /// Gas price in wei (max fee per gas for dynamic-fee transactions)
    pub gas_price: u128,
    pub nonce: u64,
    /// Set once the transaction is mined
    pub block_number: Option<BlockNumber>,
}

impl Transaction {
    /// Value as an exact decimal string in `unit`
    pub fn value_in(&self, unit: EtherUnit) -> String {
        WeiAmount::new(self.value).to_unit(unit)
    }

    /// Gas price as an exact decimal string in `unit`
    pub fn gas_price_in(&self, unit: EtherUnit) -> String {
        WeiAmount::from(self.gas_price).to_unit(unit)
    }

    /// True when the transaction deploys a contract
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// Post-execution record of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Present only once the transaction is mined
    pub block_number: Option<BlockNumber>,
    pub gas_used: u64,
    /// `true` when execution succeeded
    pub status: bool,
    pub effective_gas_price: u128,
    /// Address of the deployed contract, for contract creations
    pub contract_address: Option<Address>,
}

/// Result of a successful transaction lookup
///
/// The receipt is fetched opportunistically and is `None` for pending
/// transactions or when the receipt lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLookup {
    pub transaction: Transaction,
    pub receipt: Option<Receipt>,
}

/// Block header fields needed to render confirmations and timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Unique key in the block cache
    pub number: BlockNumber,
    pub hash: BlockHash,
    /// Unix seconds
    pub timestamp: u64,
}

impl Block {
    /// Block timestamp as a UTC datetime
    ///
    /// Returns `None` if the timestamp is outside chrono's representable range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::try_from(self.timestamp).ok()?, 0)
    }

    /// How long before `now` this block was produced
    ///
    /// Saturates to zero for blocks stamped in the future of `now`.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        let now = u64::try_from(now.timestamp()).unwrap_or(0);
        Duration::from_secs(now.saturating_sub(self.timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn block(timestamp: u64) -> Block {
        Block {
            number: 100,
            hash: BlockHash::ZERO,
            timestamp,
        }
    }

    #[test]
    fn test_block_datetime() {
        let dt = block(1_700_000_000).datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_block_age() {
        let now = DateTime::from_timestamp(1_700_000_060, 0).unwrap();
        assert_eq!(block(1_700_000_000).age_at(now), Duration::from_secs(60));
        assert_eq!(block(1_700_000_100).age_at(now), Duration::ZERO);
    }

    #[test]
    fn test_transaction_unit_helpers() {
        let tx = Transaction {
            hash: TxHash::ZERO,
            from: address!("1111111111111111111111111111111111111111"),
            to: None,
            value: U256::from(250_000_000_000_000_000u64),
            gas: 21_000,
            gas_price: 30_000_000_000,
            nonce: 7,
            block_number: None,
        };

        assert_eq!(tx.value_in(EtherUnit::Ether), "0.25");
        assert_eq!(tx.gas_price_in(EtherUnit::Gwei), "30");
        assert!(tx.is_contract_creation());
    }
}
