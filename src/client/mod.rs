// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Collaborator contracts for the two external data sources
//!
//! The search core never talks to the network directly. It depends on:
//!
//! - [`ChainClient`] - the chain node (transactions, receipts, blocks, height)
//! - [`ExplorerClient`] - the block explorer (address and contract metadata)
//!
//! Both report failures through typed errors and report "nothing there" as
//! `Ok(None)`, so the resolver can tell not-found apart from a failed call.
//!
//! Concrete implementations:
//!
//! - [`AlloyChainClient`] over any alloy `Provider`
//! - [`EthplorerClient`] over the Ethplorer HTTP API
//!
//! # Example: Implementing a custom explorer
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use alloy_primitives::Address;
//! use chainseek::{AddressInfo, ExplorerClient, ExplorerError};
//!
//! struct MyExplorer;
//!
//! #[async_trait]
//! impl ExplorerClient for MyExplorer {
//!     async fn get_address_info(
//!         &self,
//!         address: Address,
//!     ) -> Result<Option<AddressInfo>, ExplorerError> {
//!         Ok(None)
//!     }
//! }
//! ```

use alloy_primitives::{Address, BlockNumber, TxHash, U256};
use async_trait::async_trait;

use crate::classify::is_valid_address;
use crate::errors::{ExplorerError, RpcError};
use crate::types::address::AddressInfo;
use crate::types::chain::{Block, TransactionLookup};
use crate::types::wei::{from_wei, EtherUnit};

mod alloy;
mod ethplorer;

pub use self::alloy::AlloyChainClient;
pub use self::ethplorer::EthplorerClient;

/// Read-only access to a chain node
///
/// # Thread Safety
///
/// Implementations are shared behind `Arc` between the resolver, the block
/// cache and the height poller, and are called from spawned tasks.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address validity predicate used by the input classifier
    ///
    /// Defaults to [`is_valid_address`] (hex format plus EIP-55 checksum for
    /// mixed-case input).
    fn is_address(&self, value: &str) -> bool {
        is_valid_address(value)
    }

    /// Look up a transaction and, opportunistically, its receipt
    ///
    /// Returns `Ok(None)` when the node does not know the hash. A missing or
    /// failed receipt lookup yields `receipt: None`, not an error.
    async fn get_transaction(&self, hash: TxHash)
        -> Result<Option<TransactionLookup>, RpcError>;

    /// Fetch a block header by number
    async fn get_block(&self, number: BlockNumber) -> Result<Block, RpcError>;

    /// Current chain height
    async fn get_block_number(&self) -> Result<BlockNumber, RpcError>;

    /// Format a wei amount in the given unit
    fn from_wei(&self, amount: U256, unit: EtherUnit) -> String {
        from_wei(amount, unit)
    }
}

/// Rich address metadata from a block explorer
#[async_trait]
pub trait ExplorerClient: Send + Sync {
    /// Fetch balance, contract and token details for `address`
    ///
    /// Returns `Ok(None)` when the explorer has no record of the address.
    async fn get_address_info(&self, address: Address)
        -> Result<Option<AddressInfo>, ExplorerError>;
}
