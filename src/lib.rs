// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # chainseek
//!
//! Search core for EVM chain explorers: classify what the user typed, look it
//! up against a chain node or a block explorer, and keep the data needed to
//! show live confirmation counts.
//!
//! - [`classify`] decides between address, transaction hash and invalid input
//! - [`SearchResolver`] runs lookups with a last-search-wins guard
//! - [`BlockCache`] fetches each block at most once per session
//! - [`HeightPoller`] keeps [`CurrentHeight`] fresh
//! - [`confirmations`] combines the two
//! - [`ExplorerSession`] wires all of the above together
//!
//! Network access goes through the [`ChainClient`] and [`ExplorerClient`]
//! traits, implemented here by [`AlloyChainClient`] and [`EthplorerClient`].

pub mod blocks;
pub mod bootstrap;
mod classify;
pub mod client;
pub mod config;
mod confirmations;
pub mod errors;
mod height;
pub mod provider;
pub mod search;
mod session;
mod tracing;
pub mod types;

pub use blocks::{BlockCache, CacheStats};
pub use classify::{classify, classify_with, find_tx_hash, is_valid_address, InputKind};
pub use client::{AlloyChainClient, ChainClient, EthplorerClient, ExplorerClient};
pub use config::{ChainseekConfig, ChainseekConfigBuilder, ExplorerConfig};
pub use confirmations::confirmations;
pub use errors::{
    BlockCacheError, ChainseekError, ConfigError, ExplorerError, RpcError, SearchError,
    SessionError,
};
pub use height::{CurrentHeight, HeightCallback, HeightPoller, UNKNOWN_HEIGHT};
pub use search::{
    FailureKind, SearchOutcome, SearchResolver, SearchState, SearchStatus, Settlement,
};
pub use session::ExplorerSession;
pub use types::address::{AddressInfo, ContractMeta, TokenHolding, TokenMeta};
pub use types::chain::{Block, Receipt, Transaction, TransactionLookup};
pub use types::wei::{from_wei, EtherUnit, WeiAmount};
