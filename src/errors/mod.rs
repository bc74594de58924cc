// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the chainseek library.
//!
//! This module provides strongly-typed errors for all public APIs in chainseek.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling (`RpcError`,
//!   `ExplorerError`, `SearchError`, etc.)
//! - **Unified error type** (`ChainseekError`) for convenience when you don't need
//!   to distinguish between error sources
//!
//! # Architecture
//!
//! - [`RpcError`] - Chain-node failures (transactions, blocks, height)
//! - [`ExplorerError`] - Block-explorer failures (address metadata)
//! - [`SearchError`] - The failure taxonomy visible at the search boundary
//! - [`BlockCacheError`] - Shared failure handed to every joiner of a block fetch
//! - [`ConfigError`] - Invalid configuration values
//!
//! "Not found" is never an error: collaborators return `Ok(None)` and the
//! resolver records `Done(NotFound)`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use chainseek::{ChainseekError, ChainseekConfig, ExplorerSession};
//!
//! async fn example() -> Result<(), ChainseekError> {
//!     let config = ChainseekConfig::from_env()?;
//!     let session = ExplorerSession::from_config(&config)?;
//!     session.attach()?;
//!     // ...
//!     session.detach();
//!     Ok(())
//! }
//! ```

mod blocks;
mod explorer;
mod rpc;
mod search;

pub use blocks::BlockCacheError;
pub use explorer::ExplorerError;
pub use rpc::RpcError;
pub use search::SearchError;

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Environment variable or field name
        key: String,
        /// The rejected value
        value: String,
    },

    /// A poll interval of zero would spin the height poller.
    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,
}

/// Errors from session lifecycle calls.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// `attach()` was called on a session whose poller is already running.
    #[error("Session is already attached")]
    AlreadyAttached,

    /// `attach()` was called outside a Tokio runtime.
    #[error("No Tokio runtime available to run the height poller")]
    NoRuntime,

    /// The height poller was given a zero interval.
    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,
}

/// Unified error type for all chainseek operations.
///
/// All module-specific error types automatically convert to `ChainseekError` via
/// `From` implementations, so you can use `?` to propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum ChainseekError {
    /// Error from a chain-node call.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error from an explorer call.
    #[error("Explorer error: {0}")]
    Explorer(#[from] ExplorerError),

    /// Error from a search.
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Error from the block cache.
    #[error("Block cache error: {0}")]
    BlockCache(#[from] BlockCacheError),

    /// Error from configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from session lifecycle.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}
