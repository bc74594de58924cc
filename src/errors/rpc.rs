// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for chain-node operations.
//!
//! These errors are produced by [`ChainClient`](crate::ChainClient)
//! implementations and carry enough context (hash, block number) to tell the
//! user which lookup failed.

/// Errors that can occur while talking to a chain node.
///
/// A missing transaction is *not* an error: chain clients report it as
/// `Ok(None)` so the resolver can render "no matching entries". The variants
/// here are reserved for calls that actually failed.
///
/// # Examples
///
/// ```rust
/// use chainseek::RpcError;
///
/// let error = RpcError::BlockNotFound { block_number: 17_000_000 };
/// assert_eq!(error.to_string(), "Block not found: 17000000");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Fetching a transaction by hash failed.
    ///
    /// Covers timeouts, malformed responses and connectivity problems.
    #[error("Failed to fetch transaction {tx_hash}")]
    GetTransactionFailed {
        /// The transaction hash we looked up
        tx_hash: String,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Block was not found at the specified block number.
    ///
    /// This can occur if the block number is beyond the chain tip or the
    /// provider hasn't synced that block yet.
    #[error("Block not found: {block_number}")]
    BlockNotFound {
        /// The block number that wasn't found
        block_number: u64,
    },

    /// Failed to fetch block details by number.
    ///
    /// This is different from `BlockNotFound` - it indicates the RPC call itself
    /// failed, not that the block doesn't exist.
    #[error("Failed to fetch block {block_number} details")]
    GetBlockFailed {
        /// The block number we tried to fetch
        block_number: u64,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to fetch the current block number from the chain.
    #[error("Failed to get current block number")]
    GetBlockNumberFailed {
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configured RPC URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),

    /// The HTTP transport backing the provider could not be built.
    #[error("Provider connection failed: {0}")]
    ProviderConnectionFailed(String),
}

impl RpcError {
    /// Helper to create a `GetTransactionFailed` error from any error type.
    pub fn get_transaction_failed(
        tx_hash: impl ToString,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetTransactionFailed {
            tx_hash: tx_hash.to_string(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockFailed` error from any error type.
    pub fn get_block_failed(
        block_number: u64,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetBlockFailed {
            block_number,
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockNumberFailed` error from any error type.
    pub fn get_block_number_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RpcError::GetBlockNumberFailed {
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_get_block_failed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline elapsed");
        let err = RpcError::get_block_failed(42, io);

        assert_eq!(err.to_string(), "Failed to fetch block 42 details");
        let source = err.source().expect("source should be attached");
        assert_eq!(source.to_string(), "deadline elapsed");
    }

    #[test]
    fn test_get_transaction_failed_formats_hash() {
        let io = std::io::Error::other("connection reset");
        let err = RpcError::get_transaction_failed("0xabc", io);
        assert_eq!(err.to_string(), "Failed to fetch transaction 0xabc");
    }
}
