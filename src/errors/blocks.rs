// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the block cache.

use std::sync::Arc;

use super::RpcError;

/// Failure of a block fetch issued through [`BlockCache`](crate::BlockCache).
///
/// Every caller joined to the same in-flight fetch receives a clone of the
/// same error, so the underlying [`RpcError`] is shared behind an `Arc`.
/// Failures are never cached: the next `get_block` for the same number
/// issues a fresh fetch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BlockCacheError {
    /// The chain client could not produce the block.
    #[error("Block {block_number} could not be fetched")]
    Fetch {
        /// Block number that was requested
        block_number: u64,
        /// Shared underlying RPC failure
        #[source]
        source: Arc<RpcError>,
    },
}

impl BlockCacheError {
    /// Block number the failed fetch was for.
    pub fn block_number(&self) -> u64 {
        match self {
            BlockCacheError::Fetch { block_number, .. } => *block_number,
        }
    }
}
