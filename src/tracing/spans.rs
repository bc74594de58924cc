// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for chainseek operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here. Async
//! callers attach the span with [`tracing::Instrument`] so it follows the
//! future across await points.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async { /* business logic */ }
//!         .instrument(spans::my_operation(param))
//!         .await
//! }
//! ```

use alloy_primitives::{Address, BlockNumber, TxHash};
use tracing::{Level, Span};

/// Create span for resolving one search value.
///
/// Parent: None (root span for this operation)
/// Children: get_transaction or get_address_info span
#[inline]
pub(crate) fn search(kind: &'static str, value: &str, generation: u64) -> Span {
    tracing::span!(
        Level::INFO,
        "chainseek.search",
        kind = kind,
        value = value,
        generation = generation,
    )
}

/// Create span for a transaction lookup against the chain node.
///
/// Parent: search span
/// Children: RPC calls for transaction and receipt retrieval
#[inline]
pub(crate) fn get_transaction(tx_hash: TxHash) -> Span {
    tracing::debug_span!("chainseek.get_transaction", tx_hash = %tx_hash,)
}

/// Create span for an address lookup against the explorer service.
///
/// Parent: search span
/// Children: HTTP request to the explorer
#[inline]
pub(crate) fn get_address_info(address: Address) -> Span {
    tracing::debug_span!("chainseek.get_address_info", address = %address,)
}

/// Create span for fetching a block header.
///
/// Parent: fetch_block span
#[inline]
pub(crate) fn get_block(block_number: BlockNumber) -> Span {
    tracing::trace_span!("chainseek.get_block", block_number = block_number,)
}

/// Create span for the single shared fetch behind a block cache miss.
///
/// Parent: None (runs once however many callers join it)
/// Children: get_block span
#[inline]
pub(crate) fn fetch_block(block_number: BlockNumber, fetch_id: u64) -> Span {
    tracing::debug_span!(
        "chainseek.fetch_block",
        block_number = block_number,
        fetch_id = fetch_id,
    )
}

/// Create span for one chain-height poll.
///
/// Parent: None (one per tick, polls may overlap)
#[inline]
pub(crate) fn poll_height(tick: u64) -> Span {
    tracing::trace_span!("chainseek.poll_height", tick = tick,)
}
