// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for chainseek integration tests
//!
//! Provides mock implementations of the collaborator traits so the search
//! core can be tested without a chain node or explorer service.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{Address, BlockHash, BlockNumber, TxHash, U256};
use async_trait::async_trait;
use chainseek::{
    AddressInfo, Block, ChainClient, ExplorerClient, ExplorerError, Receipt, RpcError,
    Transaction, TransactionLookup, WeiAmount,
};
use tokio::sync::Semaphore;

/// Hash made of one repeated byte
pub fn hash(byte: u8) -> TxHash {
    TxHash::repeat_byte(byte)
}

/// Search string for [`hash`]
pub fn hash_str(byte: u8) -> String {
    format!("{:#x}", hash(byte))
}

pub fn transaction(hash: TxHash, block_number: Option<BlockNumber>) -> Transaction {
    Transaction {
        hash,
        from: Address::repeat_byte(0x11),
        to: Some(Address::repeat_byte(0x22)),
        value: U256::from(1_500_000_000_000_000_000u128),
        gas: 21_000,
        gas_price: 30_000_000_000,
        nonce: 7,
        block_number,
    }
}

pub fn receipt(block_number: BlockNumber) -> Receipt {
    Receipt {
        block_number: Some(block_number),
        gas_used: 21_000,
        status: true,
        effective_gas_price: 30_000_000_000,
        contract_address: None,
    }
}

/// Blocks served by [`MockChainClient`] have this timestamp
pub fn block_timestamp(number: BlockNumber) -> u64 {
    1_700_000_000 + number * 12
}

pub fn address_info(address: Address) -> AddressInfo {
    AddressInfo {
        address,
        balance: WeiAmount::from(2_000_000_000_000_000_000u128),
        is_contract: false,
        contract_meta: None,
        transaction_count: Some(3),
        tokens: Vec::new(),
    }
}

fn refused() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused")
}

/// Mock ChainClient with call counters and gates
///
/// A gated lookup blocks until the test calls the matching `release_*`
/// method, which makes it possible to hold a fetch in flight while other
/// calls happen.
///
/// # Example
///
/// ```rust,ignore
/// let mock = Arc::new(
///     MockChainClient::new()
///         .with_transaction(hash(1), Some(receipt(100)))
///         .with_heights([10, 11, 12]),
/// );
/// ```
pub struct MockChainClient {
    transactions: HashMap<TxHash, TransactionLookup>,
    failing_hashes: HashSet<TxHash>,
    gated_hashes: HashSet<TxHash>,
    tx_gate: Arc<Semaphore>,
    block_gate: Option<Arc<Semaphore>>,
    block_failures: AtomicUsize,
    heights: Mutex<VecDeque<Option<BlockNumber>>>,
    height_latency: Option<Duration>,
    heights_in_flight: AtomicUsize,
    max_heights_in_flight: AtomicUsize,
    pub tx_calls: AtomicUsize,
    pub block_calls: AtomicUsize,
    pub height_calls: AtomicUsize,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self {
            transactions: HashMap::new(),
            failing_hashes: HashSet::new(),
            gated_hashes: HashSet::new(),
            tx_gate: Arc::new(Semaphore::new(0)),
            block_gate: None,
            block_failures: AtomicUsize::new(0),
            heights: Mutex::new(VecDeque::new()),
            height_latency: None,
            heights_in_flight: AtomicUsize::new(0),
            max_heights_in_flight: AtomicUsize::new(0),
            tx_calls: AtomicUsize::new(0),
            block_calls: AtomicUsize::new(0),
            height_calls: AtomicUsize::new(0),
        }
    }

    /// Serve a transaction for `hash`, mined when `receipt` carries a block
    pub fn with_transaction(mut self, hash: TxHash, receipt: Option<Receipt>) -> Self {
        let block_number = receipt.as_ref().and_then(|r| r.block_number);
        self.transactions.insert(
            hash,
            TransactionLookup {
                transaction: transaction(hash, block_number),
                receipt,
            },
        );
        self
    }

    /// Fail every lookup of `hash` with a connection error
    pub fn with_failing_hash(mut self, hash: TxHash) -> Self {
        self.failing_hashes.insert(hash);
        self
    }

    /// Hold lookups of `hash` until [`release_transaction`](Self::release_transaction)
    pub fn with_gated_hash(mut self, hash: TxHash) -> Self {
        self.gated_hashes.insert(hash);
        self
    }

    /// Hold every block fetch until [`release_blocks`](Self::release_blocks)
    pub fn with_gated_blocks(mut self) -> Self {
        self.block_gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Fail the next `count` block fetches
    pub fn with_block_failures(self, count: usize) -> Self {
        self.block_failures.store(count, Ordering::SeqCst);
        self
    }

    /// Heights returned by successive `get_block_number` calls, then errors
    pub fn with_heights(self, heights: impl IntoIterator<Item = BlockNumber>) -> Self {
        self.push_heights(heights.into_iter().map(Some));
        self
    }

    /// Make every `get_block_number` call take `latency` before answering
    pub fn with_height_latency(mut self, latency: Duration) -> Self {
        self.height_latency = Some(latency);
        self
    }

    /// Queue height answers; `None` answers with an error
    pub fn push_heights(&self, heights: impl IntoIterator<Item = Option<BlockNumber>>) {
        self.heights.lock().unwrap().extend(heights);
    }

    pub fn release_transaction(&self) {
        self.tx_gate.add_permits(1);
    }

    pub fn release_blocks(&self, count: usize) {
        if let Some(gate) = &self.block_gate {
            gate.add_permits(count);
        }
    }

    pub fn tx_calls(&self) -> usize {
        self.tx_calls.load(Ordering::SeqCst)
    }

    pub fn block_calls(&self) -> usize {
        self.block_calls.load(Ordering::SeqCst)
    }

    pub fn height_calls(&self) -> usize {
        self.height_calls.load(Ordering::SeqCst)
    }

    /// Most `get_block_number` calls seen running at once
    pub fn max_heights_in_flight(&self) -> usize {
        self.max_heights_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn get_transaction(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionLookup>, RpcError> {
        self.tx_calls.fetch_add(1, Ordering::SeqCst);

        if self.gated_hashes.contains(&hash) {
            self.tx_gate.acquire().await.unwrap().forget();
        }
        if self.failing_hashes.contains(&hash) {
            return Err(RpcError::get_transaction_failed(hash, refused()));
        }
        Ok(self.transactions.get(&hash).cloned())
    }

    async fn get_block(&self, number: BlockNumber) -> Result<Block, RpcError> {
        self.block_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.block_gate {
            gate.acquire().await.unwrap().forget();
        }
        let failing = self
            .block_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(RpcError::get_block_failed(number, refused()));
        }

        Ok(Block {
            number,
            hash: BlockHash::repeat_byte((number % 256) as u8),
            timestamp: block_timestamp(number),
        })
    }

    async fn get_block_number(&self) -> Result<BlockNumber, RpcError> {
        self.height_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.height_latency {
            let in_flight = self.heights_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_heights_in_flight
                .fetch_max(in_flight, Ordering::SeqCst);
            tokio::time::sleep(latency).await;
            self.heights_in_flight.fetch_sub(1, Ordering::SeqCst);
        }

        match self.heights.lock().unwrap().pop_front() {
            Some(Some(height)) => Ok(height),
            Some(None) | None => Err(RpcError::get_block_number_failed(refused())),
        }
    }
}

/// Mock ExplorerClient serving a fixed set of addresses
#[derive(Default)]
pub struct MockExplorerClient {
    infos: HashMap<Address, AddressInfo>,
    fail: bool,
    pub calls: AtomicUsize,
}

impl MockExplorerClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(mut self, info: AddressInfo) -> Self {
        self.infos.insert(info.address, info);
        self
    }

    /// Answer every lookup with an HTTP 503
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExplorerClient for MockExplorerClient {
    async fn get_address_info(
        &self,
        address: Address,
    ) -> Result<Option<AddressInfo>, ExplorerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(ExplorerError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        Ok(self.infos.get(&address).cloned())
    }
}
