// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Deduplicated, write-once block cache
//!
//! Each block number maps to either a resolved [`Block`] or a single shared
//! in-flight fetch. Callers that ask for a block while its fetch is pending
//! join that fetch and receive the same result. A resolved block is never
//! refetched or evicted; a failed fetch leaves no entry behind so the next
//! request retries.
//!
//! # Examples
//!
//! ```rust,ignore
//! use chainseek::BlockCache;
//!
//! let cache = BlockCache::new(client);
//! let block = cache.get_block(19_000_000).await?;
//! assert_eq!(cache.peek(19_000_000), Some(block));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use alloy_primitives::BlockNumber;
use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, warn, Instrument};

use crate::client::ChainClient;
use crate::errors::BlockCacheError;
use crate::tracing::spans;
use crate::types::chain::Block;

type SharedFetch = Shared<BoxFuture<'static, Result<Block, BlockCacheError>>>;

enum Slot {
    Ready(Block),
    Pending { id: u64, fetch: SharedFetch },
}

enum Lookup {
    Ready(Block),
    Joined(SharedFetch),
    Started(SharedFetch),
}

#[derive(Default)]
struct State {
    slots: HashMap<BlockNumber, Slot>,
    next_fetch_id: u64,
    stats: CacheStats,
}

/// Statistics for block cache performance monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a resolved entry
    pub hits: u64,
    /// Lookups that found no entry at all
    pub misses: u64,
    /// Network fetches issued
    pub fetches: u64,
    /// Lookups that joined a fetch already in flight
    pub joins: u64,
    /// Fetches that failed (and were not cached)
    pub failures: u64,
    /// Current number of resolved blocks
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.joins;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, fetches={}, joins={}, failures={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.fetches,
            self.joins,
            self.failures,
            self.entries,
            self.hit_rate()
        )
    }
}

/// Session-lifetime cache of block headers keyed by block number
///
/// Cloning is cheap; clones share the same entries.
///
/// # Thread Safety
///
/// The entry map sits behind a `std::sync::Mutex` that is never held across
/// an await point, so [`peek`](Self::peek) can be called from synchronous
/// code while fetches are running.
#[derive(Clone)]
pub struct BlockCache {
    client: Arc<dyn ChainClient>,
    state: Arc<Mutex<State>>,
}

impl fmt::Debug for BlockCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockCache")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl BlockCache {
    pub fn new(client: Arc<dyn ChainClient>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Return the cached block without ever fetching
    pub fn peek(&self, number: BlockNumber) -> Option<Block> {
        let mut guard = lock(&self.state);
        let state = &mut *guard;
        match state.slots.get(&number) {
            Some(Slot::Ready(block)) => {
                state.stats.hits += 1;
                Some(block.clone())
            }
            Some(Slot::Pending { .. }) => None,
            None => {
                state.stats.misses += 1;
                None
            }
        }
    }

    /// Get a block, fetching it at most once however many callers ask
    ///
    /// # Errors
    ///
    /// Returns [`BlockCacheError::Fetch`] when the underlying fetch failed.
    /// Every caller that joined that fetch receives the same error, and the
    /// entry is left empty so a later call retries.
    pub async fn get_block(&self, number: BlockNumber) -> Result<Block, BlockCacheError> {
        match self.lookup(number) {
            Lookup::Ready(block) => Ok(block),
            Lookup::Joined(fetch) | Lookup::Started(fetch) => fetch.await,
        }
    }

    /// Make sure a fetch for `number` is running, without waiting for it
    ///
    /// Does nothing when the block is already cached or being fetched. Must
    /// be called from within a Tokio runtime; outside one the request is
    /// dropped with a warning.
    pub fn request(&self, number: BlockNumber) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(block_number = number, "No Tokio runtime, block request dropped");
            return;
        };

        if let Lookup::Started(fetch) = self.lookup(number) {
            handle.spawn(async move {
                // failures are logged by the fetch itself
                let _ = fetch.await;
            });
        }
    }

    fn lookup(&self, number: BlockNumber) -> Lookup {
        let mut guard = lock(&self.state);
        let state = &mut *guard;
        match state.slots.get(&number) {
            Some(Slot::Ready(block)) => {
                state.stats.hits += 1;
                return Lookup::Ready(block.clone());
            }
            Some(Slot::Pending { fetch, .. }) => {
                state.stats.joins += 1;
                return Lookup::Joined(fetch.clone());
            }
            None => {}
        }

        state.stats.misses += 1;
        state.stats.fetches += 1;
        state.next_fetch_id += 1;
        let id = state.next_fetch_id;
        let fetch = self.start_fetch(number, id);
        state.slots.insert(
            number,
            Slot::Pending {
                id,
                fetch: fetch.clone(),
            },
        );
        Lookup::Started(fetch)
    }

    /// Whether `number` is resolved or has a fetch in flight
    pub fn contains(&self, number: BlockNumber) -> bool {
        lock(&self.state).slots.contains_key(&number)
    }

    /// Number of resolved blocks
    pub fn len(&self) -> usize {
        lock(&self.state)
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let guard = lock(&self.state);
        let entries = guard
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count();
        CacheStats {
            entries,
            ..guard.stats
        }
    }

    fn start_fetch(&self, number: BlockNumber, id: u64) -> SharedFetch {
        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);

        async move {
            let result = client.get_block(number).await;

            let mut guard = lock(&state);
            let ours = matches!(
                guard.slots.get(&number),
                Some(Slot::Pending { id: current, .. }) if *current == id
            );

            match result {
                Ok(block) => {
                    if ours {
                        guard.slots.insert(number, Slot::Ready(block.clone()));
                    }
                    debug!(block_number = number, timestamp = block.timestamp, "Block cached");
                    Ok(block)
                }
                Err(e) => {
                    if ours {
                        guard.slots.remove(&number);
                    }
                    guard.stats.failures += 1;
                    warn!(block_number = number, error = %e, "Block fetch failed");
                    Err(BlockCacheError::Fetch {
                        block_number: number,
                        source: Arc::new(e),
                    })
                }
            }
        }
        .instrument(spans::fetch_block(number, id))
        .boxed()
        .shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RpcError;
    use crate::types::chain::TransactionLookup;
    use alloy_primitives::{BlockHash, TxHash};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Serves blocks with timestamp = number * 12, failing odd numbers on demand
    #[derive(Default)]
    struct CountingClient {
        calls: AtomicU64,
        fail: bool,
    }

    #[async_trait]
    impl ChainClient for CountingClient {
        async fn get_transaction(
            &self,
            _hash: TxHash,
        ) -> Result<Option<TransactionLookup>, RpcError> {
            Ok(None)
        }

        async fn get_block(&self, number: BlockNumber) -> Result<Block, RpcError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail {
                return Err(RpcError::BlockNotFound {
                    block_number: number,
                });
            }
            Ok(Block {
                number,
                hash: BlockHash::ZERO,
                timestamp: number * 12,
            })
        }

        async fn get_block_number(&self) -> Result<BlockNumber, RpcError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_get_then_peek() {
        let client = Arc::new(CountingClient::default());
        let cache = BlockCache::new(client.clone());

        assert_eq!(cache.peek(7), None);
        let block = cache.get_block(7).await.unwrap();
        assert_eq!(block.timestamp, 84);
        assert_eq!(cache.peek(7), Some(block.clone()));

        // second get is served from the entry
        assert_eq!(cache.get_block(7).await.unwrap(), block);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_gets_share_one_fetch() {
        let client = Arc::new(CountingClient::default());
        let cache = BlockCache::new(client.clone());

        let (a, b) = tokio::join!(cache.get_block(3), cache.get_block(3));
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);

        let stats = cache.stats();
        assert_eq!(stats.fetches, 1);
        assert_eq!(stats.joins, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let client = Arc::new(CountingClient {
            fail: true,
            ..Default::default()
        });
        let cache = BlockCache::new(client.clone());

        let err = cache.get_block(5).await.unwrap_err();
        assert_eq!(err.block_number(), 5);
        assert!(!cache.contains(5));

        let _ = cache.get_block(5).await.unwrap_err();
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().failures, 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_request_populates_in_background() {
        let client = Arc::new(CountingClient::default());
        let cache = BlockCache::new(client.clone());

        cache.request(9);
        cache.request(9);
        assert!(cache.contains(9));

        // joining the spawned fetch, not starting another
        let block = cache.get_block(9).await.unwrap();
        assert_eq!(block.number, 9);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stats_display() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert_eq!(stats.hit_rate(), 75.0);
        assert!(stats.to_string().starts_with("hits=3, misses=1"));
    }
}
