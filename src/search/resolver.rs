// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`SearchResolver`]: classification, dispatch and the generation guard

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn, Instrument};

use super::{SearchOutcome, SearchState, SearchStatus};
use crate::classify::{classify_with, InputKind};
use crate::client::{ChainClient, ExplorerClient};
use crate::errors::{SearchError, SessionError};
use crate::tracing::spans;
use crate::types::address::AddressInfo;
use crate::types::chain::TransactionLookup;

/// Whether a completed lookup was allowed to update the visible state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The result belonged to the current search and is now visible
    Applied,
    /// A newer search or a reset superseded it; the result was dropped
    Stale,
}

enum Found {
    Address(AddressInfo),
    Transaction(TransactionLookup),
}

/// Resolves search strings into chain data
///
/// Cloning is cheap; clones drive and observe the same state.
///
/// # Examples
///
/// ```rust,ignore
/// use chainseek::{SearchResolver, SearchStatus, SearchOutcome};
///
/// let resolver = SearchResolver::new(chain, explorer);
/// resolver.search("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").await;
/// let state = resolver.state();
/// assert_eq!(state.status, SearchStatus::Done(SearchOutcome::Found));
/// ```
#[derive(Clone)]
pub struct SearchResolver {
    chain: Arc<dyn ChainClient>,
    explorer: Arc<dyn ExplorerClient>,
    state: Arc<watch::Sender<SearchState>>,
}

impl std::fmt::Debug for SearchResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchResolver")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl SearchResolver {
    pub fn new(chain: Arc<dyn ChainClient>, explorer: Arc<dyn ExplorerClient>) -> Self {
        let (state, _rx) = watch::channel(SearchState::default());
        Self {
            chain,
            explorer,
            state: Arc::new(state),
        }
    }

    /// Snapshot of the visible state
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every visible state change
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Record what the user typed, trimmed, without searching
    pub fn set_search_value(&self, value: &str) {
        let value = value.trim();
        self.state.send_if_modified(|state| {
            if state.search_value == value {
                return false;
            }
            state.search_value = value.to_string();
            true
        });
    }

    /// Clear all results and return to `Idle`, keeping the search value
    ///
    /// Any search still in flight becomes stale.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            state.clear_results();
            state.generation += 1;
        });
    }

    /// Run one search to completion
    ///
    /// Collaborator failures end up in the state as `Done(Error)`; this never
    /// returns an error itself. The return value says whether this search was
    /// still current when it finished.
    ///
    /// Once the search has begun, the lookup runs on its own task, so dropping
    /// this future does not leave the state in `Searching`.
    pub async fn search(&self, value: &str) -> Settlement {
        let value = value.trim().to_string();
        let generation = self.begin(&value);

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return self.resolve(generation, value).await;
        };

        let resolver = self.clone();
        let task = handle.spawn(async move { resolver.resolve(generation, value).await });
        match task.await {
            Ok(settlement) => settlement,
            Err(e) => {
                warn!(generation, error = %e, "Search task ended before settling");
                self.settle(generation, Err(SearchError::interrupted(e)))
            }
        }
    }

    async fn resolve(&self, generation: u64, value: String) -> Settlement {
        let kind = classify_with(&value, |v| self.chain.is_address(v));

        let result = self
            .dispatch(kind, &value)
            .instrument(spans::search(kind.label(), &value, generation))
            .await;

        self.settle(generation, result)
    }

    /// Run a search on a background task
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoRuntime`] when called outside a Tokio runtime.
    pub fn spawn_search(&self, value: &str) -> Result<JoinHandle<Settlement>, SessionError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        let resolver = self.clone();
        let value = value.to_string();
        Ok(handle.spawn(async move { resolver.search(&value).await }))
    }

    fn begin(&self, value: &str) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.clear_results();
            state.search_value = value.to_string();
            state.status = SearchStatus::Searching;
            state.generation += 1;
            generation = state.generation;
        });
        generation
    }

    async fn dispatch(
        &self,
        kind: InputKind,
        value: &str,
    ) -> Result<Option<Found>, SearchError> {
        match kind {
            InputKind::Address(address) => Ok(self
                .explorer
                .get_address_info(address)
                .await?
                .map(Found::Address)),
            InputKind::TransactionHash(hash) => Ok(self
                .chain
                .get_transaction(hash)
                .await?
                .map(Found::Transaction)),
            InputKind::Invalid => Err(SearchError::invalid_input(value)),
        }
    }

    fn settle(&self, generation: u64, result: Result<Option<Found>, SearchError>) -> Settlement {
        let mut settlement = Settlement::Stale;

        self.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            settlement = Settlement::Applied;

            state.status = match result {
                Ok(Some(Found::Address(info))) => {
                    state.address_info = Some(info);
                    SearchStatus::Done(SearchOutcome::Found)
                }
                Ok(Some(Found::Transaction(lookup))) => {
                    state.transaction = Some(lookup.transaction);
                    state.receipt = lookup.receipt;
                    SearchStatus::Done(SearchOutcome::Found)
                }
                Ok(None) => SearchStatus::Done(SearchOutcome::NotFound),
                Err(err) => {
                    state.error = Some(err.user_message());
                    SearchStatus::Done(SearchOutcome::Error(err.kind()))
                }
            };
            true
        });

        match settlement {
            Settlement::Applied => {
                let status = self.state.borrow().status;
                info!(generation, ?status, "Search settled");
            }
            Settlement::Stale => debug!(generation, "Discarding result of superseded search"),
        }
        settlement
    }
}
