// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Explorer session: one resolver, one block cache, one height poller
//!
//! The session owns all long-lived state. Searches reset only the search
//! state; the block cache and the current height live as long as the
//! session. The embedding application pairs [`ExplorerSession::attach`] with
//! [`ExplorerSession::detach`] to bound the poller to its own lifetime.
//!
//! # Examples
//!
//! ```rust,ignore
//! use chainseek::{ChainseekConfig, ExplorerSession};
//!
//! let session = ExplorerSession::from_config(&ChainseekConfig::from_env()?)?;
//! session.attach()?;
//! session.search("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").await;
//! println!("{:?}", session.state());
//! session.detach();
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use alloy_primitives::BlockNumber;
use tracing::info;

use crate::blocks::BlockCache;
use crate::client::{AlloyChainClient, ChainClient, EthplorerClient, ExplorerClient};
use crate::config::constants::DEFAULT_POLL_INTERVAL;
use crate::config::ChainseekConfig;
use crate::confirmations::confirmations;
use crate::errors::{ChainseekError, SessionError};
use crate::height::{CurrentHeight, HeightPoller};
use crate::provider::create_http_provider;
use crate::search::{SearchResolver, SearchState, Settlement};
use crate::types::chain::Block;

pub struct ExplorerSession {
    chain: Arc<dyn ChainClient>,
    resolver: SearchResolver,
    blocks: BlockCache,
    height: CurrentHeight,
    poll_interval: Duration,
    poller: Mutex<Option<HeightPoller>>,
}

impl std::fmt::Debug for ExplorerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerSession")
            .field("height", &self.height.get())
            .field("poll_interval", &self.poll_interval)
            .field("attached", &self.is_attached())
            .field("blocks", &self.blocks)
            .finish_non_exhaustive()
    }
}

impl ExplorerSession {
    /// Create a detached session over the given collaborators
    pub fn new(chain: Arc<dyn ChainClient>, explorer: Arc<dyn ExplorerClient>) -> Self {
        Self {
            resolver: SearchResolver::new(Arc::clone(&chain), explorer),
            blocks: BlockCache::new(Arc::clone(&chain)),
            height: CurrentHeight::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            poller: Mutex::new(None),
            chain,
        }
    }

    /// Build an HTTP chain client and an Ethplorer client from `config`
    pub fn from_config(config: &ChainseekConfig) -> Result<Self, ChainseekError> {
        let provider = create_http_provider(config.rpc.clone())?;
        let chain: Arc<dyn ChainClient> = Arc::new(AlloyChainClient::new(provider));
        let explorer: Arc<dyn ExplorerClient> =
            Arc::new(EthplorerClient::from_config(&config.explorer)?);

        info!(
            chain = %config.chain,
            rpc = %config.rpc.url,
            explorer = %config.explorer.base_url,
            "Session configured"
        );
        Ok(Self::new(chain, explorer).with_poll_interval(config.poll_interval))
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Start the height poller
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyAttached`] if the poller is already running,
    /// [`SessionError::ZeroPollInterval`] if the interval is zero,
    /// [`SessionError::NoRuntime`] outside a Tokio runtime.
    pub fn attach(&self) -> Result<(), SessionError> {
        let mut poller = self.lock_poller();
        if poller.is_some() {
            return Err(SessionError::AlreadyAttached);
        }

        let height = self.height.clone();
        *poller = Some(HeightPoller::start(
            Arc::clone(&self.chain),
            self.poll_interval,
            move |h| height.set(h),
        )?);
        Ok(())
    }

    /// Stop the height poller
    ///
    /// Idempotent. Heights fetched after this returns are discarded.
    pub fn detach(&self) {
        if let Some(poller) = self.lock_poller().take() {
            poller.stop();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.lock_poller().is_some()
    }

    /// Run a search, see [`SearchResolver::search`]
    pub async fn search(&self, value: &str) -> Settlement {
        self.resolver.search(value).await
    }

    pub fn state(&self) -> SearchState {
        self.resolver.state()
    }

    pub fn resolver(&self) -> &SearchResolver {
        &self.resolver
    }

    pub fn blocks(&self) -> &BlockCache {
        &self.blocks
    }

    pub fn current_height(&self) -> &CurrentHeight {
        &self.height
    }

    /// Cached block, or `None` after making sure a fetch is underway
    ///
    /// Safe to call on every redraw: a block is fetched at most once.
    pub fn block_for(&self, number: BlockNumber) -> Option<Block> {
        let block = self.blocks.peek(number);
        if block.is_none() {
            self.blocks.request(number);
        }
        block
    }

    /// Confirmations for a block at the current height
    pub fn confirmations_for(&self, number: BlockNumber) -> Option<i64> {
        confirmations(number, self.height.get())
    }

    fn lock_poller(&self) -> MutexGuard<'_, Option<HeightPoller>> {
        self.poller.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ExplorerSession {
    fn drop(&mut self) {
        self.detach();
    }
}
