// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain height tracking
//!
//! [`HeightPoller`] asks the chain client for the current block number on a
//! fixed period and hands each answer to a callback. [`CurrentHeight`] is the
//! shared cell that callback normally writes into, read by confirmation
//! counting.
//!
//! Polls are not serialized: when a fetch outlasts the period, the next tick
//! still issues its own fetch.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use alloy_primitives::BlockNumber;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn, Instrument};

use crate::client::ChainClient;
use crate::errors::SessionError;
use crate::tracing::spans;

/// Height value before the first successful poll
pub const UNKNOWN_HEIGHT: i64 = -1;

/// Latest known chain height, shared between the poller and its readers
///
/// Holds [`UNKNOWN_HEIGHT`] until the first update. Cloning is cheap; clones
/// share the same value.
#[derive(Debug, Clone)]
pub struct CurrentHeight {
    tx: Arc<watch::Sender<i64>>,
}

impl Default for CurrentHeight {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrentHeight {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(UNKNOWN_HEIGHT);
        Self { tx: Arc::new(tx) }
    }

    /// Current value, [`UNKNOWN_HEIGHT`] if never set
    pub fn get(&self) -> i64 {
        *self.tx.borrow()
    }

    /// Known height, if any
    pub fn known(&self) -> Option<BlockNumber> {
        BlockNumber::try_from(self.get()).ok()
    }

    /// Record a new height
    ///
    /// Not required to be monotonic: a lagging node can move the value back.
    pub fn set(&self, height: BlockNumber) {
        let value = i64::try_from(height).unwrap_or(i64::MAX);
        self.tx.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    /// Receiver notified whenever the height changes
    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.tx.subscribe()
    }

    /// Wait up to `limit` for the height to become known
    ///
    /// Returns at once if it already is.
    pub async fn wait_known(&self, limit: Duration) -> Option<BlockNumber> {
        let mut rx = self.tx.subscribe();
        let known = match time::timeout(limit, rx.wait_for(|h| *h != UNKNOWN_HEIGHT)).await {
            Ok(Ok(height)) => BlockNumber::try_from(*height).ok(),
            Ok(Err(_)) | Err(_) => None,
        };
        known
    }
}

/// Callback invoked with each successfully fetched height
pub type HeightCallback = Arc<dyn Fn(BlockNumber) + Send + Sync>;

/// Periodic chain-height fetcher with an explicit start/stop lifecycle
///
/// The first poll happens one period after [`start`](Self::start). Fetch
/// failures are logged and the schedule continues.
///
/// Once [`stop`](Self::stop) returns the callback is never invoked again.
/// The callback runs under the same lock `stop` takes, so it must not call
/// `stop` itself. Dropping the poller stops it.
///
/// # Examples
///
/// ```rust,ignore
/// use chainseek::{CurrentHeight, HeightPoller};
/// use std::time::Duration;
///
/// let height = CurrentHeight::new();
/// let sink = height.clone();
/// let poller = HeightPoller::start(client, Duration::from_secs(3), move |h| sink.set(h))?;
/// // ...
/// poller.stop();
/// ```
pub struct HeightPoller {
    active: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
    interval: Duration,
}

impl std::fmt::Debug for HeightPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeightPoller")
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .finish()
    }
}

impl HeightPoller {
    /// Start polling `client` every `interval`
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ZeroPollInterval`] for a zero `interval` and
    /// [`SessionError::NoRuntime`] when called outside a Tokio runtime.
    pub fn start<F>(
        client: Arc<dyn ChainClient>,
        interval: Duration,
        on_update: F,
    ) -> Result<Self, SessionError>
    where
        F: Fn(BlockNumber) + Send + Sync + 'static,
    {
        if interval.is_zero() {
            return Err(SessionError::ZeroPollInterval);
        }
        let handle = tokio::runtime::Handle::try_current().map_err(|_| SessionError::NoRuntime)?;

        let active = Arc::new(Mutex::new(true));
        let on_update: HeightCallback = Arc::new(on_update);
        let task = handle.spawn(run(client, interval, Arc::clone(&active), on_update));

        debug!(interval_ms = interval.as_millis() as u64, "Height poller started");
        Ok(Self {
            active,
            task,
            interval,
        })
    }

    /// Cancel the schedule and any poll still in flight
    ///
    /// Idempotent.
    pub fn stop(&self) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if *active {
            *active = false;
            debug!("Height poller stopped");
        }
        drop(active);
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for HeightPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run(
    client: Arc<dyn ChainClient>,
    period: Duration,
    active: Arc<Mutex<bool>>,
    on_update: HeightCallback,
) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // dropped with this task on abort, which aborts outstanding polls too
    let mut polls = JoinSet::new();
    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tick += 1;
                polls.spawn(
                    poll_once(
                        Arc::clone(&client),
                        Arc::clone(&active),
                        Arc::clone(&on_update),
                    )
                    .instrument(spans::poll_height(tick)),
                );
            }
            Some(_) = polls.join_next(), if !polls.is_empty() => {}
        }
    }
}

async fn poll_once(
    client: Arc<dyn ChainClient>,
    active: Arc<Mutex<bool>>,
    on_update: HeightCallback,
) {
    match client.get_block_number().await {
        Ok(height) => {
            let active = active.lock().unwrap_or_else(PoisonError::into_inner);
            if *active {
                on_update(height);
            }
        }
        Err(e) => warn!(error = %e, "Failed to fetch chain height"),
    }
}
