// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Search state machine
//!
//! A search moves `Idle -> Searching -> Done(..)`. Every search is tagged with
//! a generation; only the latest generation may write the visible state, so a
//! slow superseded lookup can never overwrite a newer one.

mod resolver;

pub use resolver::{SearchResolver, Settlement};

use serde::Serialize;

use crate::types::address::AddressInfo;
use crate::types::chain::{Receipt, Transaction};

/// Why a search ended in error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Neither an address nor a transaction hash; no network call was made
    InvalidInput,
    /// A collaborator call failed
    Network,
}

/// How a finished search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    Found,
    /// The lookup succeeded but matched nothing
    NotFound,
    Error(FailureKind),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    #[default]
    Idle,
    Searching,
    Done(SearchOutcome),
}

/// Visible result of the most recent search
///
/// After a search settles, at most one of `transaction`, `address_info` and
/// `error` is set; none of them is set for `Done(NotFound)`. `receipt` only
/// accompanies `transaction`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub search_value: String,
    pub status: SearchStatus,
    pub error: Option<String>,
    pub transaction: Option<Transaction>,
    pub receipt: Option<Receipt>,
    pub address_info: Option<AddressInfo>,
    #[serde(skip)]
    generation: u64,
}

impl SearchState {
    /// Generation of the search this state belongs to
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_searching(&self) -> bool {
        self.status == SearchStatus::Searching
    }

    /// Whether the last search succeeded but matched nothing
    pub fn is_not_found(&self) -> bool {
        self.status == SearchStatus::Done(SearchOutcome::NotFound)
    }

    /// Block the found transaction was mined in, if it has been
    pub fn mined_in(&self) -> Option<u64> {
        self.receipt
            .as_ref()
            .and_then(|r| r.block_number)
            .or_else(|| self.transaction.as_ref().and_then(|t| t.block_number))
    }

    fn clear_results(&mut self) {
        self.status = SearchStatus::Idle;
        self.error = None;
        self.transaction = None;
        self.receipt = None;
        self.address_info = None;
    }
}
