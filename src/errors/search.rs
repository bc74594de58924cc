// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types surfaced by a search.
//!
//! All search failures are handled at the [`SearchResolver`](crate::SearchResolver)
//! boundary and land in the visible state as a message; none of them stop
//! the resolver from accepting the next search.

use std::error::Error as _;

use super::{ExplorerError, RpcError};
use crate::search::FailureKind;

/// Errors that can end a search in `Done(Error)`.
///
/// # Examples
///
/// ```rust
/// use chainseek::{FailureKind, SearchError};
///
/// let err = SearchError::invalid_input("hello");
/// assert_eq!(err.to_string(), "hello is not a valid txHash");
/// assert_eq!(err.kind(), FailureKind::InvalidInput);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The input is neither an address nor something containing a
    /// transaction hash. No network call was made.
    #[error("{value} is not a valid txHash")]
    InvalidInput {
        /// The search value as entered
        value: String,
    },

    /// The chain node lookup failed.
    #[error(transparent)]
    Chain(#[from] RpcError),

    /// The explorer lookup failed.
    #[error(transparent)]
    Explorer(#[from] ExplorerError),

    /// The lookup task panicked or was cancelled before it settled.
    #[error("Search interrupted: {0}")]
    Interrupted(String),
}

impl SearchError {
    /// Create an `InvalidInput` error for the given value.
    pub fn invalid_input(value: impl Into<String>) -> Self {
        SearchError::InvalidInput {
            value: value.into(),
        }
    }

    /// Create an `Interrupted` error from whatever stopped the lookup task.
    pub fn interrupted(reason: impl std::fmt::Display) -> Self {
        SearchError::Interrupted(reason.to_string())
    }

    /// Which branch of the error taxonomy this error belongs to.
    pub fn kind(&self) -> FailureKind {
        match self {
            SearchError::InvalidInput { .. } => FailureKind::InvalidInput,
            SearchError::Chain(_) | SearchError::Explorer(_) | SearchError::Interrupted(_) => {
                FailureKind::Network
            }
        }
    }

    /// Message shown to the user: the error followed by its source chain.
    ///
    /// `InvalidInput` renders exactly as its `Display` form.
    pub fn user_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}
