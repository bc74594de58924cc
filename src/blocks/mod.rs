// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block lookups for confirmation and timestamp display.
//!
//! This module provides:
//! - A write-once, session-lifetime block cache
//! - Deduplication of concurrent fetches for the same block number
//! - A non-fetching `peek` for code that must answer synchronously

pub mod cache;

// Re-export public API
pub use cache::{BlockCache, CacheStats};
