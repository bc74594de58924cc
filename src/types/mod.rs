// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for the data a search resolves.
//!
//! - Chain data: transactions, receipts, blocks
//! - Explorer data: address and contract metadata
//! - Native currency amounts and unit conversion

pub mod address;
pub mod chain;
pub mod wei;

// Note: Public types are re-exported from lib.rs, not here
