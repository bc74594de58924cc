// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Classification of raw search input
//!
//! A search box accepts either an address or a transaction hash. The
//! classifier decides which lookup to issue, or that the input is invalid and
//! no lookup should be issued at all.
//!
//! Address detection follows the usual node-client rules: optional `0x`
//! prefix, 40 hex characters, and an EIP-55 checksum whenever the input mixes
//! upper and lower case.
//!
//! Hash detection is a *substring* search for `0x` followed by 64 hex
//! characters. Inputs such as `"tx:0xabc…def trailing"` therefore classify as a
//! transaction hash; the embedded hash is what gets looked up.
//!
//! # Examples
//!
//! ```
//! use chainseek::{classify, InputKind};
//!
//! let kind = classify("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
//! assert!(matches!(kind, InputKind::Address(_)));
//!
//! let hash = format!("0x{}", "ab".repeat(32));
//! assert!(matches!(classify(&hash), InputKind::TransactionHash(_)));
//!
//! assert_eq!(classify("vitalik"), InputKind::Invalid);
//! ```

use alloy_primitives::{Address, TxHash};
use std::str::FromStr;

/// Length of the hex body of a transaction hash
const TX_HASH_HEX_LEN: usize = 64;

/// Length of the hex body of an address
const ADDRESS_HEX_LEN: usize = 40;

/// What a search string refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A valid account or contract address
    Address(Address),
    /// Input containing a `0x`-prefixed 64-hex-character hash
    TransactionHash(TxHash),
    /// Neither; fails locally without a network call
    Invalid,
}

impl InputKind {
    /// Short label for logs and spans
    pub fn label(&self) -> &'static str {
        match self {
            InputKind::Address(_) => "address",
            InputKind::TransactionHash(_) => "tx_hash",
            InputKind::Invalid => "invalid",
        }
    }
}

/// Classify `raw` using the built-in address predicate
///
/// Surrounding whitespace is ignored.
pub fn classify(raw: &str) -> InputKind {
    classify_with(raw, is_valid_address)
}

/// Classify `raw`, delegating address validity to `is_address`
///
/// This lets a chain client impose its own address rules. The address
/// check always wins over the hash check.
pub fn classify_with(raw: &str, is_address: impl Fn(&str) -> bool) -> InputKind {
    let value = raw.trim();

    if is_address(value) {
        if let Ok(address) = Address::from_str(strip_hex_prefix(value)) {
            return InputKind::Address(address);
        }
    }

    match find_tx_hash(value) {
        Some(hash) => InputKind::TransactionHash(hash),
        None => InputKind::Invalid,
    }
}

/// Check whether `value` is a well-formed address
///
/// Accepts an optional `0x`/`0X` prefix followed by exactly 40 hex
/// characters. All-lowercase and all-uppercase bodies are accepted as-is;
/// mixed-case bodies must carry a valid EIP-55 checksum.
pub fn is_valid_address(value: &str) -> bool {
    let body = strip_hex_prefix(value);
    if body.len() != ADDRESS_HEX_LEN || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }

    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }

    Address::parse_checksummed(format!("0x{body}"), None).is_ok()
}

/// Find the first `0x` + 64 hex characters anywhere in `value`
///
/// The `0x` prefix is matched case-sensitively; the hex digits are not.
/// Characters before and after the match are ignored, and a longer hex run
/// still matches on its first 64 characters.
pub fn find_tx_hash(value: &str) -> Option<TxHash> {
    let bytes = value.as_bytes();
    let needed = 2 + TX_HASH_HEX_LEN;
    if bytes.len() < needed {
        return None;
    }

    (0..=bytes.len() - needed)
        .find(|&start| {
            bytes[start] == b'0'
                && bytes[start + 1] == b'x'
                && bytes[start + 2..start + needed]
                    .iter()
                    .all(u8::is_ascii_hexdigit)
        })
        .and_then(|start| TxHash::from_str(&value[start + 2..start + needed]).ok())
}

fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}
