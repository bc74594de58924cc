// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for input classification and confirmation counting
//!
//! Hash detection is a substring match: a `0x`-prefixed 64-hex run anywhere
//! in the input makes it a transaction hash, whatever surrounds it.

use std::str::FromStr;

use alloy_primitives::{Address, TxHash};
use chainseek::{classify, confirmations, InputKind, UNKNOWN_HEIGHT};
use proptest::prelude::*;

proptest! {
    /// Lowercase addresses, with or without prefix, are always addresses
    #[test]
    fn prop_lowercase_address_classifies_as_address(
        body in "[0-9a-f]{40}",
        prefixed in any::<bool>(),
    ) {
        let input = if prefixed { format!("0x{body}") } else { body.clone() };
        let expected = Address::from_str(&body).unwrap();
        prop_assert_eq!(classify(&input), InputKind::Address(expected));
    }

    /// EIP-55 checksummed addresses are always addresses
    #[test]
    fn prop_checksummed_address_classifies_as_address(bytes in any::<[u8; 20]>()) {
        let address = Address::from(bytes);
        let input = address.to_checksum(None);
        prop_assert_eq!(classify(&input), InputKind::Address(address));
    }

    /// A hash surrounded by non-hex text is still found
    #[test]
    fn prop_embedded_hash_classifies_as_hash(
        body in "[0-9a-fA-F]{64}",
        before in "[g-wyz :;,]{0,12}",
        after in "[g-z :;,]{0,12}",
    ) {
        let input = format!("{before}0x{body}{after}");
        let expected = TxHash::from_str(&body).unwrap();
        prop_assert_eq!(classify(&input), InputKind::TransactionHash(expected));
    }

    /// Text without any digits can be neither an address nor a hash
    #[test]
    fn prop_text_without_digits_is_invalid(input in "[g-zG-Z _.-]{0,80}") {
        prop_assert_eq!(classify(&input), InputKind::Invalid);
    }

    /// Hex runs of the wrong length are invalid
    #[test]
    fn prop_wrong_length_hex_is_invalid(
        body in "[0-9a-f]{0,63}".prop_filter("address length", |b| b.len() != 40),
    ) {
        prop_assert_eq!(classify(&format!("0x{body}")), InputKind::Invalid);
    }

    /// Known heights give `height - block`, including negative lag
    #[test]
    fn prop_confirmations_are_height_minus_block(
        block in 0u64..=i64::MAX as u64,
        height in 0i64..=i64::MAX,
    ) {
        let expected = height as i128 - block as i128;
        prop_assert_eq!(confirmations(block, height), Some(expected as i64));
    }

    /// The unknown sentinel always yields no count
    #[test]
    fn prop_unknown_height_has_no_confirmations(block in any::<u64>()) {
        prop_assert_eq!(confirmations(block, UNKNOWN_HEIGHT), None);
    }
}
