// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Confirmation counting

use alloy_primitives::BlockNumber;

use crate::height::UNKNOWN_HEIGHT;

/// Blocks mined on top of `block_number`, given the current chain height
///
/// Returns `None` while the height is still [`UNKNOWN_HEIGHT`]. A height
/// below `block_number` (a lagging node) yields a negative count, passed
/// through as-is.
///
/// # Examples
///
/// ```
/// use chainseek::{confirmations, UNKNOWN_HEIGHT};
///
/// assert_eq!(confirmations(100, UNKNOWN_HEIGHT), None);
/// assert_eq!(confirmations(100, 105), Some(5));
/// assert_eq!(confirmations(100, 99), Some(-1));
/// ```
pub fn confirmations(block_number: BlockNumber, current_height: i64) -> Option<i64> {
    if current_height == UNKNOWN_HEIGHT {
        return None;
    }
    let block = i128::from(block_number);
    let diff = i128::from(current_height) - block;
    Some(i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX }))
}
