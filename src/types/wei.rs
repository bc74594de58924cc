// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Native currency amounts and unit conversion
//!
//! Values on the wire are integers in wei. [`from_wei`] turns them into exact
//! decimal strings in a chosen [`EtherUnit`], the conversion the display
//! layer needs for "Value" and "Gas price" rows.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Denominations of the native currency
///
/// # Examples
///
/// ```
/// use chainseek::EtherUnit;
///
/// assert_eq!(EtherUnit::Gwei.decimals(), 9);
/// assert_eq!("ether".parse::<EtherUnit>().unwrap(), EtherUnit::Ether);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EtherUnit {
    Wei,
    Kwei,
    Mwei,
    Gwei,
    Szabo,
    Finney,
    Ether,
}

impl EtherUnit {
    /// Number of decimal places between wei and this unit
    pub const fn decimals(&self) -> u32 {
        match self {
            Self::Wei => 0,
            Self::Kwei => 3,
            Self::Mwei => 6,
            Self::Gwei => 9,
            Self::Szabo => 12,
            Self::Finney => 15,
            Self::Ether => 18,
        }
    }

    /// Lowercase unit name, as accepted by [`FromStr`]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Wei => "wei",
            Self::Kwei => "kwei",
            Self::Mwei => "mwei",
            Self::Gwei => "gwei",
            Self::Szabo => "szabo",
            Self::Finney => "finney",
            Self::Ether => "ether",
        }
    }
}

impl fmt::Display for EtherUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EtherUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wei" => Ok(Self::Wei),
            "kwei" => Ok(Self::Kwei),
            "mwei" => Ok(Self::Mwei),
            "gwei" => Ok(Self::Gwei),
            "szabo" => Ok(Self::Szabo),
            "finney" => Ok(Self::Finney),
            "ether" | "eth" => Ok(Self::Ether),
            other => Err(format!("unknown unit: {other}")),
        }
    }
}

/// Convert a wei amount to an exact decimal string in `unit`
///
/// Trailing fractional zeros are trimmed, so whole values carry no decimal
/// point.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use chainseek::{from_wei, EtherUnit};
///
/// let value = U256::from(1_500_000_000_000_000_000u128);
/// assert_eq!(from_wei(value, EtherUnit::Ether), "1.5");
/// assert_eq!(from_wei(U256::from(21_000_000_000u64), EtherUnit::Gwei), "21");
/// assert_eq!(from_wei(U256::from(1u64), EtherUnit::Ether), "0.000000000000000001");
/// ```
pub fn from_wei(amount: U256, unit: EtherUnit) -> String {
    let decimals = unit.decimals() as usize;
    if decimals == 0 {
        return amount.to_string();
    }

    let base = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / base;
    let frac = amount % base;

    if frac.is_zero() {
        return whole.to_string();
    }

    let frac = format!("{:0>width$}", frac.to_string(), width = decimals);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Represents an amount of native currency (ETH, MATIC, etc.) in wei
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use chainseek::{EtherUnit, WeiAmount};
///
/// let balance = WeiAmount::new(U256::from(2_000_000_000_000_000u64));
/// assert_eq!(balance.to_unit(EtherUnit::Ether), "0.002");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WeiAmount(U256);

impl WeiAmount {
    /// Zero wei amount
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new wei amount
    pub const fn new(wei: U256) -> Self {
        Self(wei)
    }

    /// Get the inner U256 value (in wei)
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Exact decimal string in the given unit
    pub fn to_unit(&self, unit: EtherUnit) -> String {
        from_wei(self.0, unit)
    }
}

impl From<u64> for WeiAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for WeiAmount {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for WeiAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Display for WeiAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Ether", self.to_unit(EtherUnit::Ether))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wei_whole_ether() {
        let amount = U256::from(3_000_000_000_000_000_000u128);
        assert_eq!(from_wei(amount, EtherUnit::Ether), "3");
    }

    #[test]
    fn test_from_wei_zero() {
        assert_eq!(from_wei(U256::ZERO, EtherUnit::Ether), "0");
        assert_eq!(from_wei(U256::ZERO, EtherUnit::Wei), "0");
    }

    #[test]
    fn test_from_wei_gas_price_in_gwei() {
        // 12.5 gwei
        let amount = U256::from(12_500_000_000u64);
        assert_eq!(from_wei(amount, EtherUnit::Gwei), "12.5");
    }

    #[test]
    fn test_from_wei_keeps_leading_fraction_zeros() {
        // 0.001 ether
        let amount = U256::from(1_000_000_000_000_000u64);
        assert_eq!(from_wei(amount, EtherUnit::Ether), "0.001");
    }

    #[test]
    fn test_from_wei_huge_value_is_exact() {
        let amount = U256::MAX;
        let formatted = from_wei(amount, EtherUnit::Ether);
        let digits: String = formatted.chars().filter(|c| *c != '.').collect();
        assert_eq!(digits, U256::MAX.to_string());
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("GWEI".parse::<EtherUnit>().unwrap(), EtherUnit::Gwei);
        assert_eq!("eth".parse::<EtherUnit>().unwrap(), EtherUnit::Ether);
        assert!("lovelace".parse::<EtherUnit>().is_err());
    }

    #[test]
    fn test_wei_amount_display() {
        let amount = WeiAmount::from(1_500_000_000_000_000_000u128);
        assert_eq!(amount.to_string(), "1.5 Ether");
    }

    #[test]
    fn test_serialization() {
        let amount = WeiAmount::new(U256::from(1000));
        let json = serde_json::to_string(&amount).unwrap();
        let deserialized: WeiAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, deserialized);
    }
}
