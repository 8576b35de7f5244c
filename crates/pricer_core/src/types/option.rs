//! Option type and position side tags.
//!
//! Both are closed enumerations. String tags coming from configuration
//! files are parsed through `FromStr`; anything outside the known set is a
//! typed error rather than a fallback value.

use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// European option type.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
///
/// assert_eq!("put".parse::<OptionType>().unwrap(), OptionType::Put);
/// assert_eq!("C".parse::<OptionType>().unwrap(), OptionType::Call);
/// assert!("STRADDLE".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Right to buy: payoff max(S - K, 0)
    Call,
    /// Right to sell: payoff max(K - S, 0)
    Put,
}

impl OptionType {
    /// Returns true for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Intrinsic value at spot `spot` for strike `strike`.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "C" | "CALL" => Ok(OptionType::Call),
            "P" | "PUT" => Ok(OptionType::Put),
            _ => Err(PricingError::InvalidOptionType(s.to_string())),
        }
    }
}

impl TryFrom<&str> for OptionType {
    type Error = PricingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "CALL"),
            OptionType::Put => write!(f, "PUT"),
        }
    }
}

/// Direction of a position.
///
/// # Examples
/// ```
/// use pricer_core::types::Side;
///
/// assert_eq!(Side::Long.sign(), 1.0);
/// assert_eq!("short".parse::<Side>().unwrap(), Side::Short);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Held position, contributes with sign +1
    Long,
    /// Sold position, contributes with sign -1
    Short,
}

impl Side {
    /// Aggregation sign: +1 for long, -1 for short.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Side::Long => 1.0,
            Side::Short => -1.0,
        }
    }

    /// The opposite side.
    #[inline]
    pub fn opposite(&self) -> Self {
        match self {
            Side::Long => Side::Short,
            Side::Short => Side::Long,
        }
    }
}

impl FromStr for Side {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LONG" => Ok(Side::Long),
            "SHORT" => Ok(Side::Short),
            _ => Err(PricingError::InvalidSide(s.to_string())),
        }
    }
}

impl TryFrom<&str> for Side {
    type Error = PricingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "LONG"),
            Side::Short => write!(f, "SHORT"),
        }
    }
}
