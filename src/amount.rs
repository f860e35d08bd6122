//! Monetary amounts in yen
//!
//! Amounts arrive from database rows (big-integer columns, often surfaced as
//! strings by the driver) or from in-memory aggregations. All conversion
//! happens at this boundary so the formatters only ever see a validated,
//! non-negative integer.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// A non-negative quantity of yen
///
/// Backed by `u128`, which covers every amount up to roughly 3.4 × 10³⁸ yen
/// exactly. Values above 2⁵³ keep exact equality and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MonetaryAmount(u128);

impl MonetaryAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(yen: u128) -> Self {
        Self(yen)
    }

    pub const fn yen(self) -> u128 {
        self.0
    }

    /// Convert a value held in a larger unit (e.g. a 百万円 budget column)
    /// into yen.
    ///
    /// ```
    /// use yen_units::{MonetaryAmount, SourceUnit};
    ///
    /// let amount = MonetaryAmount::from_scaled(2_500, SourceUnit::Million).unwrap();
    /// assert_eq!(amount.yen(), 2_500_000_000);
    /// ```
    pub fn from_scaled(value: u128, unit: SourceUnit) -> Result<Self, FormatError> {
        value
            .checked_mul(unit.multiplier())
            .map(Self)
            .ok_or_else(|| FormatError::Overflow {
                value: value.to_string(),
                unit: unit.suffix(),
            })
    }

    /// Parse text in a source unit, e.g. a CSV cell that holds 億円.
    pub fn parse_scaled(raw: &str, unit: SourceUnit) -> Result<Self, FormatError> {
        let base: MonetaryAmount = raw.parse()?;
        Self::from_scaled(base.0, unit)
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for MonetaryAmount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<u64> for MonetaryAmount {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl From<u32> for MonetaryAmount {
    fn from(value: u32) -> Self {
        Self(value.into())
    }
}

impl TryFrom<i64> for MonetaryAmount {
    type Error = FormatError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u128::try_from(value)
            .map(Self)
            .map_err(|_| FormatError::Negative(value.to_string()))
    }
}

impl TryFrom<i128> for MonetaryAmount {
    type Error = FormatError;

    fn try_from(value: i128) -> Result<Self, Self::Error> {
        u128::try_from(value)
            .map(Self)
            .map_err(|_| FormatError::Negative(value.to_string()))
    }
}

impl FromStr for MonetaryAmount {
    type Err = FormatError;

    /// Accepts plain digits with optional `,` `_` or space separators.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ',' | '_' | ' '))
            .collect();

        let (negative, digits) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormatError::InvalidAmount(raw.to_owned()));
        }

        // "-0" is still zero
        if negative && digits.bytes().any(|b| b != b'0') {
            return Err(FormatError::Negative(raw.trim().to_owned()));
        }

        // Only digits remain, so the sole failure mode is exceeding u128
        digits.parse().map(Self).map_err(|_| FormatError::Overflow {
            value: raw.trim().to_owned(),
            unit: SourceUnit::Yen.suffix(),
        })
    }
}

// Encoded as a string so JSON consumers never round through a float.
impl Serialize for MonetaryAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MonetaryAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = MonetaryAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative yen amount as a string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(MonetaryAmount::from(v))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
                Ok(MonetaryAmount::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                MonetaryAmount::try_from(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Unit a raw input value is expressed in before conversion to yen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceUnit {
    #[default]
    Yen,
    /// 万 (10⁴)
    Man,
    /// 百万 (10⁶), used by the culture budget tables
    Million,
    /// 億 (10⁸), used by the social-security budget tables
    Oku,
    /// 兆 (10¹²)
    Cho,
}

impl SourceUnit {
    pub const fn multiplier(self) -> u128 {
        match self {
            Self::Yen => 1,
            Self::Man => 10_000,
            Self::Million => 1_000_000,
            Self::Oku => 100_000_000,
            Self::Cho => 1_000_000_000_000,
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Yen => "円",
            Self::Man => "万円",
            Self::Million => "百万円",
            Self::Oku => "億円",
            Self::Cho => "兆円",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yen => "yen",
            Self::Man => "man",
            Self::Million => "million",
            Self::Oku => "oku",
            Self::Cho => "cho",
        }
    }
}

impl FromStr for SourceUnit {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yen" | "円" => Ok(Self::Yen),
            "man" | "万" => Ok(Self::Man),
            "million" | "百万" => Ok(Self::Million),
            "oku" | "億" => Ok(Self::Oku),
            "cho" | "兆" => Ok(Self::Cho),
            _ => Err(FormatError::UnknownUnit(s.to_owned())),
        }
    }
}

impl fmt::Display for SourceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
