//! Errors raised by the formatting layer
//!
//! Every variant names the offending value. Nothing in this crate turns a
//! bad input into a default display string such as "0円".

use thiserror::Error;

/// Errors that can occur while converting or formatting an amount
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A monetary amount was negative
    #[error("amount must not be negative (got {0})")]
    Negative(String),

    /// A floating-point input was NaN or infinite
    #[error("value must be finite (got {0})")]
    NotFinite(String),

    /// A floating-point amount had a fractional yen component
    #[error("amount must be a whole number of yen (got {0})")]
    NotIntegral(String),

    /// A floating-point amount is past 2^53, where f64 stops holding every
    /// integer exactly
    #[error("float amount {0} is above 2^53 and may have lost precision; pass it as an integer or string")]
    Imprecise(String),

    /// Text could not be read as an amount
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    /// Scaling an amount up to yen exceeded the supported range
    #[error("amount {value} {unit} exceeds the supported range")]
    Overflow { value: String, unit: &'static str },

    /// The threshold table is unusable (caught at construction)
    #[error("invalid unit thresholds: {0}")]
    InvalidThresholds(String),

    /// Source unit name not recognised
    #[error("unknown source unit {0:?} (expected yen, man, million, oku or cho)")]
    UnknownUnit(String),

    /// Locale name not known to the digit grouper
    #[error("unknown locale {0:?}")]
    UnknownLocale(String),

    /// A share was requested against a zero total
    #[error("cannot compute a share of a zero total (part {part})")]
    ZeroTotal { part: u64 },
}
