// Compact labels for chart axes and tooltips
//
// The caller has already chosen the unit (and usually pre-divided the series
// by it); this formatter only rounds and appends the suffix it was given.

use crate::error::FormatError;
use crate::grouping::{ensure_finite, round_half_away};

/// Fraction digits for a compact label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompactPrecision {
    /// `"12億"`
    Whole,
    /// `"12.3億"`
    #[default]
    OneDecimal,
}

impl CompactPrecision {
    pub const fn decimals(self) -> u8 {
        match self {
            Self::Whole => 0,
            Self::OneDecimal => 1,
        }
    }
}

/// Formatter for a series already expressed in the caller's unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactFormatter {
    suffix: String,
    precision: CompactPrecision,
}

impl CompactFormatter {
    pub fn new(suffix: impl Into<String>, precision: CompactPrecision) -> Self {
        Self {
            suffix: suffix.into(),
            precision,
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn precision(&self) -> CompactPrecision {
        self.precision
    }

    /// Round and label one value.
    ///
    /// ```
    /// use yen_units::{CompactFormatter, CompactPrecision};
    ///
    /// let axis = CompactFormatter::new("億", CompactPrecision::Whole);
    /// assert_eq!(axis.format(1234.5).unwrap(), "1235億");
    /// ```
    pub fn format(&self, value: f64) -> Result<String, FormatError> {
        let decimals = self.precision.decimals();
        let rounded = round_half_away(value, decimals)?;
        Ok(format!("{:.*}{}", usize::from(decimals), rounded, self.suffix))
    }

    /// Divide by `divisor` first, e.g. raw yen into 億 for a tooltip.
    pub fn format_divided(&self, value: f64, divisor: f64) -> Result<String, FormatError> {
        let value = ensure_finite(value)?;
        let divisor = ensure_finite(divisor)?;
        if divisor == 0.0 {
            return Err(FormatError::NotFinite(format!("{} / 0", value)));
        }
        self.format(value / divisor)
    }
}
