//! Japanese-unit currency formatting (兆 / 億 / 万)
//!
//! `UnitFormatter` renders a `MonetaryAmount` with the largest unit the
//! amount reaches, e.g. `150万円`, `12.0億円`, `2500億円`, `3.5兆円`, and falls
//! back to grouped digits (`9,999円`) below the smallest unit.
//!
//! The threshold table and locale are passed in through `FormatterConfig`
//! and validated once in `UnitFormatter::new`. Formatting a validated
//! `MonetaryAmount` cannot fail.

use num_format::Locale;

use crate::amount::{MonetaryAmount, SourceUnit};
use crate::error::FormatError;
use crate::grouping::DigitGrouper;
use crate::units::{Scaled, UnitTable, UnitThreshold, CHO, MAN, OKU};

/// Two-tier cut-over used by the finance pages: whole numbers from 100 up
pub const DEFAULT_WHOLE_AT: u128 = 100;

/// Fraction digits below the cut-over
pub const DEFAULT_DECIMALS: u8 = 1;

/// Largest float amount accepted by `format_f64` (2^53)
pub const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// Everything a `UnitFormatter` needs, supplied explicitly by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Unit thresholds, largest first
    pub thresholds: Vec<UnitThreshold>,
    /// Appended to every currency string
    pub currency_suffix: String,
    /// Locale for digit grouping
    pub locale: Locale,
    /// Group the whole part of scaled numerals too (`2,500億円`)
    pub group_scaled: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self::japanese(DEFAULT_DECIMALS, DEFAULT_WHOLE_AT)
    }
}

impl FormatterConfig {
    /// 兆 always carries `decimals`, 億 switches to whole numbers at
    /// `whole_at`, and 万 drops a zero fraction.
    pub fn japanese(decimals: u8, whole_at: u128) -> Self {
        use crate::units::Precision::{Fixed, TrimZeros, WholeAbove};

        Self {
            thresholds: vec![
                UnitThreshold::new(CHO, "兆", Fixed { decimals }),
                UnitThreshold::new(OKU, "億", WholeAbove { decimals, whole_at }),
                UnitThreshold::new(MAN, "万", TrimZeros { decimals }),
            ],
            currency_suffix: "円".to_string(),
            locale: Locale::ja,
            group_scaled: false,
        }
    }
}

/// Formats yen amounts with Japanese magnitude units
#[derive(Debug, Clone)]
pub struct UnitFormatter {
    table: UnitTable,
    grouper: DigitGrouper,
    currency_suffix: String,
    group_scaled: bool,
}

impl UnitFormatter {
    /// Build a formatter, rejecting a malformed threshold table up front.
    pub fn new(config: FormatterConfig) -> Result<Self, FormatError> {
        let table = UnitTable::new(config.thresholds)?;

        tracing::debug!(
            units = table.thresholds().len(),
            locale = config.locale.name(),
            group_scaled = config.group_scaled,
            "unit formatter ready"
        );

        Ok(Self {
            table,
            grouper: DigitGrouper::new(config.locale),
            currency_suffix: config.currency_suffix,
            group_scaled: config.group_scaled,
        })
    }

    /// The standard 兆/億/万 formatter with `円`
    pub fn japanese() -> Self {
        Self {
            table: UnitTable::standard(),
            grouper: DigitGrouper::default(),
            currency_suffix: "円".to_string(),
            group_scaled: false,
        }
    }

    pub fn table(&self) -> &UnitTable {
        &self.table
    }

    pub fn grouper(&self) -> &DigitGrouper {
        &self.grouper
    }

    /// Render an amount.
    ///
    /// ```
    /// use yen_units::{MonetaryAmount, UnitFormatter};
    ///
    /// let f = UnitFormatter::japanese();
    /// assert_eq!(f.format(MonetaryAmount::new(1_500_000)), "150万円");
    /// assert_eq!(f.format(MonetaryAmount::new(1_200_000_000)), "12.0億円");
    /// assert_eq!(f.format(MonetaryAmount::new(9_999)), "9,999円");
    /// ```
    pub fn format(&self, amount: MonetaryAmount) -> String {
        let yen = amount.yen();
        match self.table.select(yen) {
            Some(selection) => format!(
                "{}{}{}",
                self.numeral(&selection.value),
                selection.threshold.suffix,
                self.currency_suffix
            ),
            None => format!("{}{}", self.grouper.group(yen), self.currency_suffix),
        }
    }

    /// Format a signed database value; negative input is an error.
    pub fn format_i64(&self, value: i64) -> Result<String, FormatError> {
        Ok(self.format(MonetaryAmount::try_from(value)?))
    }

    /// Format a decimal string as returned by big-integer column drivers.
    pub fn format_str(&self, raw: &str) -> Result<String, FormatError> {
        Ok(self.format(raw.parse()?))
    }

    /// Format an amount held as a float (e.g. a JSON number).
    ///
    /// NaN, infinities, negatives and fractional yen are rejected, and so is
    /// anything above 2^53 (about 9,007兆円): past that point a float may
    /// already be a different amount than the one the source held. Convert
    /// such values with `format_str` or `MonetaryAmount` instead.
    pub fn format_f64(&self, value: f64) -> Result<String, FormatError> {
        if !value.is_finite() {
            return Err(FormatError::NotFinite(value.to_string()));
        }
        if value < 0.0 {
            return Err(FormatError::Negative(value.to_string()));
        }
        if value.fract() != 0.0 {
            return Err(FormatError::NotIntegral(value.to_string()));
        }
        if value > MAX_EXACT_F64 {
            return Err(FormatError::Imprecise(value.to_string()));
        }
        Ok(self.format(MonetaryAmount::new(value as u128)))
    }

    /// Format a value held in a larger source unit (百万円, 億円 columns).
    pub fn format_scaled(&self, value: u128, unit: SourceUnit) -> Result<String, FormatError> {
        Ok(self.format(MonetaryAmount::from_scaled(value, unit)?))
    }

    /// Full-precision form with a currency sign: `¥1,234,567`
    pub fn format_exact(&self, amount: MonetaryAmount) -> String {
        self.grouper.currency_exact(amount)
    }

    fn numeral(&self, value: &Scaled) -> String {
        let whole = if self.group_scaled {
            self.grouper.group(value.whole)
        } else {
            value.whole.to_string()
        };

        if value.decimals == 0 {
            whole
        } else {
            format!(
                "{}.{:0>width$}",
                whole,
                value.fraction,
                width = usize::from(value.decimals)
            )
        }
    }
}

impl Default for UnitFormatter {
    fn default() -> Self {
        Self::japanese()
    }
}
