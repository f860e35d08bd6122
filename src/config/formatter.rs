//! Formatter settings: locale, currency suffix, unit table

use serde::Deserialize;

use crate::error::FormatError;
use crate::formatter::{FormatterConfig, DEFAULT_DECIMALS, DEFAULT_WHOLE_AT};
use crate::grouping::DigitGrouper;
use crate::units::{Precision, UnitThreshold};

/// A custom unit row from `[[formatter.units]]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnitSetting {
    pub magnitude: u64,
    pub suffix: String,
    /// Defaults to the section's `decimals`
    pub decimals: Option<u8>,
    /// Switch to whole numbers at this value; omit for fixed precision
    pub whole_at: Option<u64>,
    /// Drop a zero fraction (`150万` instead of `150.0万`); ignored when
    /// `whole_at` is set
    pub trim_zeros: Option<bool>,
}

impl UnitSetting {
    fn to_threshold(&self, default_decimals: u8) -> UnitThreshold {
        let decimals = self.decimals.unwrap_or(default_decimals);
        let precision = match self.whole_at {
            Some(whole_at) => Precision::WholeAbove {
                decimals,
                whole_at: whole_at.into(),
            },
            None if self.trim_zeros == Some(true) => Precision::TrimZeros { decimals },
            None => Precision::Fixed { decimals },
        };
        UnitThreshold::new(self.magnitude.into(), self.suffix.clone(), precision)
    }
}

/// Formatter settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterSettings {
    /// Digit grouping locale ("ja", "en", ...)
    pub locale: String,
    /// Appended after the unit (`円`)
    pub currency_suffix: String,
    /// Group digits of scaled numerals (`2,500億円`)
    pub group_scaled: bool,
    /// Fraction digits for scaled numerals
    pub decimals: u8,
    /// 億 switches to whole numbers at this value
    pub whole_at: u64,
    /// Custom unit table; empty means the built-in 兆/億/万
    pub units: Vec<UnitSetting>,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            locale: "ja".to_string(),
            currency_suffix: "円".to_string(),
            group_scaled: false,
            decimals: DEFAULT_DECIMALS,
            whole_at: DEFAULT_WHOLE_AT as u64,
            units: Vec::new(),
        }
    }
}

/// Formatter settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileFormatter {
    pub locale: Option<String>,
    pub currency_suffix: Option<String>,
    pub group_scaled: Option<bool>,
    pub decimals: Option<u8>,
    pub whole_at: Option<u64>,
    pub units: Option<Vec<UnitSetting>>,
}

impl FormatterSettings {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileFormatter>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            locale: file.locale.unwrap_or(defaults.locale),
            currency_suffix: file.currency_suffix.unwrap_or(defaults.currency_suffix),
            group_scaled: file.group_scaled.unwrap_or(defaults.group_scaled),
            decimals: file.decimals.unwrap_or(defaults.decimals),
            whole_at: file.whole_at.unwrap_or(defaults.whole_at),
            units: file.units.unwrap_or(defaults.units),
        }
    }

    /// Resolve into a `FormatterConfig`. The unit table itself is checked
    /// by `UnitFormatter::new`.
    pub fn to_formatter_config(&self) -> Result<FormatterConfig, FormatError> {
        let grouper = DigitGrouper::from_name(&self.locale)?;

        let mut config = FormatterConfig::japanese(self.decimals, self.whole_at.into());
        if !self.units.is_empty() {
            config.thresholds = self
                .units
                .iter()
                .map(|u| u.to_threshold(self.decimals))
                .collect();
        }
        config.currency_suffix = self.currency_suffix.clone();
        config.locale = grouper.locale();
        config.group_scaled = self.group_scaled;

        Ok(config)
    }
}
