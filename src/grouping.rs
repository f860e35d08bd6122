// Digit grouping and the small display helpers built on it
//
// Counts, exact yen figures, ledger deltas and percentages. Everything here
// groups digits through one `DigitGrouper` so the separator follows the
// configured locale.

use num_format::{Locale, ToFormattedString};

use crate::amount::MonetaryAmount;
use crate::error::FormatError;

/// Locale-aware thousands grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitGrouper {
    locale: Locale,
}

impl Default for DigitGrouper {
    fn default() -> Self {
        Self::new(Locale::ja)
    }
}

impl DigitGrouper {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Look up a locale by name ("ja", "en", "de", ...)
    pub fn from_name(name: &str) -> Result<Self, FormatError> {
        Locale::from_name(name)
            .map(Self::new)
            .map_err(|_| FormatError::UnknownLocale(name.to_owned()))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Group any integer: `1234567` -> `"1,234,567"`
    pub fn group<T: ToFormattedString>(&self, n: T) -> String {
        n.to_formatted_string(&self.locale)
    }

    /// Grouped count, or `"-"` when the value is missing (e.g. NULL votes)
    pub fn count_or_dash(&self, n: Option<u64>) -> String {
        match n {
            Some(n) => self.group(n),
            None => "-".to_string(),
        }
    }

    /// Full-precision yen with a currency sign: `"¥1,234,567"`
    pub fn currency_exact(&self, amount: MonetaryAmount) -> String {
        format!("¥{}", self.group(amount.yen()))
    }

    /// Ledger-style delta: `"+1,234"`, `"-28,000"`, zero is `"+0"`
    pub fn signed_yen(&self, delta: i128) -> String {
        let sign = if delta < 0 { '-' } else { '+' };
        format!("{}{}", sign, self.group(delta.unsigned_abs()))
    }
}

/// Round half away from zero at `decimals` places.
///
/// Negative zero is folded to zero so nothing prints as "-0.0". Values too
/// large to scale by `10^decimals` are rejected rather than printed as `inf`.
pub fn round_half_away(value: f64, decimals: u8) -> Result<f64, FormatError> {
    let value = ensure_finite(value)?;
    let factor = 10f64.powi(i32::from(decimals));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return Err(FormatError::NotFinite(format!(
            "{:e} at {} decimals",
            value, decimals
        )));
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        Ok(0.0)
    } else {
        Ok(rounded)
    }
}

pub(crate) fn ensure_finite(value: f64) -> Result<f64, FormatError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormatError::NotFinite(value.to_string()))
    }
}

/// `12.345` with 2 decimals -> `"12.35%"`
pub fn format_percent(value: f64, decimals: u8) -> Result<String, FormatError> {
    let rounded = round_half_away(value, decimals)?;
    Ok(format!("{:.*}%", usize::from(decimals), rounded))
}

/// `part` as a percentage of `whole` (seat share, turnout)
pub fn format_share(part: u64, whole: u64, decimals: u8) -> Result<String, FormatError> {
    if whole == 0 {
        return Err(FormatError::ZeroTotal { part });
    }
    format_percent(part as f64 / whole as f64 * 100.0, decimals)
}
