//! Magnitude thresholds (兆/億/万) and exact scaled rounding
//!
//! A `UnitTable` is validated once when it is built. After that, picking a
//! unit and rounding the quotient cannot fail for any `u128` amount.

use crate::error::FormatError;

/// 万 (10⁴)
pub const MAN: u128 = 10_000;
/// 億 (10⁸)
pub const OKU: u128 = 100_000_000;
/// 兆 (10¹²)
pub const CHO: u128 = 1_000_000_000_000;

/// Largest number of fraction digits a threshold may request
pub const MAX_DECIMALS: u8 = 6;

/// How many fraction digits a scaled numeral carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Always `decimals` fraction digits (`3.5兆`)
    Fixed { decimals: u8 },
    /// `decimals` fraction digits below `whole_at`, a whole number at or
    /// above it (`12.0億` but `2500億`)
    WholeAbove { decimals: u8, whole_at: u128 },
    /// Rounded to `decimals` fraction digits, printed without a fraction
    /// when the rounded fraction is zero (`123.5万` but `150万`)
    TrimZeros { decimals: u8 },
}

impl Precision {
    pub const fn decimals(self) -> u8 {
        match self {
            Self::Fixed { decimals }
            | Self::WholeAbove { decimals, .. }
            | Self::TrimZeros { decimals } => decimals,
        }
    }
}

/// One row of the threshold table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitThreshold {
    pub magnitude: u128,
    pub suffix: String,
    pub precision: Precision,
}

impl UnitThreshold {
    pub fn new(magnitude: u128, suffix: impl Into<String>, precision: Precision) -> Self {
        Self {
            magnitude,
            suffix: suffix.into(),
            precision,
        }
    }
}

/// A quotient rounded to a fixed number of fraction digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scaled {
    pub whole: u128,
    pub fraction: u128,
    pub decimals: u8,
}

impl Scaled {
    /// `amount / divisor` rounded half away from zero to `decimals` digits.
    ///
    /// Caller guarantees `divisor > 0` and `divisor * 10^decimals` fits in
    /// `u128`; `UnitTable::new` checks both.
    pub fn divide(amount: u128, divisor: u128, decimals: u8) -> Self {
        let scale = 10u128.pow(u32::from(decimals));
        let mut whole = amount / divisor;
        let remainder = amount % divisor;

        // remainder < divisor, so remainder * scale < divisor * scale
        let scaled = remainder * scale;
        let mut fraction = scaled / divisor;
        let leftover = scaled % divisor;

        // leftover >= divisor / 2, written without overflow
        if leftover >= divisor - leftover {
            fraction += 1;
            if fraction == scale {
                fraction = 0;
                whole += 1;
            }
        }

        Self {
            whole,
            fraction,
            decimals,
        }
    }
}

/// A selected unit and the rounded numeral to print with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub threshold: &'a UnitThreshold,
    pub value: Scaled,
}

/// Ordered, validated threshold table (largest magnitude first)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTable {
    thresholds: Vec<UnitThreshold>,
}

impl UnitTable {
    /// Validate and build a table.
    ///
    /// Thresholds must be non-empty and strictly descending, which also
    /// rules out duplicate magnitudes.
    pub fn new(thresholds: Vec<UnitThreshold>) -> Result<Self, FormatError> {
        if thresholds.is_empty() {
            return Err(FormatError::InvalidThresholds(
                "at least one threshold is required".to_string(),
            ));
        }

        for t in &thresholds {
            if t.magnitude == 0 {
                return Err(FormatError::InvalidThresholds(format!(
                    "threshold {:?} has a zero magnitude",
                    t.suffix
                )));
            }
            if t.suffix.is_empty() {
                return Err(FormatError::InvalidThresholds(format!(
                    "threshold {} has an empty suffix",
                    t.magnitude
                )));
            }
            let decimals = t.precision.decimals();
            if decimals > MAX_DECIMALS {
                return Err(FormatError::InvalidThresholds(format!(
                    "threshold {:?} asks for {} decimals (max {})",
                    t.suffix, decimals, MAX_DECIMALS
                )));
            }
            let scale = 10u128.pow(u32::from(decimals));
            if t.magnitude.checked_mul(scale).is_none() {
                return Err(FormatError::InvalidThresholds(format!(
                    "threshold {:?} is too large for {} decimals",
                    t.suffix, decimals
                )));
            }
        }

        for pair in thresholds.windows(2) {
            if pair[0].magnitude <= pair[1].magnitude {
                return Err(FormatError::InvalidThresholds(format!(
                    "thresholds must be strictly descending: {} ({}) then {} ({})",
                    pair[0].magnitude, pair[0].suffix, pair[1].magnitude, pair[1].suffix
                )));
            }
        }

        Ok(Self { thresholds })
    }

    /// 兆 / 億 / 万 with the given two-tier cut-over for 億
    pub fn japanese(decimals: u8, whole_at: u128) -> Result<Self, FormatError> {
        Self::new(vec![
            UnitThreshold::new(CHO, "兆", Precision::Fixed { decimals }),
            UnitThreshold::new(OKU, "億", Precision::WholeAbove { decimals, whole_at }),
            UnitThreshold::new(MAN, "万", Precision::TrimZeros { decimals }),
        ])
    }

    /// The built-in table: one decimal, whole numbers from 100億, and 万
    /// without a trailing `.0`
    pub fn standard() -> Self {
        Self {
            thresholds: vec![
                UnitThreshold::new(CHO, "兆", Precision::Fixed { decimals: 1 }),
                UnitThreshold::new(
                    OKU,
                    "億",
                    Precision::WholeAbove {
                        decimals: 1,
                        whole_at: 100,
                    },
                ),
                UnitThreshold::new(MAN, "万", Precision::TrimZeros { decimals: 1 }),
            ],
        }
    }

    pub fn thresholds(&self) -> &[UnitThreshold] {
        &self.thresholds
    }

    /// Smallest magnitude; amounts below it are printed unscaled
    pub fn floor(&self) -> u128 {
        self.thresholds
            .last()
            .map(|t| t.magnitude)
            .unwrap_or(u128::MAX)
    }

    /// Pick the largest threshold the amount reaches and round the quotient.
    pub fn select(&self, amount: u128) -> Option<Selection<'_>> {
        let threshold = self.thresholds.iter().find(|t| amount >= t.magnitude)?;

        let value = match threshold.precision {
            Precision::Fixed { decimals } => {
                Scaled::divide(amount, threshold.magnitude, decimals)
            }
            Precision::WholeAbove { decimals, whole_at } => {
                let fine = Scaled::divide(amount, threshold.magnitude, decimals);
                // fine >= whole_at exactly when its whole part is
                if fine.whole >= whole_at {
                    Scaled::divide(amount, threshold.magnitude, 0)
                } else {
                    fine
                }
            }
            Precision::TrimZeros { decimals } => {
                let fine = Scaled::divide(amount, threshold.magnitude, decimals);
                if fine.fraction == 0 {
                    Scaled { decimals: 0, ..fine }
                } else {
                    fine
                }
            }
        };

        Some(Selection { threshold, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> UnitTable {
        UnitTable::japanese(1, 100).unwrap()
    }

    #[test]
    fn test_divide_rounds_half_away_from_zero() {
        // 1.25 -> 1.3
        assert_eq!(
            Scaled::divide(125, 100, 1),
            Scaled { whole: 1, fraction: 3, decimals: 1 }
        );
        // 1.24 -> 1.2
        assert_eq!(
            Scaled::divide(124, 100, 1),
            Scaled { whole: 1, fraction: 2, decimals: 1 }
        );
        // 0.5 -> 1
        assert_eq!(
            Scaled::divide(5, 10, 0),
            Scaled { whole: 1, fraction: 0, decimals: 0 }
        );
    }

    #[test]
    fn test_divide_carries_into_whole() {
        // 9.96 -> 10.0
        assert_eq!(
            Scaled::divide(996, 100, 1),
            Scaled { whole: 10, fraction: 0, decimals: 1 }
        );
    }

    #[test]
    fn test_divide_odd_divisor() {
        // 2/3 = 0.666.. -> 0.67
        assert_eq!(
            Scaled::divide(2, 3, 2),
            Scaled { whole: 0, fraction: 67, decimals: 2 }
        );
    }

    #[test]
    fn test_divide_huge_amount() {
        let s = Scaled::divide(u128::MAX, CHO, 1);
        assert_eq!(s.whole, u128::MAX / CHO);
    }

    #[test]
    fn test_select_picks_largest_reached() {
        let t = table();
        assert_eq!(t.select(9_999), None);
        assert_eq!(t.select(MAN).unwrap().threshold.suffix, "万");
        assert_eq!(t.select(OKU - 1).unwrap().threshold.suffix, "万");
        assert_eq!(t.select(OKU).unwrap().threshold.suffix, "億");
        assert_eq!(t.select(CHO - 1).unwrap().threshold.suffix, "億");
        assert_eq!(t.select(CHO).unwrap().threshold.suffix, "兆");
        assert_eq!(t.select(u128::MAX).unwrap().threshold.suffix, "兆");
    }

    #[test]
    fn test_select_two_tier_cutover() {
        let t = table();
        // 99.9億 keeps a decimal
        let below = t.select(9_990_000_000).unwrap().value;
        assert_eq!(below, Scaled { whole: 99, fraction: 9, decimals: 1 });
        // 99.96億 rounds to 100.0 and switches to whole numbers
        let rounded_up = t.select(9_996_000_000).unwrap().value;
        assert_eq!(rounded_up, Scaled { whole: 100, fraction: 0, decimals: 0 });
    }

    #[test]
    fn test_man_tier_keeps_one_decimal_unless_zero() {
        let t = table();
        // 123.4567万 -> 123.5
        let v = t.select(1_234_567).unwrap().value;
        assert_eq!(v, Scaled { whole: 123, fraction: 5, decimals: 1 });
        // 150.0万 drops the fraction
        let v = t.select(1_500_000).unwrap().value;
        assert_eq!(v, Scaled { whole: 150, fraction: 0, decimals: 0 });
        // 99.96万 carries to 100.0 and drops it
        let v = t.select(999_600).unwrap().value;
        assert_eq!(v, Scaled { whole: 100, fraction: 0, decimals: 0 });
    }

    #[test]
    fn test_fixed_tier_never_drops_decimal() {
        let t = table();
        let v = t.select(250 * CHO).unwrap().value;
        assert_eq!(v, Scaled { whole: 250, fraction: 0, decimals: 1 });
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(matches!(
            UnitTable::new(vec![]),
            Err(FormatError::InvalidThresholds(_))
        ));
    }

    #[test]
    fn test_rejects_ascending_table() {
        let result = UnitTable::new(vec![
            UnitThreshold::new(MAN, "万", Precision::Fixed { decimals: 1 }),
            UnitThreshold::new(OKU, "億", Precision::Fixed { decimals: 1 }),
        ]);
        assert!(matches!(result, Err(FormatError::InvalidThresholds(_))));
    }

    #[test]
    fn test_rejects_duplicate_magnitude() {
        let result = UnitTable::new(vec![
            UnitThreshold::new(OKU, "億", Precision::Fixed { decimals: 1 }),
            UnitThreshold::new(OKU, "oku", Precision::Fixed { decimals: 1 }),
        ]);
        assert!(matches!(result, Err(FormatError::InvalidThresholds(_))));
    }

    #[test]
    fn test_rejects_zero_magnitude_and_empty_suffix() {
        assert!(UnitTable::new(vec![UnitThreshold::new(
            0,
            "x",
            Precision::Fixed { decimals: 0 }
        )])
        .is_err());
        assert!(UnitTable::new(vec![UnitThreshold::new(
            MAN,
            "",
            Precision::Fixed { decimals: 0 }
        )])
        .is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_precision() {
        assert!(UnitTable::new(vec![UnitThreshold::new(
            MAN,
            "万",
            Precision::Fixed { decimals: 7 }
        )])
        .is_err());
        assert!(UnitTable::new(vec![UnitThreshold::new(
            u128::MAX / 2,
            "big",
            Precision::Fixed { decimals: 1 }
        )])
        .is_err());
    }

    #[test]
    fn test_standard_table_passes_validation() {
        let standard = UnitTable::standard();
        assert_eq!(UnitTable::new(standard.thresholds().to_vec()), Ok(standard));
        assert_eq!(UnitTable::japanese(1, 100), Ok(UnitTable::standard()));
    }

    #[test]
    fn test_floor_is_smallest_magnitude() {
        assert_eq!(table().floor(), MAN);
    }
}
