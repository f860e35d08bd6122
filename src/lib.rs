//! Japanese-unit formatting for yen amounts and counts
//!
//! Renders amounts the way the finance and budget dashboards show them:
//! `150万円`, `12.0億円`, `2500億円`, `3.5兆円`, `9,999円`.
//!
//! - [`UnitFormatter`]: picks 兆/億/万 and rounds exactly on integers
//! - [`CompactFormatter`]: axis/tooltip labels with a caller-chosen suffix
//! - [`DigitGrouper`]: grouped counts, `¥` exact amounts, signed deltas
//!
//! ```
//! use yen_units::{MonetaryAmount, UnitFormatter};
//!
//! let f = UnitFormatter::japanese();
//! assert_eq!(f.format(MonetaryAmount::new(3_500_000_000_000)), "3.5兆円");
//! assert!(f.format_i64(-5_000).is_err());
//! ```

pub mod amount;
pub mod compact;
pub mod config;
pub mod error;
pub mod formatter;
pub mod grouping;
pub mod logging;
pub mod units;
pub mod util;

pub use amount::{MonetaryAmount, SourceUnit};
pub use compact::{CompactFormatter, CompactPrecision};
pub use error::FormatError;
pub use formatter::{FormatterConfig, UnitFormatter};
pub use grouping::{format_percent, format_share, DigitGrouper};
pub use units::{Precision, UnitTable, UnitThreshold};
