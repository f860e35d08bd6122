//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote a string with TOML escaping (control characters, quotes, `\`)
fn toml_str(s: &str) -> String {
    toml::Value::String(s.to_owned()).to_string()
}

impl Config {
    /// Serialize custom units to `[[formatter.units]]` entries
    pub(super) fn units_to_toml(&self) -> String {
        if self.formatter.units.is_empty() {
            // Show example comments when the built-in table is in use
            return r#"
# Custom unit table (replaces 兆/億/万 when present, largest first)
# [[formatter.units]]
# magnitude = 1000000000000
# suffix = "兆"
# decimals = 2
#
# [[formatter.units]]
# magnitude = 100000000
# suffix = "億"
# whole_at = 100
#
# [[formatter.units]]
# magnitude = 10000
# suffix = "万"
# trim_zeros = true
"#
            .to_string();
        }

        let mut output = String::new();
        for unit in &self.formatter.units {
            output.push_str("\n[[formatter.units]]\n");
            output.push_str(&format!("magnitude = {}\n", unit.magnitude));
            output.push_str(&format!("suffix = {}\n", toml_str(&unit.suffix)));
            if let Some(decimals) = unit.decimals {
                output.push_str(&format!("decimals = {}\n", decimals));
            }
            if let Some(whole_at) = unit.whole_at {
                output.push_str(&format!("whole_at = {}\n", whole_at));
            }
            if let Some(trim_zeros) = unit.trim_zeros {
                output.push_str(&format!("trim_zeros = {}\n", trim_zeros));
            }
        }
        output
    }

    /// Render the full config file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# yen-units configuration

# Currency formatting
[formatter]
# Digit grouping locale: ja, en, de, fr, ...
locale = {locale}
# Appended after the unit (150万円)
currency_suffix = {suffix}
# Group digits of scaled numerals (2,500億円 instead of 2500億円)
group_scaled = {group_scaled}
# Fraction digits for scaled numerals
decimals = {decimals}
# 億 switches to whole numbers at this value (12.0億円, 2500億円)
whole_at = {whole_at}
{units}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            locale = toml_str(&self.formatter.locale),
            suffix = toml_str(&self.formatter.currency_suffix),
            group_scaled = self.formatter.group_scaled,
            decimals = self.formatter.decimals,
            whole_at = self.formatter.whole_at,
            units = self.units_to_toml(),
            log_level = toml_str(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_str(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = toml_str(&self.logging.file_prefix),
        )
    }
}
