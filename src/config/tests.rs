//! Configuration tests
//!
//! Round-trips through `to_toml()` guard against fields that are loaded but
//! never written (or written in a shape the loader rejects).

use super::*;
use crate::formatter::UnitFormatter;
use crate::MonetaryAmount;
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed = Config::from_toml(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
    assert_eq!(parsed.unwrap(), config);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.formatter.locale = "en".to_string();
    config.formatter.currency_suffix = " yen".to_string();
    config.formatter.group_scaled = true;
    config.formatter.decimals = 2;
    config.formatter.whole_at = 1_000;
    config.formatter.units = vec![
        UnitSetting {
            magnitude: 1_000_000_000_000,
            suffix: "兆".to_string(),
            decimals: Some(2),
            whole_at: None,
            trim_zeros: None,
        },
        UnitSetting {
            magnitude: 100_000_000,
            suffix: "億".to_string(),
            decimals: None,
            whole_at: Some(100),
            trim_zeros: None,
        },
        UnitSetting {
            magnitude: 10_000,
            suffix: "万".to_string(),
            decimals: None,
            whole_at: None,
            trim_zeros: Some(true),
        },
    ];
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;
    config.logging.file_prefix = "budget".to_string();

    let toml_str = config.to_toml();
    let parsed = Config::from_toml(&toml_str).unwrap_or_else(|e| {
        panic!("Customized config should round-trip.\nTOML:\n{toml_str}\nError: {e:?}")
    });
    assert_eq!(parsed, config);
}

#[test]
fn test_roundtrip_strings_needing_toml_escapes() {
    let mut config = Config::default();
    config.formatter.currency_suffix = "\u{7f}円\"\t".to_string();
    config.logging.file_prefix = "yen\u{1b}units".to_string();
    config.logging.file_dir = std::path::PathBuf::from("C:\\logs\\yen \"units\"");
    config.formatter.units = vec![UnitSetting {
        magnitude: 100_000_000,
        suffix: "\\億\n".to_string(),
        decimals: None,
        whole_at: None,
        trim_zeros: None,
    }];

    let toml_str = config.to_toml();
    let parsed = Config::from_toml(&toml_str).unwrap_or_else(|e| {
        panic!("Escaped strings should round-trip.\nTOML:\n{toml_str}\nError: {e:?}")
    });
    assert_eq!(parsed, config);
}

#[test]
fn test_every_section_is_serialized() {
    let toml_str = Config::default().to_toml();
    for key in [
        "[formatter]",
        "locale",
        "currency_suffix",
        "group_scaled",
        "decimals",
        "whole_at",
        "[logging]",
        "level",
        "file_enabled",
        "file_dir",
        "file_rotation",
        "file_prefix",
    ] {
        assert!(toml_str.contains(key), "missing {key} in:\n{toml_str}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    assert_eq!(Config::from_toml("").unwrap(), Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let config = Config::from_toml(
        r#"
[formatter]
group_scaled = true
"#,
    )
    .unwrap();

    assert!(config.formatter.group_scaled);
    assert_eq!(config.formatter.locale, "ja");
    assert_eq!(config.formatter.currency_suffix, "円");
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(Config::from_toml("[formatter\nlocale = ja").is_err());
    assert!(Config::from_toml("[formatter]\ngroup_scaled = \"yes\"").is_err());
}

#[test]
fn test_unknown_rotation_is_an_error() {
    let err = Config::from_toml("[logging]\nfile_rotation = \"weekly\"").unwrap_err();
    assert!(format!("{err:#}").contains("weekly"), "{err:#}");
}

#[test]
fn test_rotation_is_case_insensitive() {
    let config = Config::from_toml("[logging]\nfile_rotation = \"Hourly\"").unwrap();
    assert_eq!(config.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_unknown_log_level_is_an_error() {
    let err = Config::from_toml("[logging]\nlevel = \"verbose\"").unwrap_err();
    assert!(format!("{err:#}").contains("verbose"), "{err:#}");
    assert!(Config::from_toml("[logging]\nlevel = \"debug\"").is_ok());
}

#[test]
fn test_load_from_missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[formatter]\nlocale = \"en\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.formatter.locale, "en");
}

#[test]
fn test_load_from_broken_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "not = [valid").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("config.toml"), "{err:#}");
}

#[test]
fn test_ensure_config_exists_writes_template_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    assert!(Config::ensure_config_exists(&path).unwrap());
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());

    std::fs::write(&path, "[formatter]\nlocale = \"de\"\n").unwrap();
    assert!(!Config::ensure_config_exists(&path).unwrap());
    assert_eq!(Config::load_from(&path).unwrap().formatter.locale, "de");
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let mut config = Config::from_toml("[formatter]\nlocale = \"en\"\n").unwrap();
    let env: HashMap<&str, &str> = [
        (ENV_LOCALE, "fr"),
        (ENV_CURRENCY_SUFFIX, " JPY"),
        (ENV_LOG_LEVEL, "trace"),
    ]
    .into_iter()
    .collect();

    config.apply_env(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.formatter.locale, "fr");
    assert_eq!(config.formatter.currency_suffix, " JPY");
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_env_absent_keeps_file_values() {
    let mut config = Config::from_toml("[formatter]\nlocale = \"en\"\n").unwrap();
    config.apply_env(|_| None);
    assert_eq!(config.formatter.locale, "en");
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution into a formatter
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_default_settings_build_standard_formatter() {
    let config = Config::default().formatter.to_formatter_config().unwrap();
    let f = UnitFormatter::new(config).unwrap();
    assert_eq!(f.format(MonetaryAmount::new(1_500_000)), "150万円");
    assert_eq!(f.format(MonetaryAmount::new(250_000_000_000)), "2500億円");
}

#[test]
fn test_unknown_locale_fails_fast() {
    let settings = FormatterSettings {
        locale: "klingon".to_string(),
        ..FormatterSettings::default()
    };
    assert!(matches!(
        settings.to_formatter_config(),
        Err(crate::FormatError::UnknownLocale(_))
    ));
}

#[test]
fn test_custom_units_from_file() {
    let config = Config::from_toml(
        r#"
[formatter]
group_scaled = true

[[formatter.units]]
magnitude = 1000000000000
suffix = "兆"
decimals = 2

[[formatter.units]]
magnitude = 100000000
suffix = "億"
whole_at = 100
"#,
    )
    .unwrap();

    let f = UnitFormatter::new(config.formatter.to_formatter_config().unwrap()).unwrap();
    assert_eq!(f.format(MonetaryAmount::new(137_800_000_000_000)), "137.80兆円");
    assert_eq!(f.format(MonetaryAmount::new(250_000_000_000)), "2,500億円");
    // 万 is not in the custom table
    assert_eq!(f.format(MonetaryAmount::new(1_500_000)), "1,500,000円");
}

#[test]
fn test_custom_trim_zeros_unit() {
    let config = Config::from_toml(
        r#"
[[formatter.units]]
magnitude = 10000
suffix = "万"
trim_zeros = true
"#,
    )
    .unwrap();

    let f = UnitFormatter::new(config.formatter.to_formatter_config().unwrap()).unwrap();
    assert_eq!(f.format(MonetaryAmount::new(1_500_000)), "150万円");
    assert_eq!(f.format(MonetaryAmount::new(1_234_567)), "123.5万円");
}

#[test]
fn test_misordered_custom_units_fail_at_construction() {
    let config = Config::from_toml(
        r#"
[[formatter.units]]
magnitude = 10000
suffix = "万"

[[formatter.units]]
magnitude = 100000000
suffix = "億"
"#,
    )
    .unwrap();

    let formatter_config = config.formatter.to_formatter_config().unwrap();
    assert!(matches!(
        UnitFormatter::new(formatter_config),
        Err(crate::FormatError::InvalidThresholds(_))
    ));
}
