// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - format: amounts -> 150万円 / 12.0億円 / 3.5兆円
// - compact: chart labels with a fixed suffix
// - table: aligned label/amount table from stdin
// - config: show, reset, update or locate the config file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::Path;

use yen_units::config::{Config, VERSION};
use yen_units::util::{display_width, pad_end, pad_start, truncate_to_width};
use yen_units::{
    CompactFormatter, CompactPrecision, FormatError, MonetaryAmount, SourceUnit, UnitFormatter,
};

/// Widest label kept in `table` output (display columns)
const MAX_LABEL_WIDTH: usize = 24;

/// yen-units - Japanese-unit formatting for yen amounts
#[derive(Parser)]
#[command(name = "yen-units")]
#[command(version = VERSION)]
#[command(about = "Format yen amounts with Japanese units (万/億/兆)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format amounts with the largest fitting unit (reads stdin if none given)
    Format {
        /// Amounts, e.g. 1500000 or 3,500,000,000,000
        amounts: Vec<String>,

        /// Unit the input is expressed in: yen, man, million, oku, cho
        #[arg(long, default_value = "yen")]
        unit: SourceUnit,

        /// Also print the exact amount (¥1,234,567)
        #[arg(long)]
        exact: bool,

        /// Print one JSON object per amount
        #[arg(long)]
        json: bool,
    },

    /// Label values already expressed in a chosen unit (chart axes, tooltips)
    Compact {
        /// Values to label
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Suffix appended to every label, e.g. 億 or 億円
        #[arg(long)]
        suffix: String,

        /// Round to whole numbers instead of one decimal
        #[arg(long)]
        whole: bool,

        /// Divide each value by this first (e.g. 100000000 for yen -> 億)
        #[arg(long)]
        divide_by: Option<f64>,
    },

    /// Read "label<TAB>amount" or "label,amount" lines and print an aligned table
    Table {
        /// Unit the amounts are expressed in
        #[arg(long, default_value = "yen")]
        unit: SourceUnit,

        /// Add an exact-amount column
        #[arg(long)]
        exact: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Update config with new defaults (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Skip the overwrite confirmation for --reset
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// format
// ─────────────────────────────────────────────────────────────────────────────

/// Output switches for `format`
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    pub unit: SourceUnit,
    pub exact: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct FormattedRow<'a> {
    input: &'a str,
    amount: MonetaryAmount,
    display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exact: Option<String>,
}

/// Format numbered input lines; returns how many were rejected.
///
/// Blank lines are skipped. Rejected lines are reported and do not stop the
/// remaining input from being formatted.
pub fn format_inputs<I, W>(
    formatter: &UnitFormatter,
    inputs: I,
    options: &FormatOptions,
    out: &mut W,
) -> Result<usize>
where
    I: IntoIterator<Item = (usize, String)>,
    W: Write,
{
    let mut failures = 0;

    for (line_no, raw) in inputs {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let amount = match MonetaryAmount::parse_scaled(raw, options.unit) {
            Ok(amount) => amount,
            Err(e) => {
                report_rejected(line_no, raw, &e);
                failures += 1;
                continue;
            }
        };

        let display = formatter.format(amount);
        let exact = options.exact.then(|| formatter.format_exact(amount));

        if options.json {
            let row = FormattedRow {
                input: raw,
                amount,
                display,
                exact,
            };
            writeln!(out, "{}", serde_json::to_string(&row)?)?;
        } else if let Some(exact) = exact {
            writeln!(out, "{}\t{}", display, exact)?;
        } else {
            writeln!(out, "{}", display)?;
        }
    }

    Ok(failures)
}

fn report_rejected(line_no: usize, raw: &str, error: &FormatError) {
    tracing::warn!(line = line_no, input = raw, %error, "rejected amount");
    eprintln!("line {}: {}", line_no, error);
}

// ─────────────────────────────────────────────────────────────────────────────
// compact
// ─────────────────────────────────────────────────────────────────────────────

/// Label each value; any non-finite value aborts with an error.
pub fn compact_values<W: Write>(
    formatter: &CompactFormatter,
    values: &[f64],
    divide_by: Option<f64>,
    out: &mut W,
) -> Result<()> {
    for &value in values {
        let label = match divide_by {
            Some(divisor) => formatter.format_divided(value, divisor),
            None => formatter.format(value),
        }
        .with_context(|| format!("cannot label {}", value))?;
        writeln!(out, "{}", label)?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// table
// ─────────────────────────────────────────────────────────────────────────────

/// Split "label<TAB>amount" or "label,amount" (first comma; amounts may
/// contain grouping commas)
pub fn split_row(line: &str) -> Option<(&str, &str)> {
    line.split_once('\t')
        .or_else(|| line.split_once(','))
        .map(|(label, amount)| (label.trim(), amount.trim()))
}

/// Render an aligned table; returns how many lines were rejected.
pub fn render_table<I, W>(
    formatter: &UnitFormatter,
    lines: I,
    unit: SourceUnit,
    exact: bool,
    out: &mut W,
) -> Result<usize>
where
    I: IntoIterator<Item = (usize, String)>,
    W: Write,
{
    let mut rows: Vec<(String, String, String)> = Vec::new();
    let mut failures = 0;

    for (line_no, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((label, raw)) = split_row(line) else {
            let error = FormatError::InvalidAmount(line.to_owned());
            report_rejected(line_no, line, &error);
            failures += 1;
            continue;
        };

        match MonetaryAmount::parse_scaled(raw, unit) {
            Ok(amount) => rows.push((
                truncate_to_width(label, MAX_LABEL_WIDTH).to_owned(),
                formatter.format(amount),
                formatter.format_exact(amount),
            )),
            Err(e) => {
                report_rejected(line_no, raw, &e);
                failures += 1;
            }
        }
    }

    let label_width = rows.iter().map(|r| display_width(&r.0)).max().unwrap_or(0);
    let value_width = rows.iter().map(|r| display_width(&r.1)).max().unwrap_or(0);
    let exact_width = rows.iter().map(|r| display_width(&r.2)).max().unwrap_or(0);

    for (label, value, exact_value) in &rows {
        let mut line = format!(
            "{}  {}",
            pad_end(label, label_width),
            pad_start(value, value_width)
        );
        if exact {
            line.push_str("  ");
            line.push_str(&pad_start(exact_value, exact_width));
        }
        writeln!(out, "{}", line.trim_end())?;
    }

    Ok(failures)
}

// ─────────────────────────────────────────────────────────────────────────────
// config
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(show: bool, reset: bool, update: bool, path: bool, yes: bool) -> Result<()> {
    let Some(config_path) = Config::config_path() else {
        bail!("could not determine config path");
    };

    if path {
        println!("{}", config_path.display());
    } else if show {
        handle_config_show(&config_path)?;
    } else if reset {
        handle_config_reset(&config_path, yes)?;
    } else if update {
        handle_config_update(&config_path)?;
    } else {
        // No flag provided, show help
        println!("Usage: yen-units config [--show|--reset|--update|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --update  Update config with new defaults (preserves user values)");
        println!("  --path    Show config file path");
    }
    Ok(())
}

fn handle_config_show(path: &Path) -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    print!("{}", config.to_toml());

    println!();
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset(path: &Path, yes: bool) -> Result<()> {
    if path.exists() && !yes {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    std::fs::write(path, Config::default().to_toml())
        .with_context(|| format!("writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_update(path: &Path) -> Result<()> {
    if Config::ensure_config_exists(path)? {
        println!("Created new config file: {}", path.display());
        return Ok(());
    }

    // Re-render existing values with the current template
    let existing = Config::load_from(path)?;
    let updated = existing.to_toml();

    let backup_path = path.with_extension("toml.bak");
    match std::fs::copy(path, &backup_path) {
        Ok(_) => println!("Backup created: {}", backup_path.display()),
        Err(e) => eprintln!("Warning: Could not create backup: {}", e),
    }

    std::fs::write(path, updated)
        .with_context(|| format!("writing config {}", path.display()))?;

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Arguments as numbered inputs, or stdin lines when there are none
pub fn numbered_inputs(args: Vec<String>) -> Result<Vec<(usize, String)>> {
    if !args.is_empty() {
        return Ok(args.into_iter().enumerate().map(|(i, a)| (i + 1, a)).collect());
    }
    read_numbered(std::io::stdin().lock())
}

pub fn read_numbered<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)).context("reading input"))
        .collect()
}

pub fn compact_formatter(suffix: String, whole: bool) -> CompactFormatter {
    let precision = if whole {
        CompactPrecision::Whole
    } else {
        CompactPrecision::OneDecimal
    };
    CompactFormatter::new(suffix, precision)
}
