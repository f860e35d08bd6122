// yen-units - Japanese-unit formatting for yen amounts
//
// Reads amounts from arguments or stdin and prints them with the largest
// fitting unit (兆/億/万), for scripts and dashboards that need the same
// labels as the budget pages.
//
// Architecture:
// - Config: ~/.config/yen-units/config.toml, overridden by YEN_UNITS_* env vars
// - Logging: tracing to stderr (stdout carries formatted output)
// - Formatter: built once from config, fails fast on a bad unit table

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use cli::{Cli, Commands, FormatOptions};
use yen_units::config::{Config, LoggingConfig};
use yen_units::{logging, UnitFormatter};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Config commands must work even when the config file is broken
    if let Commands::Config {
        show,
        reset,
        update,
        path,
        yes,
    } = cli.command
    {
        let _guard = logging::init(&LoggingConfig::default())?;
        cli::handle_config(show, reset, update, path, yes)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::from_env().context("loading configuration")?;

    // Must stay alive for the program's duration so file logs flush
    let _guard = logging::init(&config.logging).context("invalid [logging] settings")?;

    let formatter_config = config
        .formatter
        .to_formatter_config()
        .context("invalid [formatter] settings")?;
    let formatter = UnitFormatter::new(formatter_config).context("invalid unit table")?;

    let mut stdout = std::io::stdout().lock();

    let failures = match cli.command {
        Commands::Format {
            amounts,
            unit,
            exact,
            json,
        } => {
            let options = FormatOptions { unit, exact, json };
            let inputs = cli::numbered_inputs(amounts)?;
            cli::format_inputs(&formatter, inputs, &options, &mut stdout)?
        }
        Commands::Compact {
            values,
            suffix,
            whole,
            divide_by,
        } => {
            let compact = cli::compact_formatter(suffix, whole);
            cli::compact_values(&compact, &values, divide_by, &mut stdout)?;
            0
        }
        Commands::Table { unit, exact } => {
            let lines = cli::read_numbered(std::io::stdin().lock())?;
            cli::render_table(&formatter, lines, unit, exact, &mut stdout)?
        }
        Commands::Config { .. } => 0,
    };

    if failures > 0 {
        tracing::info!(failures, "some inputs were rejected");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
