// ============================================================================
// Command Line Interface
// ============================================================================

use crate::csv_io::{self, CsvOptions, ParseMode};
use crate::domain::{EngineConfig, FokSurplus, PriceOrdering};
use crate::engine::MatchingEngineBuilder;
use crate::interfaces::LoggingEventHandler;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Batch order matching: read orders, match them, write per-account results
#[derive(Parser, Debug, Clone)]
#[command(name = "batch-matching-engine")]
#[command(version)]
#[command(about = "Match a batch of orders and settle every account", long_about = None)]
pub struct Cli {
    /// Input file with order_id,type,account_id,dir,price,amount rows
    pub input: PathBuf,

    /// Where the account results are written
    pub output: PathBuf,

    /// Abort on the first malformed field instead of coercing it to zero
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Pop the lowest ask first
    #[arg(long, default_value_t = false)]
    pub conventional_asks: bool,

    /// Leave the unused part of a fully filled FOK maker on the book
    #[arg(long, default_value_t = false)]
    pub retain_fok_surplus: bool,

    /// Field delimiter for both files
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Log level, overridden by RUST_LOG
    #[arg(short = 'l', long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,
}

impl Cli {
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();
        if self.conventional_asks {
            config = config.with_ask_priority(PriceOrdering::LowestFirst);
        }
        if self.retain_fok_surplus {
            config = config.with_fok_surplus(FokSurplus::Retain);
        }
        config
    }

    pub fn csv_options(&self) -> crate::error::Result<CsvOptions> {
        let mode = if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        };
        Ok(CsvOptions::new()
            .with_delimiter(self.delimiter)?
            .with_parse_mode(mode))
    }
}

/// Install a stderr subscriber; `RUST_LOG` wins over `level`
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read, match and write; the caller decides how to report errors
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = cli.csv_options().context("invalid --delimiter")?;
    let config = cli.engine_config();

    tracing::info!(input = %cli.input.display(), ?config, strict = cli.strict, "starting batch");

    let orders = csv_io::read_orders(&cli.input, &options)
        .with_context(|| format!("failed to read orders from {}", cli.input.display()))?;

    let mut engine = MatchingEngineBuilder::new()
        .with_config(config)
        .event_handler(Arc::new(LoggingEventHandler))
        .build();
    let ledger = engine.process_batch(orders);

    csv_io::write_results(&cli.output, ledger, &options)
        .with_context(|| format!("failed to write results to {}", cli.output.display()))?;

    Ok(())
}
