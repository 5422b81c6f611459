// In app/src/main.rs

use analytics::StatsEngine;
use anyhow::{Context, Result};
use app_config::Settings;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use core_types::{Period, TradeRecord};
use export::ReportPaths;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod display;
mod loader;
mod watch;

use crate::display::{daily_table, stats_table};
use crate::loader::load_trades;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Computes trading statistics from a trade journal log.")]
struct Cli {
    /// Directory holding `base.toml` and the environment-specific config files.
    /// Defaults to `config/`.
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Computes and prints statistics for a trade log.
    Stats {
        /// The trade log to read (.csv or .json).
        #[arg(short, long)]
        input: PathBuf,

        /// Reporting period: all, daily, weekly or monthly.
        #[arg(short, long)]
        period: Option<Period>,

        /// Print the statistics as JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Also print the per-day equity table.
        #[arg(long)]
        daily: bool,
    },

    /// Writes the summary and trade detail sheets for a trade log.
    Export {
        /// The trade log to read (.csv or .json).
        #[arg(short, long)]
        input: PathBuf,

        /// Reporting period: all, daily, weekly or monthly.
        #[arg(short, long)]
        period: Option<Period>,

        /// Output directory. Defaults to `export.output_dir` from the settings.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Re-reads the trade log on an interval and prints updated statistics.
    Watch {
        /// The trade log to read (.csv or .json).
        #[arg(short, long)]
        input: PathBuf,

        /// Reporting period: all, daily, weekly or monthly.
        #[arg(short, long)]
        period: Option<Period>,

        /// Polling interval in seconds. Defaults to `watch.interval_secs`.
        #[arg(long)]
        interval: Option<u64>,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = match &cli.config_dir {
        Some(dir) => app_config::load_settings_from(dir)
            .with_context(|| format!("Failed to load settings from {}", dir.display()))?,
        None => app_config::load_settings().context("Failed to load settings from config/")?,
    };

    init_tracing(&settings);
    tracing::info!(environment = %settings.app.environment, "Starting trade-stats.");

    let engine = settings
        .stats
        .fixed_offset()
        .map(StatsEngine::with_offset)
        .unwrap_or_default();
    let default_period = settings.stats.default_period;

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Stats {
            input,
            period,
            json,
            daily,
        } => handle_stats(&engine, input, period.unwrap_or(default_period), json, daily)?,
        Commands::Export { input, period, out } => {
            let out = out.unwrap_or_else(|| settings.export.output_dir.clone());
            handle_export(&engine, input, period.unwrap_or(default_period), out)?
        }
        Commands::Watch {
            input,
            period,
            interval,
        } => {
            let interval = Duration::from_secs(interval.unwrap_or(settings.watch.interval_secs).max(1));
            watch::run_watch(input, period.unwrap_or(default_period), engine, interval).await?
        }
    }

    Ok(())
}

/// Logs go to stderr so that `stats --json` output stays machine-readable.
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

// --- "Stats" Subcommand Logic ---

fn handle_stats(
    engine: &StatsEngine,
    input: PathBuf,
    period: Period,
    json: bool,
    daily: bool,
) -> Result<()> {
    let trades = load_trades(&input)?;
    let stats = engine.compute_stats(&trades, period);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", stats_table(&stats));
    if daily && !stats.daily.is_empty() {
        println!("{}", daily_table(&stats));
    }
    Ok(())
}

// --- "Export" Subcommand Logic ---

fn handle_export(engine: &StatsEngine, input: PathBuf, period: Period, out: PathBuf) -> Result<()> {
    let trades = load_trades(&input)?;
    let paths = export_report(engine, &trades, period, Utc::now(), &out)?;

    println!("Summary: {}", paths.summary.display());
    println!("Trades:  {}", paths.trades.display());
    Ok(())
}

/// Writes the summary for `period` and the detail sheet of the trades it was
/// computed from, in chronological order.
fn export_report(
    engine: &StatsEngine,
    trades: &[TradeRecord],
    period: Period,
    now: DateTime<Utc>,
    out: &Path,
) -> Result<ReportPaths> {
    let stats = engine.compute_stats_at(trades, period, now);

    let mut selected = engine.filter(trades, period, now);
    selected.sort_by_key(|t| t.entry_date);

    export::write_report(out, &stats, selected)
        .with_context(|| format!("Failed to write report to {}", out.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use export::TradeRow;
    use rust_decimal_macros::dec;

    #[test]
    fn test_export_report_lists_the_summarised_trades() {
        let dir = tempfile::tempdir().unwrap();
        let engine = StatsEngine::with_offset(FixedOffset::east_opt(0).unwrap());
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let at = |day: u32| Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap();

        // Unsorted, with one trade outside the weekly window.
        let trades = vec![
            TradeRecord::new(at(28), dec!(10)),
            TradeRecord::new(at(1), dec!(100)),
            TradeRecord::new(at(25), dec!(-4)),
            TradeRecord::new(at(29), dec!(0)),
        ];

        let paths = export_report(&engine, &trades, Period::Weekly, now, dir.path()).unwrap();

        let summary = export::read_report_summary(dir.path()).unwrap();
        assert_eq!(summary.period, Period::Weekly);
        assert_eq!(summary.unfiltered_trades, 4);
        assert_eq!(summary.total_trades, 3);
        assert_eq!(summary.total_pnl, dec!(6));

        let rows: Vec<TradeRow> = csv::Reader::from_path(&paths.trades)
            .unwrap()
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        let pnls: Vec<_> = rows.iter().map(|r| r.pnl).collect();
        assert_eq!(pnls, vec![dec!(-4), dec!(10), dec!(0)]);
        assert_eq!(rows[0].entry_date, at(25).to_rfc3339());
        assert_eq!(rows.len(), summary.total_trades);
    }
}
