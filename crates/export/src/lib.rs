//! Two-sheet tabular export of trade statistics.
//!
//! A report is written as a pair of CSV sheets in one directory:
//! `summary.csv` holds one `metric,value` row per statistic and `trades.csv`
//! holds one row per trade the statistics were computed from.

pub mod error;
pub mod summary;
pub mod trades;

pub use error::{Error, Result};
pub use summary::{SummaryRow, read_summary, summary_rows, write_summary};
pub use trades::{TradeRow, write_trades};

use analytics::TradeStats;
use core_types::TradeRecord;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const SUMMARY_SHEET: &str = "summary.csv";
pub const TRADES_SHEET: &str = "trades.csv";

/// Locations of the sheets produced by [`write_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub summary: PathBuf,
    pub trades: PathBuf,
}

/// Writes both sheets into `dir`, creating it if needed.
pub fn write_report<'a, I>(dir: impl AsRef<Path>, stats: &TradeStats, trades: I) -> Result<ReportPaths>
where
    I: IntoIterator<Item = &'a TradeRecord>,
{
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let paths = ReportPaths {
        summary: dir.join(SUMMARY_SHEET),
        trades: dir.join(TRADES_SHEET),
    };

    write_summary(BufWriter::new(File::create(&paths.summary)?), stats)?;
    let rows = write_trades(BufWriter::new(File::create(&paths.trades)?), trades)?;

    tracing::info!(
        summary = %paths.summary.display(),
        trades = %paths.trades.display(),
        rows,
        "Report written."
    );

    Ok(paths)
}

/// Reads the summary sheet of a report previously written to `dir`.
pub fn read_report_summary(dir: impl AsRef<Path>) -> Result<TradeStats> {
    let file = File::open(dir.as_ref().join(SUMMARY_SHEET))?;
    read_summary(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::StatsEngine;
    use chrono::{Duration, FixedOffset, TimeZone, Utc};
    use core_types::Period;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_report_creates_both_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("report");

        let entry = Utc.with_ymd_and_hms(2024, 8, 1, 10, 0, 0).unwrap();
        let trades = vec![
            TradeRecord::new(entry, dec!(25)).with_exit(entry + Duration::minutes(12)),
            TradeRecord::new(entry + Duration::hours(1), dec!(-10)),
            TradeRecord::new(entry + Duration::days(1), dec!(40.75)),
        ];
        let stats = StatsEngine::with_offset(FixedOffset::east_opt(0).unwrap())
            .compute_stats(&trades, Period::All);

        let paths = write_report(&out, &stats, &trades).unwrap();

        assert!(paths.summary.exists());
        let detail = fs::read_to_string(&paths.trades).unwrap();
        assert_eq!(detail.lines().count(), 1 + trades.len());

        let restored = read_report_summary(&out).unwrap();
        assert_eq!(restored.total_pnl, stats.total_pnl);
        assert_eq!(restored.max_drawdown_percentage, stats.max_drawdown_percentage);
        assert_eq!(restored.average_hold_time_all, stats.average_hold_time_all);
        assert_eq!(restored.logged_days, 2);
    }

    #[test]
    fn test_missing_report_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_report_summary(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
