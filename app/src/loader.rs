// In app/src/loader.rs

use anyhow::{Context, Result, bail};
use core_types::TradeRecord;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Loads a trade log from a `.json` (array of records) or `.csv` file.
///
/// CSV files need a header row using the `TradeRecord` field names; optional
/// columns may be left out or left empty. `pnl` is read from its exact text in
/// both formats, so no digits are lost to floating point.
pub fn load_trades(path: &Path) -> Result<Vec<TradeRecord>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let trades = match extension.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!(
            "Unsupported trade log format '{}' for {} (expected .json or .csv)",
            other,
            path.display()
        ),
    };

    if !is_chronological(&trades) {
        tracing::warn!(
            path = %path.display(),
            "Trade log is not sorted by entry date; trades will be re-ordered for sequential metrics."
        );
    }
    tracing::info!(path = %path.display(), count = trades.len(), "Loaded trade log.");

    Ok(trades)
}

fn load_json(path: &Path) -> Result<Vec<TradeRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let records: Vec<Value> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON trade log {}", path.display()))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            pnl_as_text(&mut record);
            serde_json::from_value(record)
                .with_context(|| format!("Invalid trade at index {} of {}", index, path.display()))
        })
        .collect()
}

/// Rewrites a numeric `pnl` as a string holding the number's original digits.
fn pnl_as_text(record: &mut Value) {
    if let Some(pnl) = record.get_mut("pnl") {
        if pnl.is_number() {
            *pnl = Value::String(pnl.to_string());
        }
    }
}

fn load_csv(path: &Path) -> Result<Vec<TradeRecord>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut trades = Vec::new();
    for (index, row) in rdr.deserialize().enumerate() {
        // Row 1 is the header.
        let trade: TradeRecord =
            row.with_context(|| format!("Invalid trade on line {} of {}", index + 2, path.display()))?;
        trades.push(trade);
    }
    Ok(trades)
}

fn is_chronological(trades: &[TradeRecord]) -> bool {
    trades.windows(2).all(|w| w[0].entry_date <= w[1].entry_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::Side;
    use rust_decimal_macros::dec;
    use std::fs;

    #[test]
    fn test_load_csv_with_optional_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        fs::write(
            &path,
            "entry_date,exit_date,pnl,symbol,side,hold_time\n\
             2024-01-02T09:00:00Z,2024-01-02T09:45:00Z,120.5,ESH4,buy,\n\
             2024-01-02T11:00:00Z,,-40,ESH4,sell,00:20:00\n",
        )
        .unwrap();

        let trades = load_trades(&path).unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].pnl, dec!(120.5));
        assert_eq!(trades[0].side, Some(Side::Long));
        assert_eq!(
            trades[0].exit_date,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 9, 45, 0).unwrap())
        );
        assert_eq!(trades[1].exit_date, None);
        assert_eq!(trades[1].hold_time.as_deref(), Some("00:20:00"));
        assert_eq!(trades[1].duration_seconds, None);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.JSON");
        fs::write(
            &path,
            r#"[
                { "entry_date": "2024-01-02T09:00:00Z", "pnl": "10.25", "duration_seconds": 300 },
                { "entry_date": "2024-01-03T09:00:00Z", "pnl": -3 }
            ]"#,
        )
        .unwrap();

        let trades = load_trades(&path).unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].duration_seconds, Some(300.0));
        assert_eq!(trades[1].pnl, dec!(-3));
    }

    #[test]
    fn test_pnl_keeps_full_precision() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("trades.csv");
        fs::write(
            &csv_path,
            "entry_date,pnl\n\
             2024-01-02T09:00:00Z,0.123456789012345678\n\
             2024-01-03T09:00:00Z,12345678901234.5678\n",
        )
        .unwrap();
        let json_path = dir.path().join("trades.json");
        fs::write(
            &json_path,
            r#"[
                { "entry_date": "2024-01-02T09:00:00Z", "pnl": 0.123456789012345678 },
                { "entry_date": "2024-01-03T09:00:00Z", "pnl": 12345678901234.5678 }
            ]"#,
        )
        .unwrap();

        for path in [csv_path, json_path] {
            let trades = load_trades(&path).unwrap();
            assert_eq!(trades[0].pnl, dec!(0.123456789012345678));
            assert_eq!(trades[1].pnl, dec!(12345678901234.5678));
        }
    }

    #[test]
    fn test_broker_side_spellings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        fs::write(
            &path,
            "entry_date,pnl,side\n\
             2024-01-02T09:00:00Z,5,BUY\n\
             2024-01-02T10:00:00Z,-2,Sell\n\
             2024-01-02T11:00:00Z,1,\n",
        )
        .unwrap();

        let trades = load_trades(&path).unwrap();

        let sides: Vec<Option<Side>> = trades.iter().map(|t| t.side).collect();
        assert_eq!(sides, vec![Some(Side::Long), Some(Side::Short), None]);
    }

    #[test]
    fn test_bad_csv_row_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        fs::write(
            &path,
            "entry_date,pnl\n2024-01-02T09:00:00Z,5\nnot-a-date,7\n",
        )
        .unwrap();

        let err = load_trades(&path).unwrap_err();
        assert!(format!("{err}").contains("line 3"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_trades(Path::new("trades.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported trade log format 'xlsx'"));
    }
}
