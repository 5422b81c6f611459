// In crates/export/src/trades.rs

use crate::Result;
use analytics::hold_minutes;
use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One row of the trade detail sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRow {
    pub entry_date: String,
    pub exit_date: String,
    pub symbol: String,
    pub side: String,
    pub pnl: Decimal,
    /// Empty when no hold time could be resolved.
    pub hold_minutes: Option<f64>,
    pub outcome: String,
}

impl From<&TradeRecord> for TradeRow {
    fn from(trade: &TradeRecord) -> Self {
        let outcome = if trade.is_win() {
            "win"
        } else if trade.is_loss() {
            "loss"
        } else {
            "break_even"
        };

        Self {
            entry_date: trade.entry_date.to_rfc3339(),
            exit_date: trade.exit_date.map(|d| d.to_rfc3339()).unwrap_or_default(),
            symbol: trade.symbol.clone().unwrap_or_default(),
            side: trade.side.map(|s| s.to_string()).unwrap_or_default(),
            pnl: trade.pnl,
            hold_minutes: hold_minutes(trade).map(|(minutes, _)| minutes),
            outcome: outcome.to_string(),
        }
    }
}

/// Writes the trade detail sheet, one row per trade in the given order.
pub fn write_trades<'a, W, I>(writer: W, trades: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a TradeRecord>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    let mut written = 0;
    for trade in trades {
        wtr.serialize(TradeRow::from(trade))?;
        written += 1;
    }
    wtr.flush()?;
    Ok(written)
}
