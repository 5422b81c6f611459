// In crates/export/src/summary.rs

use crate::{Error, Result};
use analytics::TradeStats;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

/// One label/value row of the summary sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub metric: String,
    pub value: String,
}

/// Flattens `stats` into summary rows, in display order.
///
/// Decimals are written in their exact textual form and floats in Rust's
/// shortest round-trip form, so [`read_summary`] restores the same values.
/// The per-day curve is not part of the summary.
pub fn summary_rows(stats: &TradeStats) -> Vec<SummaryRow> {
    let rows: Vec<(&str, String)> = vec![
        ("period", stats.period.to_string()),
        ("unfiltered_trades", stats.unfiltered_trades.to_string()),
        ("total_trades", stats.total_trades.to_string()),
        ("winning_trades", stats.winning_trades.to_string()),
        ("losing_trades", stats.losing_trades.to_string()),
        ("break_even_trades", stats.break_even_trades.to_string()),
        ("win_rate_pct", stats.win_rate_pct.to_string()),
        ("total_pnl", stats.total_pnl.to_string()),
        ("gross_profit", stats.gross_profit.to_string()),
        ("gross_loss", stats.gross_loss.to_string()),
        ("average_winning_trade", stats.average_winning_trade.to_string()),
        ("average_losing_trade", stats.average_losing_trade.to_string()),
        ("average_trade_pnl", stats.average_trade_pnl.to_string()),
        ("largest_win", stats.largest_win.to_string()),
        ("largest_loss", stats.largest_loss.to_string()),
        ("profit_factor", stats.profit_factor.to_string()),
        ("trade_expectancy", stats.trade_expectancy.to_string()),
        ("logged_days", stats.logged_days.to_string()),
        ("winning_days", stats.winning_days.to_string()),
        ("losing_days", stats.losing_days.to_string()),
        ("break_even_days", stats.break_even_days.to_string()),
        ("max_consecutive_wins", stats.max_consecutive_wins.to_string()),
        ("max_consecutive_losses", stats.max_consecutive_losses.to_string()),
        ("max_consecutive_winning_days", stats.max_consecutive_winning_days.to_string()),
        ("max_consecutive_losing_days", stats.max_consecutive_losing_days.to_string()),
        ("max_drawdown", stats.max_drawdown.to_string()),
        ("max_drawdown_percentage", stats.max_drawdown_percentage.to_string()),
        ("average_drawdown", stats.average_drawdown.to_string()),
        ("average_drawdown_percentage", stats.average_drawdown_percentage.to_string()),
        ("average_hold_time_all", stats.average_hold_time_all.to_string()),
        ("average_hold_time_winning", stats.average_hold_time_winning.to_string()),
        ("average_hold_time_losing", stats.average_hold_time_losing.to_string()),
    ];

    rows.into_iter()
        .map(|(metric, value)| SummaryRow {
            metric: metric.to_string(),
            value,
        })
        .collect()
}

/// Writes the summary sheet (`metric,value` header plus one row per metric).
pub fn write_summary<W: Write>(writer: W, stats: &TradeStats) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in summary_rows(stats) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads a summary sheet back into a [`TradeStats`].
///
/// Unknown metrics are ignored; every known metric must be present.
/// `daily` comes back empty.
pub fn read_summary<R: Read>(reader: R) -> Result<TradeStats> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut values = HashMap::new();
    for row in rdr.deserialize() {
        let row: SummaryRow = row?;
        values.insert(row.metric, row.value);
    }
    let sheet = Sheet { values };

    Ok(TradeStats {
        period: sheet.get("period")?,
        unfiltered_trades: sheet.get("unfiltered_trades")?,
        total_trades: sheet.get("total_trades")?,
        winning_trades: sheet.get("winning_trades")?,
        losing_trades: sheet.get("losing_trades")?,
        break_even_trades: sheet.get("break_even_trades")?,
        win_rate_pct: sheet.get("win_rate_pct")?,
        total_pnl: sheet.get("total_pnl")?,
        gross_profit: sheet.get("gross_profit")?,
        gross_loss: sheet.get("gross_loss")?,
        average_winning_trade: sheet.get("average_winning_trade")?,
        average_losing_trade: sheet.get("average_losing_trade")?,
        average_trade_pnl: sheet.get("average_trade_pnl")?,
        largest_win: sheet.get("largest_win")?,
        largest_loss: sheet.get("largest_loss")?,
        profit_factor: sheet.get("profit_factor")?,
        trade_expectancy: sheet.get("trade_expectancy")?,
        logged_days: sheet.get("logged_days")?,
        winning_days: sheet.get("winning_days")?,
        losing_days: sheet.get("losing_days")?,
        break_even_days: sheet.get("break_even_days")?,
        max_consecutive_wins: sheet.get("max_consecutive_wins")?,
        max_consecutive_losses: sheet.get("max_consecutive_losses")?,
        max_consecutive_winning_days: sheet.get("max_consecutive_winning_days")?,
        max_consecutive_losing_days: sheet.get("max_consecutive_losing_days")?,
        max_drawdown: sheet.get("max_drawdown")?,
        max_drawdown_percentage: sheet.get("max_drawdown_percentage")?,
        average_drawdown: sheet.get("average_drawdown")?,
        average_drawdown_percentage: sheet.get("average_drawdown_percentage")?,
        average_hold_time_all: sheet.get("average_hold_time_all")?,
        average_hold_time_winning: sheet.get("average_hold_time_winning")?,
        average_hold_time_losing: sheet.get("average_hold_time_losing")?,
        daily: Vec::new(),
    })
}

struct Sheet {
    values: HashMap<String, String>,
}

impl Sheet {
    fn get<T>(&self, metric: &'static str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.values.get(metric).ok_or(Error::MissingMetric(metric))?;
        raw.trim().parse().map_err(|e: T::Err| Error::InvalidValue {
            metric,
            value: raw.clone(),
            reason: e.to_string(),
        })
    }
}
