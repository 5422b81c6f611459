// In crates/analytics/src/types.rs

use chrono::NaiveDate;
use core_types::Period;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net result of all trades entered on one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub pnl: Decimal,
    pub trade_count: usize,
    /// Running sum of `pnl` over this and every earlier day in the window.
    pub cumulative_pnl: Decimal,
}

/// Aggregate trading statistics for one reporting period.
///
/// Money amounts are `Decimal` in account currency. Ratios and percentages are
/// `f64`, hold times are `f64` minutes. Every field is derived solely from the
/// trades inside the period window, except `unfiltered_trades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    pub period: Period,
    /// Number of trades handed to the engine before the period filter.
    pub unfiltered_trades: usize,

    // I. Trade counts
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub break_even_trades: usize,
    pub win_rate_pct: f64,

    // II. Profitability
    pub total_pnl: Decimal,
    pub gross_profit: Decimal,
    /// Absolute value of the summed losing trades.
    pub gross_loss: Decimal,
    pub average_winning_trade: Decimal,
    /// Mean of the losing trades; negative whenever there is at least one loss.
    pub average_losing_trade: Decimal,
    pub average_trade_pnl: Decimal,
    pub largest_win: Decimal,
    pub largest_loss: Decimal,
    pub profit_factor: f64,
    pub trade_expectancy: Decimal,

    // III. Day-level
    pub logged_days: usize,
    pub winning_days: usize,
    pub losing_days: usize,
    pub break_even_days: usize,

    // IV. Streaks
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
    pub max_consecutive_winning_days: usize,
    pub max_consecutive_losing_days: usize,

    // V. Drawdown
    pub max_drawdown: Decimal,
    pub max_drawdown_percentage: f64,
    pub average_drawdown: Decimal,
    pub average_drawdown_percentage: f64,

    // VI. Hold time (minutes)
    pub average_hold_time_all: f64,
    pub average_hold_time_winning: f64,
    pub average_hold_time_losing: f64,

    /// Chronological per-day equity curve.
    #[serde(default)]
    pub daily: Vec<DaySummary>,
}

impl TradeStats {
    /// Creates a zeroed report for `period`.
    pub fn new(period: Period) -> Self {
        Self {
            period,
            unfiltered_trades: 0,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            break_even_trades: 0,
            win_rate_pct: 0.0,
            total_pnl: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            average_winning_trade: Decimal::ZERO,
            average_losing_trade: Decimal::ZERO,
            average_trade_pnl: Decimal::ZERO,
            largest_win: Decimal::ZERO,
            largest_loss: Decimal::ZERO,
            profit_factor: 0.0,
            trade_expectancy: Decimal::ZERO,
            logged_days: 0,
            winning_days: 0,
            losing_days: 0,
            break_even_days: 0,
            max_consecutive_wins: 0,
            max_consecutive_losses: 0,
            max_consecutive_winning_days: 0,
            max_consecutive_losing_days: 0,
            max_drawdown: Decimal::ZERO,
            max_drawdown_percentage: 0.0,
            average_drawdown: Decimal::ZERO,
            average_drawdown_percentage: 0.0,
            average_hold_time_all: 0.0,
            average_hold_time_winning: 0.0,
            average_hold_time_losing: 0.0,
            daily: Vec::new(),
        }
    }
}

impl Default for TradeStats {
    fn default() -> Self {
        Self::new(Period::All)
    }
}
