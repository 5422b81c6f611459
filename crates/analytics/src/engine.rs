// In crates/analytics/src/engine.rs

use crate::days::{DayClock, day_key, group_by_day};
use crate::drawdown::measure_drawdown;
use crate::hold_time::average_hold_times;
use crate::streaks::longest_streaks;
use crate::types::{DaySummary, TradeStats};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use core_types::{Period, TradeRecord};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Reported as the profit factor when there are winners but no losers.
pub const PROFIT_FACTOR_SENTINEL: f64 = 999.0;

/// A stateless calculator turning a trade log into [`TradeStats`].
///
/// The only configuration is the [`DayClock`] that defines a "calendar day"
/// for the daily filter and the day-level metrics. Computation never fails:
/// fields that cannot be derived from the input are left at zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsEngine {
    clock: DayClock,
}

impl StatsEngine {
    /// Creates an engine that buckets days in the host's local time zone.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            clock: DayClock::Fixed(offset),
        }
    }

    pub fn clock(&self) -> DayClock {
        self.clock
    }

    /// Computes statistics for `period`, measured back from the current time.
    pub fn compute_stats(&self, trades: &[TradeRecord], period: Period) -> TradeStats {
        self.compute_stats_at(trades, period, Utc::now())
    }

    /// Computes statistics for `period` with an explicit reference instant.
    ///
    /// Trades are expected in ascending `entry_date` order. The filtered view is
    /// stable-sorted by `entry_date` before the sequential metrics (streaks,
    /// drawdown) run, so out-of-order input does not corrupt them.
    pub fn compute_stats_at(
        &self,
        trades: &[TradeRecord],
        period: Period,
        now: DateTime<Utc>,
    ) -> TradeStats {
        let mut stats = TradeStats::new(period);
        stats.unfiltered_trades = trades.len();

        let mut selected = self.filter(trades, period, now);
        if selected.is_empty() {
            tracing::debug!(%period, unfiltered = trades.len(), "No trades in period; returning empty stats.");
            return stats;
        }
        selected.sort_by_key(|t| t.entry_date);

        self.calculate_profitability(&selected, &mut stats);

        let days = group_by_day(&selected, self.clock);
        self.calculate_day_metrics(&days, &mut stats);

        let trade_streaks = longest_streaks(selected.iter().map(|t| t.pnl));
        stats.max_consecutive_wins = trade_streaks.max_wins;
        stats.max_consecutive_losses = trade_streaks.max_losses;

        let drawdown = measure_drawdown(selected.iter().map(|t| t.pnl));
        stats.max_drawdown = drawdown.max_amount;
        stats.max_drawdown_percentage = drawdown.max_percentage;
        stats.average_drawdown = drawdown.average_amount;
        stats.average_drawdown_percentage = drawdown.average_percentage;

        let hold = average_hold_times(&selected);
        stats.average_hold_time_all = hold.all;
        stats.average_hold_time_winning = hold.winning;
        stats.average_hold_time_losing = hold.losing;

        stats.daily = days;

        tracing::debug!(
            %period,
            trades = stats.total_trades,
            days = stats.logged_days,
            drawdown_events = drawdown.events,
            hold_time_measured = hold.measured,
            total_pnl = %stats.total_pnl,
            "Computed trade statistics."
        );

        stats
    }

    /// Returns the trades that fall inside `period` relative to `now`.
    pub fn filter<'a>(
        &self,
        trades: &'a [TradeRecord],
        period: Period,
        now: DateTime<Utc>,
    ) -> Vec<&'a TradeRecord> {
        match period {
            Period::All => trades.iter().collect(),
            Period::Daily => {
                let today = self.clock.date_of(now);
                trades
                    .iter()
                    .filter(|t| day_key(t, self.clock) == today)
                    .collect()
            }
            Period::Weekly | Period::Monthly => {
                let days = period.rolling_days().unwrap_or_default();
                let cutoff = now - Duration::days(days);
                trades.iter().filter(|t| t.entry_date >= cutoff).collect()
            }
        }
    }

    /// Win/loss partition, sums, means, profit factor and expectancy.
    ///
    /// Sums use checked arithmetic. A sum that overflows `Decimal` is reported
    /// as zero, along with every figure derived from it.
    fn calculate_profitability(&self, trades: &[&TradeRecord], stats: &mut TradeStats) {
        let mut total_pnl = Some(Decimal::ZERO);
        let mut gross_profit = Some(Decimal::ZERO);
        let mut losing_sum = Some(Decimal::ZERO);

        for trade in trades {
            total_pnl = total_pnl.and_then(|sum| sum.checked_add(trade.pnl));

            if trade.is_win() {
                stats.winning_trades += 1;
                gross_profit = gross_profit.and_then(|sum| sum.checked_add(trade.pnl));
                stats.largest_win = stats.largest_win.max(trade.pnl);
            } else if trade.is_loss() {
                stats.losing_trades += 1;
                losing_sum = losing_sum.and_then(|sum| sum.checked_add(trade.pnl));
                stats.largest_loss = stats.largest_loss.min(trade.pnl);
            } else {
                stats.break_even_trades += 1;
            }
        }

        if total_pnl.is_none() || gross_profit.is_none() || losing_sum.is_none() {
            tracing::warn!(
                trades = trades.len(),
                "P&L sum overflowed; affected metrics are reported as zero."
            );
        }

        stats.total_trades = trades.len();
        let total = Decimal::from(stats.total_trades);

        stats.total_pnl = total_pnl.unwrap_or_default();
        stats.gross_profit = gross_profit.unwrap_or_default();
        stats.gross_loss = losing_sum.map(|sum| sum.abs()).unwrap_or_default();

        stats.average_winning_trade =
            checked_mean(gross_profit, stats.winning_trades).unwrap_or_default();
        stats.average_losing_trade = checked_mean(losing_sum, stats.losing_trades).unwrap_or_default();
        stats.average_trade_pnl = checked_mean(total_pnl, stats.total_trades).unwrap_or_default();

        stats.win_rate_pct = stats.winning_trades as f64 / stats.total_trades as f64 * 100.0;
        stats.profit_factor = profit_factor(stats.gross_profit, stats.gross_loss);

        let win_rate = Decimal::from(stats.winning_trades) / total;
        let loss_rate = Decimal::from(stats.losing_trades) / total;
        stats.trade_expectancy = win_rate
            .checked_mul(stats.average_winning_trade)
            .zip(loss_rate.checked_mul(stats.average_losing_trade))
            .and_then(|(wins, losses)| wins.checked_add(losses))
            .unwrap_or_default();
    }

    /// Classifies each day by the sign of its summed P&L and counts day streaks.
    fn calculate_day_metrics(&self, days: &[DaySummary], stats: &mut TradeStats) {
        stats.logged_days = days.len();
        for day in days {
            if day.pnl > Decimal::ZERO {
                stats.winning_days += 1;
            } else if day.pnl < Decimal::ZERO {
                stats.losing_days += 1;
            } else {
                stats.break_even_days += 1;
            }
        }

        let day_streaks = longest_streaks(days.iter().map(|d| d.pnl));
        stats.max_consecutive_winning_days = day_streaks.max_wins;
        stats.max_consecutive_losing_days = day_streaks.max_losses;
    }
}

/// `sum / count`, or `None` when the sum is missing or there is nothing to average.
fn checked_mean(sum: Option<Decimal>, count: usize) -> Option<Decimal> {
    if count == 0 {
        return None;
    }
    sum?.checked_div(Decimal::from(count))
}

/// Gross profit over gross loss, with the sentinel for loss-free records.
pub fn profit_factor(gross_profit: Decimal, gross_loss: Decimal) -> f64 {
    if gross_loss > Decimal::ZERO {
        gross_profit
            .checked_div(gross_loss)
            .and_then(|ratio| ratio.to_f64())
            .unwrap_or(PROFIT_FACTOR_SENTINEL)
    } else if gross_profit > Decimal::ZERO {
        PROFIT_FACTOR_SENTINEL
    } else {
        0.0
    }
}
