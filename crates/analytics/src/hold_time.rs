// In crates/analytics/src/hold_time.rs

use core_types::{HoldTimeSource, TradeRecord, parse_hold_time, parse_timestamp};

/// Average hold times in minutes. Zero means "no measurable trades".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoldTimeSummary {
    pub all: f64,
    pub winning: f64,
    pub losing: f64,
    /// Trades that contributed to `all`.
    pub measured: usize,
}

/// Resolves how long a trade was held, in minutes.
///
/// Sources are tried in order: the explicit duration fields, then
/// `exit_date - entry_date`, then the fill timestamps. A source that is
/// missing, malformed, zero or negative falls through to the next one.
pub fn hold_minutes(trade: &TradeRecord) -> Option<(f64, HoldTimeSource)> {
    explicit_minutes(trade)
        .map(|m| (m, HoldTimeSource::Explicit))
        .or_else(|| entry_exit_minutes(trade).map(|m| (m, HoldTimeSource::EntryExit)))
        .or_else(|| fill_minutes(trade).map(|m| (m, HoldTimeSource::Fills)))
}

fn explicit_minutes(trade: &TradeRecord) -> Option<f64> {
    let from_seconds = trade
        .duration_seconds
        .filter(|s| s.is_finite() && *s > 0.0)
        .map(|s| s / 60.0);

    from_seconds.or_else(|| trade.hold_time.as_deref().and_then(parse_hold_time))
}

fn entry_exit_minutes(trade: &TradeRecord) -> Option<f64> {
    let exit = trade.exit_date?;
    positive_minutes((exit - trade.entry_date).num_milliseconds())
}

fn fill_minutes(trade: &TradeRecord) -> Option<f64> {
    let first = parse_timestamp(trade.first_fill_time.as_deref()?)?;
    let last = parse_timestamp(trade.last_fill_time.as_deref()?)?;
    positive_minutes((last - first).num_milliseconds())
}

fn positive_minutes(millis: i64) -> Option<f64> {
    (millis > 0).then(|| millis as f64 / 60_000.0)
}

/// Averages hold times across all, winning and losing trades.
///
/// Trades without a usable duration are left out of every average rather than
/// being counted as zero.
pub fn average_hold_times(trades: &[&TradeRecord]) -> HoldTimeSummary {
    let mut all = Vec::with_capacity(trades.len());
    let mut winning = Vec::new();
    let mut losing = Vec::new();

    for trade in trades {
        let Some((minutes, source)) = hold_minutes(trade) else {
            tracing::trace!(entry_date = %trade.entry_date, "Trade has no usable hold time.");
            continue;
        };
        tracing::trace!(entry_date = %trade.entry_date, minutes, ?source, "Resolved hold time.");

        all.push(minutes);
        if trade.is_win() {
            winning.push(minutes);
        } else if trade.is_loss() {
            losing.push(minutes);
        }
    }

    HoldTimeSummary {
        all: mean(&all),
        winning: mean(&winning),
        losing: mean(&losing),
        measured: all.len(),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
