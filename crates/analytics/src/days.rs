// In crates/analytics/src/days.rs

use crate::types::DaySummary;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use core_types::TradeRecord;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// The time zone that defines a "calendar day".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayClock {
    /// The host's time zone, resolved per instant so DST changes are honoured.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl DayClock {
    pub fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        match self {
            DayClock::Local => at.with_timezone(&Local).date_naive(),
            DayClock::Fixed(offset) => at.with_timezone(offset).date_naive(),
        }
    }
}

/// The local calendar day a trade belongs to, keyed on its entry date.
pub fn day_key(trade: &TradeRecord, clock: DayClock) -> NaiveDate {
    clock.date_of(trade.entry_date)
}

/// Groups trades by local calendar day, oldest day first.
///
/// A day (or running total) whose sum overflows `Decimal` saturates instead of
/// panicking; such magnitudes are far outside any real trade log.
pub fn group_by_day(trades: &[&TradeRecord], clock: DayClock) -> Vec<DaySummary> {
    let mut by_day: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();
    for trade in trades {
        let entry = by_day.entry(day_key(trade, clock)).or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(trade.pnl);
        entry.1 += 1;
    }

    let mut cumulative_pnl = Decimal::ZERO;
    by_day
        .into_iter()
        .map(|(date, (pnl, trade_count))| {
            cumulative_pnl = cumulative_pnl.saturating_add(pnl);
            DaySummary {
                date,
                pnl,
                trade_count,
                cumulative_pnl,
            }
        })
        .collect()
}
