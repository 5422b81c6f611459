// In crates/analytics/src/drawdown.rs

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Peak-to-trough drawdown figures over a cumulative balance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawdownSummary {
    pub max_amount: Decimal,
    pub max_percentage: f64,
    pub average_amount: Decimal,
    pub average_percentage: f64,
    /// Number of times a deeper trough was registered below a positive peak.
    pub events: usize,
}

/// Tracks drawdown over a running balance that starts at zero.
///
/// A drawdown event is registered each time the balance sets a new trough
/// below the most recent peak, as long as that peak is positive. The trough
/// resets to the peak whenever a new peak is made. Percentages are relative
/// to the peak and are not clamped: a balance that falls below zero after a
/// positive peak yields more than 100%.
///
/// If the running balance overflows `Decimal`, tracking stops and the events
/// registered so far are kept.
#[derive(Debug, Default)]
pub struct DrawdownTracker {
    balance: Decimal,
    peak: Decimal,
    trough: Decimal,
    overflowed: bool,
    max_amount: Decimal,
    max_percentage: f64,
    amounts: Vec<Decimal>,
    percentages: Vec<f64>,
}

impl DrawdownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the P&L of the next trade in chronological order.
    pub fn push(&mut self, pnl: Decimal) {
        if self.overflowed {
            return;
        }
        let Some(balance) = self.balance.checked_add(pnl) else {
            tracing::warn!(balance = %self.balance, %pnl, "Running balance overflowed; drawdown tracking stopped.");
            self.overflowed = true;
            return;
        };
        self.balance = balance;

        if self.balance > self.peak {
            self.peak = self.balance;
            self.trough = self.balance;
        } else if self.balance < self.trough {
            self.trough = self.balance;
            if self.peak > Decimal::ZERO {
                self.register();
            }
        }
    }

    fn register(&mut self) {
        let Some(amount) = self.peak.checked_sub(self.trough) else {
            tracing::warn!(peak = %self.peak, trough = %self.trough, "Drawdown amount overflowed; event skipped.");
            return;
        };
        let percentage = percent_of(amount, self.peak);

        tracing::trace!(
            peak = %self.peak,
            trough = %self.trough,
            %amount,
            percentage,
            "Registered drawdown."
        );

        if amount > self.max_amount {
            self.max_amount = amount;
        }
        if percentage > self.max_percentage {
            self.max_percentage = percentage;
        }
        self.amounts.push(amount);
        self.percentages.push(percentage);
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn finish(self) -> DrawdownSummary {
        let events = self.amounts.len();
        if events == 0 {
            return DrawdownSummary::default();
        }

        let count = Decimal::from(events);
        let average_amount = self
            .amounts
            .iter()
            .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(*amount))
            .and_then(|sum| sum.checked_div(count))
            .unwrap_or_else(|| {
                self.amounts
                    .iter()
                    .fold(Decimal::ZERO, |sum, amount| sum.saturating_add(*amount / count))
            });
        let average_percentage = self.percentages.iter().sum::<f64>() / events as f64;

        DrawdownSummary {
            max_amount: self.max_amount,
            max_percentage: self.max_percentage,
            average_amount,
            average_percentage,
            events,
        }
    }
}

/// `amount` as a percentage of `peak`. Ratios beyond `Decimal` range fall back
/// to floating point.
fn percent_of(amount: Decimal, peak: Decimal) -> f64 {
    amount
        .checked_div(peak)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.to_f64())
        .or_else(|| {
            let pct = amount.to_f64()? / peak.to_f64()? * 100.0;
            pct.is_finite().then_some(pct)
        })
        .unwrap_or(0.0)
}

/// Runs a [`DrawdownTracker`] over a chronological sequence of trade P&Ls.
pub fn measure_drawdown<I>(pnls: I) -> DrawdownSummary
where
    I: IntoIterator<Item = Decimal>,
{
    let mut tracker = DrawdownTracker::new();
    for pnl in pnls {
        tracker.push(pnl);
    }
    tracker.finish()
}
