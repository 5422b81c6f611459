// In crates/analytics/src/streaks.rs

use rust_decimal::Decimal;

/// Longest runs of consecutive positive and negative results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakSummary {
    pub max_wins: usize,
    pub max_losses: usize,
}

/// Counts the longest winning and losing runs in a chronological sequence.
///
/// A positive value extends the win streak and resets the loss streak, a
/// negative value does the opposite, and a zero resets both.
pub fn longest_streaks<I>(results: I) -> StreakSummary
where
    I: IntoIterator<Item = Decimal>,
{
    let mut summary = StreakSummary::default();
    let mut current_wins = 0usize;
    let mut current_losses = 0usize;

    for value in results {
        if value > Decimal::ZERO {
            current_wins += 1;
            current_losses = 0;
        } else if value < Decimal::ZERO {
            current_losses += 1;
            current_wins = 0;
        } else {
            current_wins = 0;
            current_losses = 0;
        }

        summary.max_wins = summary.max_wins.max(current_wins);
        summary.max_losses = summary.max_losses.max(current_losses);
    }

    summary
}
