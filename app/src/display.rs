// In app/src/display.rs

use analytics::{PROFIT_FACTOR_SENTINEL, TradeStats};
use comfy_table::{Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

/// Builds the summary table shown by `stats` and `watch`.
pub fn stats_table(stats: &TradeStats) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);

    let profit_factor = if stats.profit_factor >= PROFIT_FACTOR_SENTINEL {
        "no losses".to_string()
    } else {
        format!("{:.2}", stats.profit_factor)
    };

    let rows: Vec<(&str, String)> = vec![
        ("Period", stats.period.to_string()),
        (
            "Trades",
            format!("{} of {}", stats.total_trades, stats.unfiltered_trades),
        ),
        (
            "Won / Lost / Break-even",
            format!(
                "{} / {} / {}",
                stats.winning_trades, stats.losing_trades, stats.break_even_trades
            ),
        ),
        ("Win rate", format!("{:.2}%", stats.win_rate_pct)),
        ("Total P&L", money(stats.total_pnl)),
        ("Gross profit / loss", format!("{} / {}", money(stats.gross_profit), money(stats.gross_loss))),
        ("Average winner", money(stats.average_winning_trade)),
        ("Average loser", money(stats.average_losing_trade)),
        ("Average trade", money(stats.average_trade_pnl)),
        ("Largest win / loss", format!("{} / {}", money(stats.largest_win), money(stats.largest_loss))),
        ("Profit factor", profit_factor),
        ("Expectancy", money(stats.trade_expectancy)),
        (
            "Days (won / lost / flat)",
            format!(
                "{} ({} / {} / {})",
                stats.logged_days, stats.winning_days, stats.losing_days, stats.break_even_days
            ),
        ),
        (
            "Max consecutive wins / losses",
            format!("{} / {}", stats.max_consecutive_wins, stats.max_consecutive_losses),
        ),
        (
            "Max consecutive winning / losing days",
            format!(
                "{} / {}",
                stats.max_consecutive_winning_days, stats.max_consecutive_losing_days
            ),
        ),
        (
            "Max drawdown",
            format!("{} ({:.2}%)", money(stats.max_drawdown), stats.max_drawdown_percentage),
        ),
        (
            "Average drawdown",
            format!("{} ({:.2}%)", money(stats.average_drawdown), stats.average_drawdown_percentage),
        ),
        ("Avg hold (all)", minutes(stats.average_hold_time_all)),
        ("Avg hold (winners)", minutes(stats.average_hold_time_winning)),
        ("Avg hold (losers)", minutes(stats.average_hold_time_losing)),
    ];

    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }
    table
}

/// Builds the per-day equity table.
pub fn daily_table(stats: &TradeStats) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Date", "Trades", "P&L", "Cumulative"]);

    for day in &stats.daily {
        table.add_row(vec![
            day.date.format("%Y-%m-%d").to_string(),
            day.trade_count.to_string(),
            money(day.pnl),
            money(day.cumulative_pnl),
        ]);
    }
    table
}

fn money(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

fn minutes(value: f64) -> String {
    if value <= 0.0 {
        return "-".into();
    }
    let total = value.round() as i64;
    match (total / 60, total % 60) {
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h {m:02}m"),
    }
}
