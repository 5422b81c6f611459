use analytics::{PROFIT_FACTOR_SENTINEL, StatsEngine, TradeStats};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use core_types::{Period, TradeRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn engine() -> StatsEngine {
    StatsEngine::with_offset(FixedOffset::east_opt(0).unwrap())
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 5, 9, 0, 0).unwrap()
}

/// One trade every six hours, 45 minutes long.
fn log(pnls: &[Decimal]) -> Vec<TradeRecord> {
    pnls.iter()
        .enumerate()
        .map(|(i, pnl)| {
            let entry = start() + Duration::hours(6 * i as i64);
            TradeRecord::new(entry, *pnl).with_exit(entry + Duration::minutes(45))
        })
        .collect()
}

fn assert_partitions(stats: &TradeStats) {
    assert_eq!(
        stats.winning_trades + stats.losing_trades + stats.break_even_trades,
        stats.total_trades
    );
    assert_eq!(
        stats.winning_days + stats.losing_days + stats.break_even_days,
        stats.logged_days
    );
}

#[test]
fn test_scenario_a_counts_and_streaks() {
    let trades = log(&[dec!(100), dec!(-50), dec!(100), dec!(100), dec!(-200)]);
    let stats = engine().compute_stats(&trades, Period::All);

    assert_eq!(stats.winning_trades, 3);
    assert_eq!(stats.losing_trades, 2);
    assert_eq!(stats.break_even_trades, 0);
    assert_eq!(stats.total_pnl, dec!(50));
    assert_eq!(stats.max_consecutive_wins, 2);
    assert_eq!(stats.max_consecutive_losses, 1);
    assert_partitions(&stats);
}

#[test]
fn test_scenario_b_drawdown_above_one_hundred_percent() {
    // Cumulative balances: 100, 50, 150, 50, -50
    let trades = log(&[dec!(100), dec!(-50), dec!(100), dec!(-100), dec!(-100)]);
    let stats = engine().compute_stats(&trades, Period::All);

    assert_eq!(stats.max_drawdown, dec!(200));
    assert!((stats.max_drawdown_percentage - 133.333_333_333).abs() < 1e-6);
}

#[test]
fn test_scenario_c_empty_log_for_every_period() {
    for period in Period::ALL {
        let stats = engine().compute_stats(&[], period);
        assert_eq!(stats, TradeStats::new(period));
        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.total_pnl, Decimal::ZERO);
        assert_eq!(stats.profit_factor, 0.0);
    }
}

#[test]
fn test_empty_window_keeps_unfiltered_count() {
    let trades = log(&[dec!(10), dec!(-5)]);
    let far_future = start() + Duration::days(365);

    let stats = engine().compute_stats_at(&trades, Period::Weekly, far_future);

    assert_eq!(stats.total_trades, 0);
    assert_eq!(stats.unfiltered_trades, 2);
    assert_eq!(stats.logged_days, 0);
}

#[test]
fn test_scenario_d_single_break_even_trade() {
    let trades = log(&[dec!(0)]);
    let stats = engine().compute_stats(&trades, Period::All);

    assert_eq!(stats.break_even_trades, 1);
    assert_eq!(stats.max_consecutive_wins, 0);
    assert_eq!(stats.max_consecutive_losses, 0);
    assert_eq!(stats.break_even_days, 1);
    assert_eq!(stats.profit_factor, 0.0);
    assert_partitions(&stats);
}

#[test]
fn test_profit_factor_sentinel_without_losses() {
    let trades = log(&[dec!(10), dec!(0), dec!(25)]);
    let stats = engine().compute_stats(&trades, Period::All);
    assert_eq!(stats.profit_factor, PROFIT_FACTOR_SENTINEL);
    assert_eq!(stats.average_losing_trade, Decimal::ZERO);
}

#[test]
fn test_idempotent() {
    let trades = log(&[dec!(12.5), dec!(-3), dec!(0), dec!(7.25), dec!(-40), dec!(41)]);
    let now = start() + Duration::days(2);

    for period in Period::ALL {
        let first = engine().compute_stats_at(&trades, period, now);
        let second = engine().compute_stats_at(&trades, period, now);
        assert_eq!(first, second);
        assert_eq!(
            first.max_drawdown_percentage.to_bits(),
            second.max_drawdown_percentage.to_bits()
        );
        assert_partitions(&first);
    }
}

#[test]
fn test_drawdown_bounded_while_balance_stays_positive() {
    let trades = log(&[
        dec!(100),
        dec!(-30),
        dec!(80),
        dec!(-60),
        dec!(-20),
        dec!(45),
        dec!(-70),
    ]);
    let stats = engine().compute_stats(&trades, Period::All);

    assert!(stats.max_drawdown >= Decimal::ZERO);
    assert!(stats.max_drawdown_percentage >= 0.0);
    assert!(stats.max_drawdown_percentage <= 100.0);
    assert!(stats.average_drawdown_percentage <= stats.max_drawdown_percentage);
    assert!(stats.average_drawdown <= stats.max_drawdown);
}

#[test]
fn test_hold_times_from_entry_exit() {
    let trades = log(&[dec!(5), dec!(-5), dec!(5)]);
    let stats = engine().compute_stats(&trades, Period::All);

    assert_eq!(stats.average_hold_time_all, 45.0);
    assert_eq!(stats.average_hold_time_winning, 45.0);
    assert_eq!(stats.average_hold_time_losing, 45.0);
}

#[test]
fn test_malformed_dates_only_affect_hold_time() {
    let mut trades = log(&[dec!(20), dec!(-10)]);
    trades[1].exit_date = None;
    trades[1].first_fill_time = Some("garbage".into());
    trades[1].last_fill_time = Some("2024-02-05 16:00:00".into());

    let stats = engine().compute_stats(&trades, Period::All);

    assert_eq!(stats.total_trades, 2);
    assert_eq!(stats.total_pnl, dec!(10));
    assert_eq!(stats.max_consecutive_losses, 1);
    assert_eq!(stats.average_hold_time_all, 45.0);
    assert_eq!(stats.average_hold_time_losing, 0.0);
}
