//! # Trade Statistics Engine
//!
//! Turns a chronological trade log into a [`TradeStats`] summary: P&L and
//! win/loss distribution, day-level results, streaks, peak-to-trough drawdown,
//! hold times and expectancy.
//!
//! The engine is a pure, synchronous calculator. It never mutates its input,
//! keeps no state between calls and never returns an error; metrics that
//! cannot be derived from the data degrade to zero.

pub mod days;
pub mod drawdown;
pub mod engine;
pub mod hold_time;
pub mod streaks;
pub mod types;

pub use days::DayClock;
pub use engine::{PROFIT_FACTOR_SENTINEL, StatsEngine, profit_factor};
pub use hold_time::hold_minutes;
pub use types::{DaySummary, TradeStats};
