// In crates/core-types/src/trade.rs

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The direction of a closed trade. Informational only; statistics never read it.
///
/// Deserializes through [`FromStr`], so any casing of `long`/`buy` and
/// `short`/`sell` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => f.write_str("long"),
            Side::Short => f.write_str("short"),
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" | "buy" => Ok(Side::Long),
            "short" | "sell" => Ok(Side::Short),
            other => Err(Error::UnknownSide(other.to_string())),
        }
    }
}

/// One closed trade as supplied by the journal.
///
/// Records are never mutated by the statistics engine. The duration-related
/// fields are all optional because different brokers export different subsets
/// of them; `hold_time` and the fill timestamps are kept as raw text and only
/// parsed when a hold-time metric is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub entry_date: DateTime<Utc>,
    #[serde(default)]
    pub exit_date: Option<DateTime<Utc>>,
    pub pnl: Decimal,

    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Option<Side>,

    /// Explicit duration in seconds.
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    /// Explicit duration as text, e.g. `01:30:00`, `45`, `90s`, `2h`.
    #[serde(default)]
    pub hold_time: Option<String>,

    // Alternate timestamp pair, e.g. first/last fill reported by the exchange.
    #[serde(default)]
    pub first_fill_time: Option<String>,
    #[serde(default)]
    pub last_fill_time: Option<String>,
}

impl TradeRecord {
    /// Creates a record with only the required fields set.
    pub fn new(entry_date: DateTime<Utc>, pnl: Decimal) -> Self {
        Self {
            entry_date,
            exit_date: None,
            pnl,
            symbol: None,
            side: None,
            duration_seconds: None,
            hold_time: None,
            first_fill_time: None,
            last_fill_time: None,
        }
    }

    pub fn with_exit(mut self, exit_date: DateTime<Utc>) -> Self {
        self.exit_date = Some(exit_date);
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn is_win(&self) -> bool {
        self.pnl > Decimal::ZERO
    }

    pub fn is_loss(&self) -> bool {
        self.pnl < Decimal::ZERO
    }

    pub fn is_break_even(&self) -> bool {
        self.pnl.is_zero()
    }
}

/// Where a trade's hold time was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldTimeSource {
    /// `duration_seconds` or `hold_time`.
    Explicit,
    /// `exit_date - entry_date`.
    EntryExit,
    /// `last_fill_time - first_fill_time`.
    Fills,
}

/// Parses a free-text duration into minutes.
///
/// Accepts `HH:MM:SS`, `MM:SS`, a bare number (minutes) or a number followed by
/// a unit (`s`, `sec`, `m`, `min`, `h`, `hr`). Returns `None` for anything that
/// does not describe a strictly positive, finite duration.
pub fn parse_hold_time(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let minutes = if text.contains(':') {
        let parts: Vec<f64> = text
            .split(':')
            .map(|p| p.trim().parse::<f64>().ok().filter(|v| *v >= 0.0))
            .collect::<Option<Vec<_>>>()?;
        match parts.as_slice() {
            [h, m, s] => h * 60.0 + m + s / 60.0,
            [m, s] => m + s / 60.0,
            _ => return None,
        }
    } else {
        let lower = text.to_ascii_lowercase();
        let split_at = lower
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(lower.len());
        let (number, unit) = lower.split_at(split_at);
        let value: f64 = number.trim().parse().ok()?;
        match unit.trim() {
            "" | "m" | "min" | "mins" | "minutes" => value,
            "s" | "sec" | "secs" | "seconds" => value / 60.0,
            "h" | "hr" | "hrs" | "hours" => value * 60.0,
            _ => return None,
        }
    };

    (minutes.is_finite() && minutes > 0.0).then_some(minutes)
}

/// Parses a raw timestamp as exported by brokers.
///
/// Supports RFC 3339, `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` with
/// optional fractional seconds (read as UTC), and integer epoch values (milliseconds when longer than ten digits,
/// seconds otherwise).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if text.chars().all(|c| c.is_ascii_digit()) {
        let value: i64 = text.parse().ok()?;
        return if text.len() > 10 {
            Utc.timestamp_millis_opt(value).single()
        } else {
            Utc.timestamp_opt(value, 0).single()
        };
    }

    tracing::trace!(raw = text, "Unrecognised timestamp format.");
    None
}
