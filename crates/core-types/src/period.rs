// In crates/core-types/src/period.rs

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The reporting window a statistics computation is restricted to.
///
/// `Weekly` and `Monthly` are rolling windows (the last 7 / 30 days counted back
/// from "now"), not calendar weeks or months. `Daily` is the current local
/// calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::All, Period::Daily, Period::Weekly, Period::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::All => "all",
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }

    /// Length of the rolling window in days, if this period is a rolling window.
    pub fn rolling_days(&self) -> Option<i64> {
        match self {
            Period::Weekly => Some(7),
            Period::Monthly => Some(30),
            Period::All | Period::Daily => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Period::All),
            "daily" | "today" | "day" => Ok(Period::Daily),
            "weekly" | "week" => Ok(Period::Weekly),
            "monthly" | "month" => Ok(Period::Monthly),
            other => Err(Error::UnknownPeriod(other.to_string())),
        }
    }
}
