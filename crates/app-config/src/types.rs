// In crates/app-config/src/types.rs

use chrono::FixedOffset;
use core_types::Period;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// How statistics are computed.
    #[serde(default)]
    pub stats: StatsSettings,
    /// Where exported reports are written.
    #[serde(default)]
    pub export: ExportSettings,
    /// Polling behaviour of the `watch` command.
    #[serde(default)]
    pub watch: WatchSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct StatsSettings {
    #[serde(default)]
    pub default_period: Period,
    /// Offset from UTC, in minutes, that defines a calendar day.
    /// The host's time zone (including DST changes) is used when absent.
    pub utc_offset_minutes: Option<i32>,
}

impl StatsSettings {
    /// The configured fixed offset, or `None` when days follow the host's time zone.
    ///
    /// Also `None` if the configured value is outside +/- 24 hours; validation
    /// rejects such settings at load time.
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes?.checked_mul(60)?)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct WatchSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// Helper functions for serde defaults
fn default_environment() -> String { "development".into() }
fn default_log_level() -> String { "info".into() }
fn default_output_dir() -> PathBuf { PathBuf::from("reports") }
fn default_interval_secs() -> u64 { 30 }
