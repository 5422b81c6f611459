// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, ExportSettings, Settings, StatsSettings, WatchSettings};

/// Loads the application settings from the `config/` directory.
///
/// See [`load_settings_from`] for the layering rules.
pub fn load_settings() -> Result<Settings> {
    load_settings_from("config")
}

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file, if present.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
///
/// Every value has a default, so an empty directory yields usable settings.
pub fn load_settings_from(dir: impl AsRef<Path>) -> Result<Settings> {
    let dir = dir.as_ref();
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::with_name(&dir.join("base").to_string_lossy()).required(false))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&dir.join(&environment).to_string_lossy()).required(false))
        // 3. Load settings from environment variables (e.g., `APP_STATS__DEFAULT_PERIOD=weekly`).
        // The prefix is `APP`, separator is `__`.
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;
    validate(&settings)?;

    Ok(settings)
}

fn validate(settings: &Settings) -> Result<()> {
    if settings.stats.utc_offset_minutes.is_some() && settings.stats.fixed_offset().is_none() {
        return Err(Error::InvalidValue {
            key: "stats.utc_offset_minutes",
            reason: format!(
                "{:?} is outside the +/-1440 minute range",
                settings.stats.utc_offset_minutes
            ),
        });
    }
    if settings.watch.interval_secs == 0 {
        return Err(Error::InvalidValue {
            key: "watch.interval_secs",
            reason: "must be at least 1 second".into(),
        });
    }
    Ok(())
}
