// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
