// In crates/export/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read or write sheet: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to access report file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Summary sheet is missing metric '{0}'")]
    MissingMetric(&'static str),

    #[error("Invalid value '{value}' for metric '{metric}': {reason}")]
    InvalidValue {
        metric: &'static str,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
