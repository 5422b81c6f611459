// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown reporting period: '{0}' (expected all, daily, weekly or monthly)")]
    UnknownPeriod(String),

    #[error("Unknown trade side: '{0}'")]
    UnknownSide(String),
}

pub type Result<T> = std::result::Result<T, Error>;
