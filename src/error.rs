//! Crate-wide error type.
//!
//! Only two classes ever reach a caller: out-of-range bit construction (a caller
//! bug, always mask first) and unit-conversion input that is not a number.
//! Persistence errors are produced here too, but the progress store logs and
//! absorbs them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("value {value} does not fit in {width} bits")]
    BitRange { value: u32, width: usize },

    #[error("invalid bit string: {0:?}")]
    InvalidBits(String),

    #[error("Please enter a valid number (got {0:?})")]
    InvalidNumber(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
