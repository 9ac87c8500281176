//! Error types for the numeral core.

use thiserror::Error;

/// An integer that cannot be rendered with the active convention.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("negative values cannot be rendered, got {value}")]
    Negative { value: i64 },

    #[error("value {value} exceeds the largest supported magnitude {max}")]
    TooLarge { value: u64, max: u64 },

    #[error("band {scale_index} has no scale word with multiplier 1000^{scale_index}")]
    MissingScale { scale_index: usize },
}

/// A phrase that does not describe a number.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("phrase contains no numeric word")]
    NoNumericToken,

    #[error("unrecognised word {token:?} at position {position}")]
    UnknownToken { token: String, position: usize },

    #[error("word {token:?} at position {position} is out of order: {reason}")]
    InvalidOrder {
        token: String,
        position: usize,
        reason: &'static str,
    },

    #[error("scale word {token:?} at position {position} does not agree with count {count}")]
    ScaleCount {
        token: String,
        position: usize,
        count: u64,
    },

    #[error("phrase value overflows a 64-bit integer")]
    Overflow,
}

/// Failure loading or validating a [`NumeralConvention`](crate::NumeralConvention).
#[derive(Debug, Error)]
pub enum ConventionError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid convention: {reason}")]
    Invalid { reason: String },
}

impl ConventionError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}
