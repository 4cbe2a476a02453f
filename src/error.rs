//! Analysis error types.

use thiserror::Error;

use crate::Date;

/// Bar field named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarField {
    High,
    Low,
    Close,
    Volume,
}

impl std::fmt::Display for BarField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        };
        f.write_str(name)
    }
}

/// Errors that reject a bar series before any indicator runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// A price or volume is NaN or infinite.
    #[error("bar {index}: {field} is not a finite number ({value})")]
    NonFinite {
        index: usize,
        field: BarField,
        value: f64,
    },

    /// A close price of zero or below; percentage changes divide by it.
    #[error("bar {index}: close must be positive, got {value}")]
    NonPositiveClose { index: usize, value: f64 },

    /// Negative traded volume.
    #[error("bar {index}: volume must not be negative, got {value}")]
    NegativeVolume { index: usize, value: f64 },

    /// Bars are not oldest first.
    #[error("bar {index}: date {date} is earlier than the previous bar's {previous}")]
    OutOfOrder {
        index: usize,
        date: Date,
        previous: Date,
    },
}
