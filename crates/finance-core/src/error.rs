use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the finance dashboard crates.
#[derive(Error, Debug)]
pub enum FinanceError {
    /// The data file is missing, unreadable, or does not have the expected
    /// shape (required columns absent).
    #[error("Data unavailable ({path}): {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    /// A month-key is malformed or not part of the loaded table.
    #[error("Invalid month key: {0}")]
    InvalidMonthKey(String),

    /// A type label is not one of income / expense / savings.
    #[error("Invalid transaction type: {0}")]
    InvalidTransactionType(String),
}

impl FinanceError {
    /// Build a [`FinanceError::DataUnavailable`] for `path`.
    pub fn data_unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// `true` for errors that mean the data file cannot be used at all.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }
}

/// Convenience alias used throughout the finance crates.
pub type Result<T> = std::result::Result<T, FinanceError>;
