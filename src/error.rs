//! Error types shared across the crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Missing value: {0}")]
    MissingValue(String),

    #[error("Ambiguous financing: specify either a downpayment or a loan amount, not both")]
    AmbiguousFinancing,

    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("Period {period} is outside the loan term of {term_months} months")]
    PeriodOutOfRange { period: u32, term_months: u32 },

    #[error("No prepayment entry for period {period} (table has {available} entries)")]
    PrepaymentOutOfRange { period: u32, available: usize },

    #[error("Non-finite value in {context}")]
    NonFinite { context: String },

    #[error("Value out of decimal range in {context}")]
    OutOfRange { context: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MortgageError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MortgageError>;
