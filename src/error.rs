//! Error types for projection, input handling and pension estimation

use chrono::NaiveDate;
use thiserror::Error;

/// Problems with a `ProjectionInput` that stop a projection before it starts
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InputError {
    #[error("{field} must be a finite, non-negative amount (got {value})")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("{field} = {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} month {month} is not a calendar month (1-12)")]
    InvalidMonth { field: &'static str, month: u32 },

    #[error("at most {max} promotions may be configured (got {count})")]
    TooManyPromotions { count: usize, max: usize },
}

/// Failures of the projection driver
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProjectionError {
    #[error("retirement date {retirement_date} is not after {as_of}; nothing to project")]
    RetirementNotInFuture {
        retirement_date: NaiveDate,
        as_of: NaiveDate,
    },

    #[error("date of birth {date_of_birth} is outside {earliest}..={latest}")]
    InvalidDateOfBirth {
        date_of_birth: NaiveDate,
        earliest: NaiveDate,
        latest: NaiveDate,
    },

    #[error("date arithmetic overflowed while building the horizon from {0}")]
    DateOutOfRange(NaiveDate),

    #[error(transparent)]
    InvalidInput(#[from] InputError),
}

/// Failures (and the insufficient-history warning) of the pension estimator
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PensionError {
    #[error(
        "missing {missing_months} months of data for the {required}-month average \
         ({available} available between {window_start} and {window_end})"
    )]
    InsufficientHistory {
        required: usize,
        available: usize,
        missing_months: usize,
        window_start: NaiveDate,
        window_end: NaiveDate,
    },

    #[error("date of joining {date_of_joining} is after the {cutoff} cut-off")]
    JoinedAfterCutoff {
        date_of_joining: NaiveDate,
        cutoff: NaiveDate,
    },

    #[error("highest PF pay must be a finite, non-negative amount (got {0})")]
    InvalidPay(f64),

    #[error("date arithmetic overflowed for date of birth {0}")]
    DateOutOfRange(NaiveDate),
}

/// Errors raised while reading inputs, rules or promotion schedules from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Errors raised while writing a ledger export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write ledger CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush ledger CSV: {0}")]
    Io(#[from] std::io::Error),
}
