use std::path::PathBuf;

use thiserror::Error;

use crate::record::Label;

pub type Result<T> = std::result::Result<T, BayesError>;

/// Why a single line could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("expected {expected} fields, found {actual}")]
    TokenCount { expected: usize, actual: usize },

    #[error("field {index} is not a number: {token:?}")]
    InvalidNumber { index: usize, token: String },

    #[error("field {index} has an invalid frequency: {value}")]
    InvalidFrequency { index: usize, value: f64 },

    #[error("field {index} is not valid UTF-8")]
    InvalidUtf8 { index: usize },

    #[error("label must be 0 (spam) or 1 (ham), got {0:?}")]
    InvalidLabel(String),
}

#[derive(Error, Debug)]
pub enum BayesError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot open corpus {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record at line {line}")]
    Malformed {
        line: u64,
        #[source]
        source: RecordError,
    },

    #[error("vector length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("training set has no {0} records")]
    EmptyClass(Label),

    #[error("{0} word totals cannot be turned into finite log-probabilities")]
    DegenerateClass(Label),

    #[error("log ratio is undefined for this record")]
    UndefinedScore,
}
