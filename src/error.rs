// ============================================================================
// Errors
// Failures at the batch boundary (files, parsing, configuration)
// ============================================================================

use crate::domain::AccountId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the CSV adapter and configuration layer.
///
/// The matching core itself has no error paths: a non-matching order is a
/// normal outcome, not a failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Opening or creating a file failed
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited reader or writer failed
    #[error("csv failure on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A field could not be parsed (strict mode only)
    #[error("line {line}: invalid {field} value {value:?}")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },

    /// A record had too few columns (strict mode only)
    #[error("line {line}: missing {field} column")]
    MissingField { line: u64, field: &'static str },

    /// Delimiter must be a single ASCII character
    #[error("delimiter {0:?} is not a single-byte ASCII character")]
    InvalidDelimiter(char),

    /// A trade would push an account figure out of range; nothing was applied
    #[error("settlement overflow on account {account}")]
    SettlementOverflow { account: AccountId },

    /// Order state machine was driven through an illegal edge
    #[error("invalid order state transition from {from} via {via}")]
    InvalidTransition { from: String, via: String },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
