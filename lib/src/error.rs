//! All kinds of errors in this crate.

use ca_rules::ParseRuleError;
use displaydoc::Display;
use std::{io, path::PathBuf};
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Invalid configuration: {0}
    InvalidFormat(#[from] FormatError),
    /// Unable to write {path:?}: {source}
    IoFailure {
        /// The destination that could not be written.
        path: PathBuf,
        source: io::Error,
    },
    /// Invalid rule: {0:?}.
    ParseRuleError(#[from] ParseRuleError),
    /// Only the standard rule B3/S23 is supported, got {0:?}.
    UnsupportedRule(String),
}

/// Reasons why an initial configuration or a snapshot cannot be read.
#[derive(Debug, Display, Error)]
pub enum FormatError {
    /// unable to open {path:?}: {source}
    Open { path: PathBuf, source: io::Error },
    /// unable to read the source: {0}
    Read(#[source] io::Error),
    /// the dimensions are missing.
    MissingDimensions,
    /// {0:?} is not an integer.
    InvalidToken(String),
    /// rows and columns should be positive, got {rows}x{cols}.
    NonPositive { rows: i64, cols: i64 },
    /// a {rows}x{cols} grid is too large.
    TooLarge { rows: usize, cols: usize },
    /// expected {expected} cells, found {found}.
    MissingCells { expected: usize, found: usize },
    /// unexpected header line {0:?}.
    InvalidHeader(String),
}

impl Error {
    /// Whether the error comes from a malformed or unreadable source.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Error::InvalidFormat(_))
    }
}
