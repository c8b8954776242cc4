//! Error types for lazy sequences.
//!
//! This module provides:
//! - `Stage`: Indicates where an I/O failure happened in a sequence's lifetime
//! - `SourceError`: Every failure a sequence can surface, from opening an
//!   origin to releasing it

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Error while opening the origin stream
    Open,
    /// Error while advancing an opened iterator
    Read,
    /// Error while releasing an owned resource
    Release,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Open => write!(f, "Open"),
            Stage::Read => write!(f, "Read"),
            Stage::Release => write!(f, "Release"),
        }
    }
}

/// Errors surfaced by sequences, iterators and resource handles.
#[derive(Debug, Error)]
pub enum SourceError {
    /// I/O failure while opening, reading or releasing a resource
    #[error("[{stage}] {target}: {source}")]
    Io {
        /// Stage where the error occurred
        stage: Stage,
        /// Identifier of the resource (source id, "concat", ...)
        target: String,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// A CSV data row does not have as many fields as the header row
    #[error(
        "csv header and value size not matched at line {line}: expected {expected} field(s), found {found} {values:?}"
    )]
    ShapeMismatch {
        /// 1-based line number of the offending row
        line: usize,
        /// Number of header fields
        expected: usize,
        /// Number of fields in the row
        found: usize,
        /// The row's values
        values: Vec<String>,
    },

    /// The delimiter pattern is not a valid regular expression
    #[error("Invalid delimiter pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Programming error: the API was used out of order
    #[error("Illegal state: {0}")]
    IllegalState(&'static str),

    /// Invalid pipeline configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Failure raised by caller-supplied mapping code
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl SourceError {
    pub fn open(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::io(Stage::Open, target, source)
    }

    pub fn read(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::io(Stage::Read, target, source)
    }

    pub fn release(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::io(Stage::Release, target, source)
    }

    /// Wrap an arbitrary error raised by a mapping function.
    pub fn other(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        SourceError::Other(error.into())
    }

    fn io(stage: Stage, target: impl Into<String>, source: std::io::Error) -> Self {
        SourceError::Io {
            stage,
            target: target.into(),
            source,
        }
    }

    /// The I/O stage this error belongs to, if it is an I/O error.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SourceError::Io { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Whether this error signals API misuse rather than a data or I/O problem.
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, SourceError::IllegalState(_))
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
