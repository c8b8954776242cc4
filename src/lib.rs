//! # lazysource
//!
//! Lazy, re-openable sequences over character sources, with deterministic
//! release of every resource a read opens.
//!
//! ## Overview
//!
//! lazysource provides:
//! - **Re-openable sequences**: a `LazySequence` describes how to read, not what
//!   was read, so it can be read any number of times
//! - **Origins**: line-split, delimiter-split (regex or literal) and CSV
//!   sources over any `CharSource` (files, in-memory text, your own)
//! - **Pipelines**: `transform`, `filter` and `concat` build new sequences
//!   without opening anything
//! - **Resource ownership**: each iterator layer owns exactly one resource, so
//!   closing the outermost iterator releases the whole chain exactly once
//! - **Scoped reads**: `read_all` and `read_all_with` always close what they
//!   open, including on error paths
//! - **Pipeline configuration**: declare inputs in YAML/JSON/TOML files
//!
//! ## Quick Start
//!
//! ```rust
//! use lazysource::{InMemorySource, LazySequence};
//!
//! let rows = LazySequence::from_csv(InMemorySource::from_string("data", "a,b,c\n1,2,3\n2,3,4"))
//!     .filter(|row| row["a"].parse::<i32>().map(|a| a % 2 == 0).unwrap_or(false))
//!     .read_all()
//!     .unwrap();
//!
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0]["c"], "4");
//! ```
//!
//! ## Resource model
//!
//! - Opening happens only in `LazySequence::open` (and in the terminal reads that
//!   call it). Open failures are returned from there, never deferred.
//! - Read failures are yielded as `Err` items from the `next` call where
//!   they occur; transform and filter layers pass them through unchanged.
//! - `ClosingIterator::close` releases the chain and reports the first
//!   failure. A concatenation keeps releasing its remaining inputs after one
//!   of them fails.
//! - Everything is single-threaded and synchronous. "Lazy" means deferred
//!   until demanded, not concurrent.
//!
//! ## Features
//!
//! - `yaml` - Load `PipelineConfig` from YAML (enabled by default)
//! - `json` - Load `PipelineConfig` from JSON
//! - `toml` - Load `PipelineConfig` from TOML
//! - `miette` - Pretty error reporting with miette

// Core modules
pub mod config;
pub mod error;
pub mod io;
pub mod iter;
pub mod processor;
pub mod resource;
pub mod sequence;

// Re-exports for convenience
pub use config::{InputConfig, InputSpec, Layout, PipelineConfig, SourceKind};
pub use error::{SourceError, Stage};
pub use io::{CharSource, FileSource, InMemorySource};
pub use iter::{CloseableCursor, ClosingIterator, Decorator, Delimiter};
pub use processor::{Fold, SequenceProcessor};
pub use resource::{NoRelease, Release, ReleaseFn, release_fn};
pub use sequence::{ConcatAggregator, CsvRecord, LazySequence};

/// Build one sequence over every input of a PipelineConfig, in order.
///
/// Each input is split according to its layout and the results are
/// concatenated.
pub fn build_sequence_from_pipeline(
    config: &PipelineConfig,
) -> Result<LazySequence<String>, SourceError> {
    let specs = resolve_inputs(config)?;
    Ok(LazySequence::concat(specs.iter().map(InputSpec::sequence)))
}

/// Build one sequence of CSV records over every input of a PipelineConfig.
///
/// Each input is read as CSV with its own header row.
pub fn build_csv_sequence_from_pipeline(
    config: &PipelineConfig,
) -> Result<LazySequence<CsvRecord>, SourceError> {
    let specs = resolve_inputs(config)?;
    Ok(LazySequence::concat(specs.iter().map(InputSpec::csv_sequence)))
}

fn resolve_inputs(config: &PipelineConfig) -> Result<Vec<InputSpec>, SourceError> {
    config.inputs.iter().map(InputSpec::from_config).collect()
}

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::SourceDiagnostic;
