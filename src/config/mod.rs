//! Configuration types for declaring sequence inputs.
//!
//! This module provides:
//! - `PipelineConfig` / `InputConfig`: Deserializable pipeline description
//! - `InputSpec`: A resolved input (source plus layout)
//! - `SourceKind` / `Layout`: Parsed forms of the string fields

mod pipeline;
mod spec;

pub use pipeline::{InputConfig, PipelineConfig};
pub use spec::{InputSpec, Layout, SourceKind};
