//! Character sources sequences read from.
//!
//! This module provides:
//! - `CharSource`: Trait for re-openable character sources
//! - `FileSource`: Source backed by a file on disk
//! - `InMemorySource`: Source backed by shared bytes, handy for tests

mod memory;
mod source;
mod std_io;

pub use memory::InMemorySource;
pub use source::CharSource;
pub use std_io::FileSource;
