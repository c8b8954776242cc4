//! File-backed character source.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use super::CharSource;

/// Character source reading from a file.
///
/// Every open re-opens the file, so the file's current content is read.
#[derive(Debug, Clone)]
pub struct FileSource {
    id: String,
    path: PathBuf,
}

impl FileSource {
    /// Create a new file source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path.to_string_lossy().into_owned();
        Self { id, path }
    }

    /// Get the file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CharSource for FileSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn open_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(file))
    }
}
