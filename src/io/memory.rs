//! In-memory character source.

use std::io::{self, BufRead, Cursor, Read};
use std::sync::Arc;

use super::CharSource;

/// In-memory character source.
///
/// The content is shared between clones and every open gets its own cursor.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    id: String,
    data: Arc<Vec<u8>>,
}

impl InMemorySource {
    /// Create a new in-memory source with the given data.
    pub fn new(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            data: Arc::new(data),
        }
    }

    /// Create a new in-memory source from a string.
    pub fn from_string(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(id, data.into().into_bytes())
    }

    /// Length of the content in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl CharSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn open_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(SharedBytes(self.data.clone()))))
    }

    fn open_buffered(&self) -> io::Result<Box<dyn BufRead + Send>> {
        // Cursor is already buffered.
        Ok(Box::new(Cursor::new(SharedBytes(self.data.clone()))))
    }
}

/// Borrowable view over the shared content so opening never copies it.
#[derive(Debug, Clone)]
struct SharedBytes(Arc<Vec<u8>>);

impl AsRef<[u8]> for SharedBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}
