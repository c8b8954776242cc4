//! Character source trait definition.

use std::fmt::Debug;
use std::io::{BufRead, BufReader, Read};

/// Trait for re-openable character sources.
///
/// A source is the origin every sequence ultimately reads from. Each call to
/// [`open_stream`](CharSource::open_stream) or
/// [`open_buffered`](CharSource::open_buffered) must return a fresh stream
/// positioned at the beginning, so the same source can back any number of
/// reads.
///
/// Whether two streams may be open at the same time is up to the
/// implementation. The sources shipped with this crate allow it.
pub trait CharSource: Send + Sync + Debug {
    /// Returns a unique identifier for this source.
    ///
    /// This is used for error messages and logging.
    fn id(&self) -> &str;

    /// Open and return a new forward-only character stream.
    fn open_stream(&self) -> std::io::Result<Box<dyn Read + Send>>;

    /// Open and return a new line-buffered reader.
    fn open_buffered(&self) -> std::io::Result<Box<dyn BufRead + Send>> {
        Ok(Box::new(BufReader::new(self.open_stream()?)))
    }
}

impl<S: CharSource + ?Sized> CharSource for std::sync::Arc<S> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn open_stream(&self) -> std::io::Result<Box<dyn Read + Send>> {
        (**self).open_stream()
    }

    fn open_buffered(&self) -> std::io::Result<Box<dyn BufRead + Send>> {
        (**self).open_buffered()
    }
}
