//! Iterators that own the resources they read from.
//!
//! This module provides:
//! - `ClosingIterator`: The iterator every sequence hands out
//! - `CloseableCursor`: Trait for cursors that can also close what they own
//! - `Adaptor`: Arbitrary cursor plus an arbitrary release handle
//! - `LineReader`: Line cursor over a buffered reader, one line ahead
//! - `DelimitedReader`: Token cursor splitting a stream on a `Delimiter`
//! - `Decorator`: Borrowed view that forwards iteration but cannot close
//!
//! Ownership is explicit at each layer. A cursor either owns a handle and
//! releases it on `close`, or (like `Decorator`) only borrows an iterator
//! whose lifetime is managed elsewhere.

use std::fmt;

use log::warn;

use crate::error::SourceError;
use crate::resource::{NoRelease, Release};

mod adaptor;
mod decorator;
mod delimited;
mod lines;
pub(crate) mod pipeline;

pub use adaptor::Adaptor;
pub use decorator::Decorator;
pub use delimited::{Delimiter, DelimitedReader};
pub use lines::LineReader;

/// A cursor that owns zero or one resource and can release it.
///
/// `close` is called at most once by [`ClosingIterator`].
pub trait CloseableCursor<T>: Iterator<Item = Result<T, SourceError>> {
    /// Release whatever this cursor owns.
    fn close(&mut self) -> Result<(), SourceError>;
}

/// Single-pass iterator that releases its resource chain when closed.
///
/// Each item is a `Result`: read failures surface from the `next` call
/// where they happen. [`close`](ClosingIterator::close) consumes the
/// iterator, so it cannot be advanced afterwards.
///
/// Dropping an iterator that was never closed still releases it. Failures
/// on that path can only be logged, so prefer calling `close`.
pub struct ClosingIterator<T> {
    cursor: Box<dyn CloseableCursor<T>>,
    peeked: Option<Option<Result<T, SourceError>>>,
    released: bool,
}

impl<T> ClosingIterator<T> {
    /// Wrap a closeable cursor.
    pub fn new<C>(cursor: C) -> Self
    where
        C: CloseableCursor<T> + 'static,
    {
        Self {
            cursor: Box::new(cursor),
            peeked: None,
            released: false,
        }
    }

    /// Pair a plain cursor with the handle it reads from.
    pub fn adapt<I, R>(cursor: I, handle: R) -> Self
    where
        I: Iterator<Item = Result<T, SourceError>> + 'static,
        R: Release + 'static,
    {
        Self::new(Adaptor::new(cursor, handle))
    }

    /// Wrap a cursor that owns nothing.
    pub fn plain<I>(cursor: I) -> Self
    where
        I: Iterator<Item = Result<T, SourceError>> + 'static,
    {
        Self::adapt(cursor, NoRelease)
    }

    /// Returns `true` if another item (or a pending error) is available.
    ///
    /// This pulls at most one item from the cursor and holds it until the
    /// next call to `next`.
    pub fn has_next(&mut self) -> bool {
        if self.released {
            return false;
        }
        if self.peeked.is_none() {
            self.peeked = Some(self.cursor.next());
        }
        matches!(self.peeked, Some(Some(_)))
    }

    /// Like `next`, but treats exhaustion as misuse.
    pub fn try_next(&mut self) -> Result<T, SourceError> {
        self.next()
            .unwrap_or(Err(SourceError::IllegalState("iterator is exhausted")))
    }

    /// Release the resource chain and consume the iterator.
    pub fn close(mut self) -> Result<(), SourceError> {
        self.release()
    }

    /// Release in place. Only the first call reaches the cursor.
    pub(crate) fn release(&mut self) -> Result<(), SourceError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.peeked = None;
        self.cursor.close()
    }
}

impl<T> Iterator for ClosingIterator<T> {
    type Item = Result<T, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.released {
            return None;
        }
        match self.peeked.take() {
            Some(item) => item,
            None => self.cursor.next(),
        }
    }
}

impl<T> Drop for ClosingIterator<T> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("failed to release dropped iterator: {}", e);
        }
    }
}

impl<T> fmt::Debug for ClosingIterator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosingIterator")
            .field("peeked", &self.peeked.is_some())
            .field("released", &self.released)
            .finish()
    }
}
