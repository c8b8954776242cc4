//! Borrowed, non-owning view over an iterator.

use crate::error::SourceError;

use super::ClosingIterator;

/// Forwards iteration to a borrowed [`ClosingIterator`].
///
/// A decorator never closes anything: whoever lent the iterator keeps
/// control of its lifetime.
#[derive(Debug)]
pub struct Decorator<'a, T> {
    inner: &'a mut ClosingIterator<T>,
}

impl<'a, T> Decorator<'a, T> {
    pub fn new(inner: &'a mut ClosingIterator<T>) -> Self {
        Self { inner }
    }

    pub fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }
}

impl<T> Iterator for Decorator<'_, T> {
    type Item = Result<T, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
