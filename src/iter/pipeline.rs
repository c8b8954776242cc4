//! Cursors that wrap an origin iterator and own it.
//!
//! Each of these releases exactly its origin when closed, which in turn
//! releases the origin's own chain.

use crate::error::SourceError;

use super::{CloseableCursor, ClosingIterator};

pub(crate) struct Transform<T, F> {
    origin: ClosingIterator<T>,
    f: F,
}

impl<T, F> Transform<T, F> {
    pub(crate) fn new(origin: ClosingIterator<T>, f: F) -> Self {
        Self { origin, f }
    }
}

impl<T, U, F> Iterator for Transform<T, F>
where
    F: FnMut(T) -> Result<U, SourceError>,
{
    type Item = Result<U, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.origin.next()?;
        Some(item.and_then(|value| (self.f)(value)))
    }
}

impl<T, U, F> CloseableCursor<U> for Transform<T, F>
where
    F: FnMut(T) -> Result<U, SourceError>,
{
    fn close(&mut self) -> Result<(), SourceError> {
        self.origin.release()
    }
}

pub(crate) struct Filter<T, P> {
    origin: ClosingIterator<T>,
    predicate: P,
}

impl<T, P> Filter<T, P> {
    pub(crate) fn new(origin: ClosingIterator<T>, predicate: P) -> Self {
        Self { origin, predicate }
    }
}

impl<T, P> Iterator for Filter<T, P>
where
    P: FnMut(&T) -> bool,
{
    type Item = Result<T, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.origin.next()? {
                Ok(value) if !(self.predicate)(&value) => continue,
                other => return Some(other),
            }
        }
    }
}

impl<T, P> CloseableCursor<T> for Filter<T, P>
where
    P: FnMut(&T) -> bool,
{
    fn close(&mut self) -> Result<(), SourceError> {
        self.origin.release()
    }
}

/// Drops `None` items and unwraps the rest.
pub(crate) struct SkipNone<T> {
    origin: ClosingIterator<Option<T>>,
}

impl<T> SkipNone<T> {
    pub(crate) fn new(origin: ClosingIterator<Option<T>>) -> Self {
        Self { origin }
    }
}

impl<T> Iterator for SkipNone<T> {
    type Item = Result<T, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.origin.next()? {
                Ok(Some(value)) => return Some(Ok(value)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<T> CloseableCursor<T> for SkipNone<T> {
    fn close(&mut self) -> Result<(), SourceError> {
        self.origin.release()
    }
}
