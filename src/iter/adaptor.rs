//! Cursor paired with an independent release handle.

use crate::error::SourceError;
use crate::resource::Release;

use super::CloseableCursor;

/// Delegates iteration to `cursor` and closing to `handle`.
#[derive(Debug)]
pub struct Adaptor<I, R> {
    cursor: I,
    handle: R,
}

impl<I, R> Adaptor<I, R> {
    pub fn new(cursor: I, handle: R) -> Self {
        Self { cursor, handle }
    }
}

impl<I: Iterator, R> Iterator for Adaptor<I, R> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<T, I, R> CloseableCursor<T> for Adaptor<I, R>
where
    I: Iterator<Item = Result<T, SourceError>>,
    R: Release,
{
    fn close(&mut self) -> Result<(), SourceError> {
        self.handle.release()
    }
}
