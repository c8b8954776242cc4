//! Single-pass consumers driven by [`LazySequence::read_all_with`].
//!
//! [`LazySequence::read_all_with`]: crate::LazySequence::read_all_with

use std::fmt;

/// Accumulates the items of one read into a result.
///
/// `process` returns `true` to ask for the next item and `false` to stop
/// early. Reading stops at the first `false`, and the iterator is closed
/// without being advanced any further. A processor is consumed by
/// `result`, so each read needs its own instance.
pub trait SequenceProcessor<T> {
    type Output;

    fn process(&mut self, item: T) -> bool;

    fn result(self) -> Self::Output;
}

/// Closure-backed processor.
///
/// # Example
///
/// ```rust
/// use lazysource::{Fold, InMemorySource, LazySequence, Delimiter};
///
/// let sum = LazySequence::from_delimited(
///     InMemorySource::from_string("nums", "1,2,3"),
///     Delimiter::literal(","),
/// )
/// .try_transform(|s| s.parse::<i32>().map_err(lazysource::SourceError::other))
/// .read_all_with(Fold::new(0, |acc: &mut i32, n: i32| {
///     *acc += n;
///     true
/// }))
/// .unwrap();
/// assert_eq!(sum, 6);
/// ```
pub struct Fold<R, F> {
    acc: R,
    f: F,
}

impl<R, F> Fold<R, F> {
    pub fn new(init: R, f: F) -> Self {
        Self { acc: init, f }
    }
}

impl<T, R, F> SequenceProcessor<T> for Fold<R, F>
where
    F: FnMut(&mut R, T) -> bool,
{
    type Output = R;

    fn process(&mut self, item: T) -> bool {
        (self.f)(&mut self.acc, item)
    }

    fn result(self) -> R {
        self.acc
    }
}

impl<R: fmt::Debug, F> fmt::Debug for Fold<R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fold").field("acc", &self.acc).finish()
    }
}
