//! Lazy, re-openable sequences.
//!
//! A [`LazySequence`] is a description of how to produce items, never the
//! items themselves. Every [`open`](LazySequence::open) re-runs the whole
//! pipeline from its origin and returns an independent [`ClosingIterator`].
//!
//! ```rust
//! use lazysource::{InMemorySource, LazySequence};
//!
//! let lines = LazySequence::from_lines(InMemorySource::from_string("doc", "a\nbb\nccc"));
//! let long = lines.filter(|l| l.len() > 1).transform(|l| l.to_uppercase());
//!
//! assert_eq!(long.read_all().unwrap(), vec!["BB", "CCC"]);
//! // Reading again re-opens the source.
//! assert_eq!(long.read_all().unwrap().len(), 2);
//! ```

use std::fmt;
use std::rc::Rc;

use log::{debug, warn};

use crate::error::SourceError;
use crate::io::CharSource;
use crate::iter::pipeline::{Filter, SkipNone, Transform};
use crate::iter::{ClosingIterator, Delimiter, DelimitedReader, LineReader};
use crate::processor::SequenceProcessor;

mod concat;
mod csv;

pub use concat::ConcatAggregator;
pub use csv::CsvRecord;

type Opener<T> = dyn Fn() -> Result<ClosingIterator<T>, SourceError>;

/// Re-openable factory of [`ClosingIterator`]s.
///
/// Cloning is cheap and clones share the same opener. No iteration state
/// is ever stored here, so a sequence can be read any number of times.
///
/// Two reads may run at the same time only if the origin source allows
/// being opened twice; sequences add no locking of their own.
pub struct LazySequence<T> {
    opener: Rc<Opener<T>>,
}

impl<T> Clone for LazySequence<T> {
    fn clone(&self) -> Self {
        Self {
            opener: Rc::clone(&self.opener),
        }
    }
}

impl<T> fmt::Debug for LazySequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySequence").finish_non_exhaustive()
    }
}

impl<T: 'static> LazySequence<T> {
    /// Build a sequence from an open operation.
    ///
    /// `opener` runs once per read and must return a fresh iterator each
    /// time. Open failures should be returned from `opener` itself rather
    /// than deferred to the first item.
    pub fn from_fn<F>(opener: F) -> Self
    where
        F: Fn() -> Result<ClosingIterator<T>, SourceError> + 'static,
    {
        Self {
            opener: Rc::new(opener),
        }
    }

    /// In-memory sequence yielding clones of `items`.
    pub fn from_items(items: Vec<T>) -> Self
    where
        T: Clone,
    {
        let items: Rc<[T]> = items.into();
        Self::from_fn(move || {
            let items = Rc::clone(&items);
            let mut index = 0;
            Ok(ClosingIterator::plain(std::iter::from_fn(move || {
                let item = items.get(index)?.clone();
                index += 1;
                Some(Ok(item))
            })))
        })
    }

    /// Open a new iterator over the whole pipeline.
    pub fn open(&self) -> Result<ClosingIterator<T>, SourceError> {
        (self.opener)()
    }

    /// Map every item with `f`.
    ///
    /// The transformed iterator owns the origin iterator, so closing it
    /// closes the origin.
    pub fn transform<U, F>(&self, f: F) -> LazySequence<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let f = Rc::new(f);
        self.try_transform_with(move || {
            let f = Rc::clone(&f);
            move |value: T| -> Result<U, SourceError> { Ok(f(value)) }
        })
    }

    /// Map every item with a fallible `f`. Errors are yielded in place of
    /// the item.
    pub fn try_transform<U, F>(&self, f: F) -> LazySequence<U>
    where
        U: 'static,
        F: Fn(T) -> Result<U, SourceError> + 'static,
    {
        let f = Rc::new(f);
        self.try_transform_with(move || {
            let f = Rc::clone(&f);
            move |value: T| f(value)
        })
    }

    /// Map every item with a function made fresh for each read.
    ///
    /// `factory` runs once per open, so the mapping may keep state (such as
    /// a header row) without it leaking into the next read.
    pub fn try_transform_with<U, F, G>(&self, factory: F) -> LazySequence<U>
    where
        U: 'static,
        F: Fn() -> G + 'static,
        G: FnMut(T) -> Result<U, SourceError> + 'static,
    {
        let origin = self.clone();
        LazySequence::from_fn(move || {
            let mapping = factory();
            let iter = origin.open()?;
            Ok(ClosingIterator::new(Transform::new(iter, mapping)))
        })
    }

    /// Keep only the items satisfying `predicate`, in their original order.
    ///
    /// Errors are never filtered out.
    pub fn filter<P>(&self, predicate: P) -> LazySequence<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let origin = self.clone();
        let predicate = Rc::new(predicate);
        LazySequence::from_fn(move || {
            let predicate = Rc::clone(&predicate);
            let iter = origin.open()?;
            Ok(ClosingIterator::new(Filter::new(iter, move |value: &T| {
                predicate(value)
            })))
        })
    }

    /// Chain `sequences` end to end.
    ///
    /// Each input is opened only when iteration reaches it. Every opened
    /// input stays owned by the concatenated iterator until that iterator is
    /// closed, which releases them all; see [`ConcatAggregator`].
    pub fn concat<I>(sequences: I) -> LazySequence<T>
    where
        I: IntoIterator<Item = LazySequence<T>>,
    {
        let sequences: Rc<[LazySequence<T>]> = sequences.into_iter().collect();
        LazySequence::from_fn(move || {
            Ok(ClosingIterator::new(concat::ConcatCursor::new(Rc::clone(
                &sequences,
            ))))
        })
    }

    /// Shorthand for concatenating `self` and `other`.
    pub fn chain(&self, other: &LazySequence<T>) -> LazySequence<T> {
        Self::concat([self.clone(), other.clone()])
    }

    /// Open an iterator, hand it to `body`, and close it afterwards.
    ///
    /// The iterator is closed on every exit path. If `body` fails, its error
    /// is returned and a close failure is only logged. If `body` succeeds, a
    /// close failure is returned. On unwind the iterator is released when it
    /// is dropped.
    pub fn with_iterator<R, F>(&self, body: F) -> Result<R, SourceError>
    where
        F: FnOnce(&mut ClosingIterator<T>) -> Result<R, SourceError>,
    {
        let mut iter = self.open()?;
        let outcome = body(&mut iter);
        let closed = iter.close();
        match (outcome, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                warn!("release failed after read error: {}", close_err);
                Err(e)
            }
        }
    }

    /// Read every item into a `Vec`, in source order.
    pub fn read_all(&self) -> Result<Vec<T>, SourceError> {
        self.with_iterator(|iter| iter.by_ref().collect())
    }

    /// Feed items to `processor` until the sequence ends or the processor
    /// asks to stop, then return its result.
    ///
    /// No item past the one that stopped the processor is pulled.
    pub fn read_all_with<P>(&self, mut processor: P) -> Result<P::Output, SourceError>
    where
        P: SequenceProcessor<T>,
    {
        self.with_iterator(|iter| {
            for item in iter.by_ref() {
                if !processor.process(item?) {
                    break;
                }
            }
            Ok(())
        })?;
        Ok(processor.result())
    }
}

impl<T: 'static> LazySequence<Option<T>> {
    /// Drop `None` items and unwrap the rest.
    pub fn skip_none(&self) -> LazySequence<T> {
        let origin = self.clone();
        LazySequence::from_fn(move || Ok(ClosingIterator::new(SkipNone::new(origin.open()?))))
    }
}

impl LazySequence<String> {
    /// Tokens of `source` separated by `delimiter`.
    pub fn from_delimited<S>(source: S, delimiter: Delimiter) -> Self
    where
        S: CharSource + 'static,
    {
        Self::from_fn(move || {
            debug!("opening delimited stream from {}", source.id());
            let reader = source
                .open_stream()
                .map_err(|e| SourceError::open(source.id(), e))?;
            Ok(ClosingIterator::new(DelimitedReader::new(
                reader,
                source.id(),
                delimiter.clone(),
            )))
        })
    }

    /// Tokens of `source` separated by the regular expression `pattern`.
    ///
    /// An invalid pattern fails here, before anything is opened.
    pub fn from_pattern<S>(source: S, pattern: &str) -> Result<Self, SourceError>
    where
        S: CharSource + 'static,
    {
        Ok(Self::from_delimited(source, Delimiter::pattern(pattern)?))
    }

    /// Lines of `source`, read one at a time through a buffered reader.
    ///
    /// Lines end at `\n` or `\r\n`; terminators are not included.
    pub fn from_lines<S>(source: S) -> Self
    where
        S: CharSource + 'static,
    {
        Self::from_fn(move || {
            debug!("opening lines from {}", source.id());
            let reader = source
                .open_buffered()
                .map_err(|e| SourceError::open(source.id(), e))?;
            Ok(ClosingIterator::new(LineReader::new(reader, source.id())?))
        })
    }
}
