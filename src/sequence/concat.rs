//! Concatenation of lazily opened sequences.

use std::fmt;
use std::rc::Rc;

use log::{debug, trace, warn};

use crate::error::SourceError;
use crate::iter::{CloseableCursor, ClosingIterator, Decorator};
use crate::resource::Release;

use super::LazySequence;

/// Owns every child iterator opened while reading a concatenation.
///
/// Children are opened one by one as iteration reaches them and are all
/// kept until the aggregator is released. Releasing closes them in the
/// order they were opened. A failing child does not stop the others from
/// being released: the first failure is returned and the rest are logged.
///
/// Once released, the aggregator refuses to open further children.
pub struct ConcatAggregator<T> {
    opened: Vec<ClosingIterator<T>>,
    released: bool,
}

impl<T: 'static> ConcatAggregator<T> {
    pub fn new() -> Self {
        Self {
            opened: Vec::new(),
            released: false,
        }
    }

    /// Open `sequence` and track its iterator.
    ///
    /// The returned [`Decorator`] can advance the child but not close it.
    pub fn open(&mut self, sequence: &LazySequence<T>) -> Result<Decorator<'_, T>, SourceError> {
        if self.released {
            return Err(SourceError::IllegalState("concatenation already released"));
        }
        let child = sequence.open()?;
        self.opened.push(child);
        debug!("opened concatenated sequence #{}", self.opened.len());
        let index = self.opened.len() - 1;
        Ok(Decorator::new(&mut self.opened[index]))
    }
}

impl<T> ConcatAggregator<T> {
    /// The most recently opened child.
    pub fn current(&mut self) -> Option<Decorator<'_, T>> {
        self.opened.last_mut().map(Decorator::new)
    }

    /// Number of children opened so far.
    pub fn opened(&self) -> usize {
        self.opened.len()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl<T: 'static> Default for ConcatAggregator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Release for ConcatAggregator<T> {
    fn release(&mut self) -> Result<(), SourceError> {
        self.released = true;
        let mut first = None;
        for (i, child) in self.opened.iter_mut().enumerate() {
            if let Err(e) = child.release() {
                if first.is_none() {
                    first = Some(e);
                } else {
                    warn!("suppressed release failure of concatenated sequence #{}: {}", i + 1, e);
                }
            }
        }
        trace!("released {} concatenated sequence(s)", self.opened.len());
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<T> fmt::Debug for ConcatAggregator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcatAggregator")
            .field("opened", &self.opened.len())
            .field("released", &self.released)
            .finish()
    }
}

/// Walks the inputs of a concatenation, opening each through the aggregator.
pub(crate) struct ConcatCursor<T> {
    sequences: Rc<[LazySequence<T>]>,
    next_index: usize,
    aggregator: ConcatAggregator<T>,
    active: bool,
    failed: bool,
}

impl<T: 'static> ConcatCursor<T> {
    pub(crate) fn new(sequences: Rc<[LazySequence<T>]>) -> Self {
        Self {
            sequences,
            next_index: 0,
            aggregator: ConcatAggregator::new(),
            active: false,
            failed: false,
        }
    }
}

impl<T: 'static> Iterator for ConcatCursor<T> {
    type Item = Result<T, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.active {
                if let Some(item) = self.aggregator.current().and_then(|mut child| child.next()) {
                    return Some(item);
                }
                self.active = false;
            }
            if self.failed || self.next_index >= self.sequences.len() {
                return None;
            }
            let index = self.next_index;
            self.next_index += 1;
            match self.aggregator.open(&self.sequences[index]) {
                Ok(_) => self.active = true,
                Err(e) => {
                    // The failed input is not retried and later inputs are
                    // not opened.
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<T: 'static> CloseableCursor<T> for ConcatCursor<T> {
    fn close(&mut self) -> Result<(), SourceError> {
        self.aggregator.release()
    }
}
