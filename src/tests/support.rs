//! Test doubles shared by the test modules.

use std::cell::Cell;
use std::io::{self, Cursor, Read};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::SourceError;
use crate::io::CharSource;
use crate::iter::ClosingIterator;
use crate::resource::release_fn;
use crate::sequence::LazySequence;

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Counts opens, releases and items pulled from a sequence built by
/// [`tracked`] or [`failing_release`].
#[derive(Debug, Clone, Default)]
pub(crate) struct Tracker {
    opens: Rc<Cell<usize>>,
    releases: Rc<Cell<usize>>,
    pulls: Rc<Cell<usize>>,
}

impl Tracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn opens(&self) -> usize {
        self.opens.get()
    }

    pub(crate) fn releases(&self) -> usize {
        self.releases.get()
    }

    pub(crate) fn pulls(&self) -> usize {
        self.pulls.get()
    }
}

fn bump(cell: &Rc<Cell<usize>>) {
    cell.set(cell.get() + 1);
}

/// Sequence over `items` whose every open and release is counted.
pub(crate) fn tracked<T: Clone + 'static>(items: Vec<T>, tracker: &Tracker) -> LazySequence<T> {
    sequence_with_release(items, tracker, None)
}

/// Like [`tracked`], but releasing fails with an error naming `target`.
///
/// The release attempt is still counted.
pub(crate) fn failing_release<T: Clone + 'static>(
    items: Vec<T>,
    tracker: &Tracker,
    target: &'static str,
) -> LazySequence<T> {
    sequence_with_release(items, tracker, Some(target))
}

fn sequence_with_release<T: Clone + 'static>(
    items: Vec<T>,
    tracker: &Tracker,
    failure: Option<&'static str>,
) -> LazySequence<T> {
    let tracker = tracker.clone();
    LazySequence::from_fn(move || {
        bump(&tracker.opens);
        let releases = Rc::clone(&tracker.releases);
        let pulls = Rc::clone(&tracker.pulls);
        let cursor = items.clone().into_iter().map(move |item| {
            bump(&pulls);
            Ok(item)
        });
        Ok(ClosingIterator::adapt(
            cursor,
            release_fn(move || {
                bump(&releases);
                match failure {
                    Some(target) => Err(SourceError::release(target, io::Error::other("boom"))),
                    None => Ok(()),
                }
            }),
        ))
    })
}

/// Character source counting opens and dropped readers.
#[derive(Debug, Clone)]
pub(crate) struct CountingSource {
    id: String,
    text: String,
    opens: Arc<AtomicUsize>,
    drops: Arc<AtomicUsize>,
}

impl CountingSource {
    pub(crate) fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            opens: Arc::new(AtomicUsize::new(0)),
            drops: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub(crate) fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

impl CharSource for CountingSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn open_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TrackedReader {
            inner: Cursor::new(self.text.clone().into_bytes()),
            drops: Arc::clone(&self.drops),
        }))
    }
}

struct TrackedReader {
    inner: Cursor<Vec<u8>>,
    drops: Arc<AtomicUsize>,
}

impl Read for TrackedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for TrackedReader {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Source that cannot be opened.
#[derive(Debug)]
pub(crate) struct MissingSource;

impl CharSource for MissingSource {
    fn id(&self) -> &str {
        "missing"
    }

    fn open_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Err(io::Error::new(io::ErrorKind::NotFound, "no such source"))
    }
}

/// Source whose stream serves `text` once and then fails. An empty `text`
/// fails on the first read.
#[derive(Debug)]
pub(crate) struct BrokenSource {
    pub(crate) text: &'static str,
}

impl CharSource for BrokenSource {
    fn id(&self) -> &str {
        "broken"
    }

    fn open_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(BrokenReader {
            text: Some(self.text),
        }))
    }
}

struct BrokenReader {
    text: Option<&'static str>,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.text.take() {
            Some(text) if !text.is_empty() => {
                let bytes = text.as_bytes();
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            _ => Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream broke")),
        }
    }
}

/// Source whose stream hands out one byte per read.
#[derive(Debug)]
pub(crate) struct TrickleSource {
    pub(crate) text: &'static str,
}

impl CharSource for TrickleSource {
    fn id(&self) -> &str {
        "trickle"
    }

    fn open_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(TrickleReader {
            bytes: self.text.as_bytes(),
        }))
    }
}

struct TrickleReader {
    bytes: &'static [u8],
}

impl Read for TrickleReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match (self.bytes.split_first(), buf.first_mut()) {
            (Some((&byte, rest)), Some(slot)) => {
                *slot = byte;
                self.bytes = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

/// Source whose stream repeats `x,` forever.
#[derive(Debug)]
pub(crate) struct EndlessSource;

impl CharSource for EndlessSource {
    fn id(&self) -> &str {
        "endless"
    }

    fn open_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(EndlessReader { comma: false }))
    }
}

struct EndlessReader {
    comma: bool,
}

impl Read for EndlessReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        for slot in buf.iter_mut() {
            *slot = if self.comma { b',' } else { b'x' };
            self.comma = !self.comma;
        }
        Ok(buf.len())
    }
}
