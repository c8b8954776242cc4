//! Token cursor splitting a character stream on a delimiter.

use std::io::{self, ErrorKind, Read};

use log::trace;
use regex::Regex;

use crate::error::SourceError;

use super::CloseableCursor;

/// Separator between tokens of a delimited source.
#[derive(Debug, Clone)]
pub enum Delimiter {
    /// Regular expression
    Pattern(Regex),
    /// Literal string, matched as-is
    Literal(String),
}

impl Delimiter {
    /// Compile a regular expression delimiter.
    pub fn pattern(pattern: &str) -> Result<Self, SourceError> {
        Ok(Delimiter::Pattern(Regex::new(pattern)?))
    }

    /// Literal delimiter. An empty literal never matches.
    pub fn literal(literal: impl Into<String>) -> Self {
        Delimiter::Literal(literal.into())
    }

    /// Find the next non-empty match at or after `start`.
    fn find_from(&self, haystack: &str, start: usize) -> Option<(usize, usize)> {
        match self {
            Delimiter::Literal(lit) => {
                if lit.is_empty() {
                    return None;
                }
                haystack[start..]
                    .find(lit.as_str())
                    .map(|i| (start + i, start + i + lit.len()))
            }
            Delimiter::Pattern(rx) => {
                let mut from = start;
                while from <= haystack.len() {
                    let m = rx.find_at(haystack, from)?;
                    if !m.is_empty() {
                        return Some((m.start(), m.end()));
                    }
                    // Zero-width match; retry past it.
                    from = m.start() + haystack[m.start()..].chars().next()?.len_utf8();
                }
                None
            }
        }
    }
}

/// Size of each read from the underlying stream.
const CHUNK_SIZE: usize = 8 * 1024;

/// Outcome of looking for a delimiter in the buffered text.
enum Scan {
    /// A match that more input cannot change
    Match(usize, usize),
    /// No match, and the stream is exhausted
    NoMatch,
    /// The answer depends on text not read yet
    NeedMore,
}

/// Yields the text between delimiter matches.
///
/// The stream is read in chunks as tokens are demanded, so a token is
/// produced as soon as the delimiter ending it has been read, and read
/// failures surface from the `next` call that needed the missing text.
/// A match counts only once it ends strictly inside the buffered text or
/// the stream has ended.
///
/// Before each token one delimiter at the current position is skipped.
/// A leading delimiter therefore yields no empty token, and neither does a
/// trailing one (or empty input). Consecutive delimiters inside the text
/// still yield empty tokens.
#[derive(Debug)]
pub struct DelimitedReader<R> {
    reader: Option<R>,
    target: String,
    delimiter: Delimiter,
    buf: String,
    undecoded: Vec<u8>,
    pos: usize,
    eof: bool,
    done: bool,
}

impl<R: Read> DelimitedReader<R> {
    pub fn new(reader: R, target: impl Into<String>, delimiter: Delimiter) -> Self {
        Self {
            reader: Some(reader),
            target: target.into(),
            delimiter,
            buf: String::new(),
            undecoded: Vec::new(),
            pos: 0,
            eof: false,
            done: false,
        }
    }

    fn scan(&self) -> Scan {
        match self.delimiter.find_from(&self.buf, self.pos) {
            Some((start, end)) if end < self.buf.len() || self.eof => Scan::Match(start, end),
            None if self.eof => Scan::NoMatch,
            _ => Scan::NeedMore,
        }
    }

    fn advance(&mut self) -> Result<Option<String>, SourceError> {
        loop {
            match Self::scan(self) {
                Scan::Match(start, end) if start == self.pos => {
                    self.pos = end;
                    break;
                }
                Scan::Match(..) | Scan::NoMatch => break,
                Scan::NeedMore => self.fill()?,
            }
        }
        loop {
            match Self::scan(self) {
                Scan::Match(start, _) => return Ok(Some(self.take_until(start))),
                Scan::NoMatch if self.pos >= self.buf.len() => return Ok(None),
                Scan::NoMatch => {
                    let end = self.buf.len();
                    return Ok(Some(self.take_until(end)));
                }
                Scan::NeedMore => self.fill()?,
            }
        }
    }

    /// Hand out `buf[pos..end]` and drop everything before `end`.
    fn take_until(&mut self, end: usize) -> String {
        let token = self.buf[self.pos..end].to_string();
        self.buf.drain(..end);
        self.pos = 0;
        token
    }

    /// Read one more chunk, decoding as much UTF-8 as is complete.
    fn fill(&mut self) -> Result<(), SourceError> {
        let Some(reader) = self.reader.as_mut() else {
            self.eof = true;
            return Ok(());
        };
        let mut chunk = [0u8; CHUNK_SIZE];
        let n = loop {
            match reader.read(&mut chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(SourceError::read(self.target.clone(), e)),
            }
        };
        if n == 0 {
            self.eof = true;
            if !self.undecoded.is_empty() {
                return Err(self.invalid_utf8());
            }
            return Ok(());
        }

        self.undecoded.extend_from_slice(&chunk[..n]);
        let complete = match std::str::from_utf8(&self.undecoded) {
            Ok(text) => text.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(_) => return Err(self.invalid_utf8()),
        };
        let bytes: Vec<u8> = self.undecoded.drain(..complete).collect();
        let text = String::from_utf8(bytes).map_err(|_| self.invalid_utf8())?;
        self.buf.push_str(&text);
        Ok(())
    }

    fn invalid_utf8(&self) -> SourceError {
        SourceError::read(
            self.target.clone(),
            io::Error::new(ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        )
    }
}

impl<R: Read> Iterator for DelimitedReader<R> {
    type Item = Result<String, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> CloseableCursor<String> for DelimitedReader<R> {
    fn close(&mut self) -> Result<(), SourceError> {
        if self.reader.take().is_some() {
            trace!("released delimited reader for {}", self.target);
        }
        self.buf.clear();
        self.undecoded.clear();
        self.done = true;
        Ok(())
    }
}
