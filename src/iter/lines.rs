//! Line cursor over a buffered reader.

use std::io::{BufRead, ErrorKind};

use log::trace;

use crate::error::SourceError;

use super::CloseableCursor;

/// Yields the lines of a reader without their terminators.
///
/// The next line is always read one step ahead, so a read failure on the
/// first line surfaces from [`LineReader::new`]. Later failures are held
/// back until the line read before them has been handed out.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: Option<R>,
    target: String,
    next_line: Option<String>,
    pending: Option<SourceError>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, target: impl Into<String>) -> Result<Self, SourceError> {
        let mut lines = Self {
            reader: Some(reader),
            target: target.into(),
            next_line: None,
            pending: None,
        };
        lines.next_line = lines.read_line()?;
        Ok(lines)
    }

    fn read_line(&mut self) -> Result<Option<String>, SourceError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        let mut buf = String::new();
        match reader.read_line(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => {
                if buf.ends_with('\n') {
                    buf.pop();
                    if buf.ends_with('\r') {
                        buf.pop();
                    }
                }
                Ok(Some(buf))
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(SourceError::read(self.target.clone(), e)),
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending.take() {
            return Some(Err(e));
        }
        let line = self.next_line.take()?;
        match self.read_line() {
            Ok(next) => self.next_line = next,
            Err(e) => self.pending = Some(e),
        }
        Some(Ok(line))
    }
}

impl<R: BufRead> CloseableCursor<String> for LineReader<R> {
    fn close(&mut self) -> Result<(), SourceError> {
        if self.reader.take().is_some() {
            trace!("released line reader for {}", self.target);
        }
        self.next_line = None;
        self.pending = None;
        Ok(())
    }
}
