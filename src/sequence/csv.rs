//! Header-keyed CSV records over a line sequence.

use indexmap::IndexMap;

use crate::error::SourceError;
use crate::io::CharSource;

use super::LazySequence;

/// One CSV data row, keyed by header name in header order.
pub type CsvRecord = IndexMap<String, String>;

impl LazySequence<CsvRecord> {
    /// Records of a comma-separated `source` whose first line is the header.
    ///
    /// Fields are split on every `,`; quoting is not interpreted. A data row
    /// whose field count differs from the header's fails with
    /// [`SourceError::ShapeMismatch`] when that row is reached.
    pub fn from_csv<S>(source: S) -> Self
    where
        S: CharSource + 'static,
    {
        LazySequence::from_lines(source)
            .try_transform_with(|| {
                let mut headers: Option<Vec<String>> = None;
                let mut line = 0usize;
                move |input: String| -> Result<Option<CsvRecord>, SourceError> {
                    line += 1;
                    if let Some(headers) = &headers {
                        return zip(headers, split(&input), line).map(Some);
                    }
                    headers = Some(split(&input));
                    Ok(None)
                }
            })
            .skip_none()
    }
}

fn split(input: &str) -> Vec<String> {
    input.split(',').map(str::to_owned).collect()
}

fn zip(headers: &[String], values: Vec<String>, line: usize) -> Result<CsvRecord, SourceError> {
    if headers.len() != values.len() {
        return Err(SourceError::ShapeMismatch {
            line,
            expected: headers.len(),
            found: values.len(),
            values,
        });
    }
    Ok(headers.iter().cloned().zip(values).collect())
}
