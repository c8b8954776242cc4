//! Tests for the line reader.

use std::io::Cursor;

use crate::error::Stage;
use crate::iter::{CloseableCursor, LineReader};
use crate::tests::support::{BrokenSource, CountingSource};
use crate::{InMemorySource, LazySequence};

#[test]
fn strips_terminators() {
    let mut lines = LineReader::new(Cursor::new("a\r\nb\nc"), "mem").unwrap();

    let got: Vec<String> = lines.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(got, vec!["a", "b", "c"]);
    lines.close().unwrap();
}

#[test]
fn keeps_blank_lines_but_not_trailing_terminator() {
    let lines = LazySequence::from_lines(InMemorySource::from_string("mem", "alpha\n\nbeta\n"));
    assert_eq!(lines.read_all().unwrap(), vec!["alpha", "", "beta"]);
}

#[test]
fn empty_input_has_no_lines() {
    let lines = LazySequence::from_lines(InMemorySource::from_string("mem", ""));
    let mut iter = lines.open().unwrap();
    assert!(!iter.has_next());
    iter.close().unwrap();
}

#[test]
fn read_failure_surfaces_after_buffered_lines() {
    let lines = LazySequence::from_lines(BrokenSource {
        text: "one\ntwo\n",
    });
    let mut iter = lines.open().unwrap();

    assert_eq!(iter.next().unwrap().unwrap(), "one");
    assert_eq!(iter.next().unwrap().unwrap(), "two");
    let err = iter.next().unwrap().expect_err("third read fails");
    assert_eq!(err.stage(), Some(Stage::Read));
    assert!(iter.next().is_none());
    iter.close().unwrap();
}

#[test]
fn read_failure_on_first_line_fails_open() {
    let lines = LazySequence::from_lines(BrokenSource { text: "" });

    let err = lines.open().expect_err("first line cannot be read");
    assert_eq!(err.stage(), Some(Stage::Read));
}

#[test]
fn closing_drops_reader() {
    let src = CountingSource::new("count", "x\ny\nz");
    let lines = LazySequence::from_lines(src.clone());

    let mut iter = lines.open().unwrap();
    assert_eq!(iter.next().unwrap().unwrap(), "x");
    assert_eq!(src.drops(), 0);

    iter.close().unwrap();
    assert_eq!(src.opens(), 1);
    assert_eq!(src.drops(), 1);
}
