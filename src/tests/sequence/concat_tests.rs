//! Tests for concatenation and its aggregator.

use crate::error::Stage;
use crate::tests::support::{MissingSource, Tracker, failing_release, init_logger, tracked};
use crate::{ConcatAggregator, LazySequence, Release};

#[test]
fn concat_reads_inputs_end_to_end() {
    let seq = LazySequence::concat([
        LazySequence::from_items(vec![1, 2]),
        LazySequence::from_items(vec![]),
        LazySequence::from_items(vec![3]),
    ]);

    assert_eq!(seq.read_all().unwrap(), vec![1, 2, 3]);
    assert_eq!(seq.read_all().unwrap(), vec![1, 2, 3]);
}

#[test]
fn inputs_open_only_when_reached() {
    let (a, b, c) = (Tracker::new(), Tracker::new(), Tracker::new());
    let seq = LazySequence::concat([
        tracked(vec![1, 2], &a),
        tracked(vec![3], &b),
        tracked(vec![4, 5], &c),
    ]);

    let mut iter = seq.open().unwrap();
    assert_eq!((a.opens(), b.opens(), c.opens()), (0, 0, 0));

    assert_eq!(iter.next().unwrap().unwrap(), 1);
    assert_eq!(iter.next().unwrap().unwrap(), 2);
    assert_eq!((a.opens(), b.opens(), c.opens()), (1, 0, 0));

    assert_eq!(iter.next().unwrap().unwrap(), 3);
    assert_eq!(c.opens(), 0);

    assert_eq!(iter.next().unwrap().unwrap(), 4);
    assert_eq!(c.opens(), 1);
    // Exhausted inputs stay open until the concatenation closes.
    assert_eq!((a.releases(), b.releases()), (0, 0));

    iter.close().unwrap();
    assert_eq!((a.releases(), b.releases(), c.releases()), (1, 1, 1));
}

#[test]
fn partial_read_releases_only_what_was_opened() {
    let (a, b) = (Tracker::new(), Tracker::new());
    let seq = LazySequence::concat([tracked(vec![1, 2], &a), tracked(vec![3], &b)]);

    let mut iter = seq.open().unwrap();
    assert_eq!(iter.next().unwrap().unwrap(), 1);
    iter.close().unwrap();

    assert_eq!((a.opens(), a.releases()), (1, 1));
    assert_eq!((b.opens(), b.releases()), (0, 0));
}

fn assert_all_released_with_failure_at(position: usize) {
    init_logger();
    let trackers = [Tracker::new(), Tracker::new(), Tracker::new()];
    let inputs: Vec<LazySequence<i32>> = trackers
        .iter()
        .enumerate()
        .map(|(i, tracker)| {
            if i == position {
                failing_release(vec![i as i32], tracker, "bad-child")
            } else {
                tracked(vec![i as i32], tracker)
            }
        })
        .collect();
    let seq = LazySequence::concat(inputs);

    let mut iter = seq.open().unwrap();
    let items: Vec<i32> = iter.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(items, vec![0, 1, 2]);

    let err = iter.close().expect_err("one child fails to release");
    assert_eq!(err.stage(), Some(Stage::Release));
    for tracker in &trackers {
        assert_eq!(tracker.releases(), 1);
    }
}

#[test]
fn release_failure_first_does_not_stop_others() {
    assert_all_released_with_failure_at(0);
}

#[test]
fn release_failure_second_does_not_stop_others() {
    assert_all_released_with_failure_at(1);
}

#[test]
fn release_failure_last_does_not_stop_others() {
    assert_all_released_with_failure_at(2);
}

#[test]
fn first_release_failure_is_surfaced() {
    init_logger();
    let (a, b) = (Tracker::new(), Tracker::new());
    let seq = LazySequence::concat([
        failing_release(vec![1], &a, "first"),
        failing_release(vec![2], &b, "second"),
    ]);

    let err = seq.read_all().expect_err("both fail");

    match err {
        crate::SourceError::Io { target, .. } => assert_eq!(target, "first"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!((a.releases(), b.releases()), (1, 1));
}

#[test]
fn open_failure_of_an_input_stops_the_concatenation() {
    let (a, c) = (Tracker::new(), Tracker::new());
    let seq = LazySequence::concat([
        tracked(vec!["a".to_string()], &a),
        LazySequence::from_lines(MissingSource),
        tracked(vec!["c".to_string()], &c),
    ]);

    let mut iter = seq.open().unwrap();
    assert_eq!(iter.next().unwrap().unwrap(), "a");
    let err = iter.next().unwrap().expect_err("second input cannot open");
    assert_eq!(err.stage(), Some(Stage::Open));
    assert!(iter.next().is_none());
    iter.close().unwrap();

    assert_eq!(a.releases(), 1);
    assert_eq!(c.opens(), 0);
}

#[test]
fn chain_appends_another_sequence() {
    let head = LazySequence::from_items(vec!["x"]);
    let tail = LazySequence::from_items(vec!["y", "z"]);

    assert_eq!(head.chain(&tail).read_all().unwrap(), vec!["x", "y", "z"]);
}

#[test]
fn aggregator_refuses_to_open_after_release() {
    let tracker = Tracker::new();
    let child = tracked(vec![1], &tracker);
    let mut aggregator = ConcatAggregator::new();

    let mut view = aggregator.open(&child).unwrap();
    assert!(view.has_next());
    assert_eq!(view.next().unwrap().unwrap(), 1);
    assert!(!view.has_next());
    assert_eq!(aggregator.opened(), 1);

    aggregator.release().unwrap();
    assert!(aggregator.is_released());
    assert_eq!(tracker.releases(), 1);

    let err = aggregator.open(&child).expect_err("already released");
    assert!(err.is_illegal_state());
    assert_eq!(tracker.opens(), 1);

    // Releasing again does not touch the children a second time.
    aggregator.release().unwrap();
    assert_eq!(tracker.releases(), 1);
}
