// Unit tests for the interval tracker

use super::*;

fn run(
    observations: &[(f64, bool)],
    min_duration: Option<f64>,
    video_duration: f64,
) -> Vec<Interval> {
    let mut tracker = IntervalTracker::new("a.mp4", min_duration);
    for &(timestamp, present) in observations {
        tracker.observe(&Observation::new("a.mp4", timestamp, present));
    }
    tracker.finish(video_duration);
    tracker.into_intervals()
}

fn spans(intervals: &[Interval]) -> Vec<(f64, f64)> {
    intervals.iter().map(|i| (i.start, i.end)).collect()
}

#[test]
fn test_open_and_close() {
    let intervals = run(
        &[(0.0, false), (1.0, true), (2.0, true), (3.0, false)],
        None,
        10.0,
    );
    assert_eq!(spans(&intervals), vec![(1.0, 3.0)]);
}

#[test]
fn test_outside_observations_emit_nothing() {
    let intervals = run(&[(0.0, false), (1.0, false)], Some(1.0), 5.0);
    assert!(intervals.is_empty());
}

#[test]
fn test_deterministic_and_ordered() {
    let observations = [
        (0.0, true),
        (1.5, false),
        (3.0, true),
        (3.5, true),
        (5.0, false),
        (7.0, true),
        (9.0, false),
    ];
    let first = run(&observations, None, 12.0);
    let second = run(&observations, None, 12.0);
    assert_eq!(first, second);
    assert_eq!(spans(&first), vec![(0.0, 1.5), (3.0, 5.0), (7.0, 9.0)]);
    assert!(first.windows(2).all(|w| w[0].start < w[1].start));
}

#[test]
fn test_min_duration_is_inclusive() {
    // exactly at the threshold is kept, just below is dropped
    let intervals = run(
        &[(1.0, true), (2.0, false), (5.0, true), (5.75, false)],
        Some(1.0),
        10.0,
    );
    assert_eq!(spans(&intervals), vec![(1.0, 2.0)]);
}

#[test]
fn test_dropped_event_reported() {
    let mut tracker = IntervalTracker::new("a.mp4", Some(1.0));
    assert_eq!(
        tracker.observe(&Observation::new("a.mp4", 4.0, true)),
        Some(TrackerEvent::Opened { at: 4.0 })
    );
    assert_eq!(
        tracker.observe(&Observation::new("a.mp4", 4.9, false)),
        Some(TrackerEvent::Dropped { start: 4.0, end: 4.9 })
    );
    assert_eq!(tracker.state(), TrackerState::Outside);
}

#[test]
fn test_end_of_stream_closes_at_duration() {
    let intervals = run(&[(0.0, false), (20.0, true), (25.0, true)], None, 30.0);
    assert_eq!(spans(&intervals), vec![(20.0, 30.0)]);
}

#[test]
fn test_end_of_stream_respects_min_duration() {
    let intervals = run(&[(29.5, true)], Some(1.0), 30.0);
    assert!(intervals.is_empty());
}

#[test]
fn test_end_of_stream_with_short_metadata() {
    // duration metadata behind the decoded stream falls back to last timestamp
    let intervals = run(&[(10.0, true), (12.0, true)], None, 9.0);
    assert_eq!(spans(&intervals), vec![(10.0, 12.0)]);

    let none = run(&[(10.0, true)], None, 9.0);
    assert!(none.is_empty());
}

#[test]
fn test_outside_finish_is_silent() {
    let mut tracker = IntervalTracker::new("a.mp4", None);
    assert_eq!(tracker.finish(10.0), None);
}

#[test]
fn test_backwards_timestamp_ignored() {
    let intervals = run(
        &[(1.0, true), (0.5, false), (2.0, true), (3.0, false)],
        None,
        10.0,
    );
    assert_eq!(spans(&intervals), vec![(1.0, 3.0)]);
}

#[test]
fn test_end_to_end_scenario_observations() {
    // a.mp4 at 25 fps, 30 s; cat during [4.0, 4.9] and [10.0, 14.0]
    let mut observations = vec![(0.0, false), (2.0, false)];
    observations.extend([(4.0, true), (4.9, false)]);
    observations.extend([(10.0, true), (12.0, true), (14.0, false), (20.0, false)]);
    let intervals = run(&observations, Some(1.0), 30.0);
    assert_eq!(intervals, vec![Interval::new("a.mp4", 10.0, 14.0).unwrap()]);
}
