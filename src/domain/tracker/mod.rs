// Interval tracker - Turns per-frame verdicts into closed presence intervals

use tracing::debug;

use crate::domain::model::{Interval, Observation};

/// Tracker state for one video
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerState {
    /// No interval open
    Outside,
    /// Interval open since `start`
    Inside { start: f64 },
}

/// What a single transition produced
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    /// Target appeared; an interval is now open
    Opened { at: f64 },
    /// Interval closed and kept
    Closed(Interval),
    /// Interval closed but shorter than the minimum duration
    Dropped { start: f64, end: f64 },
}

/// Two-state machine emitting `[start, end]` intervals for one video
#[derive(Debug, Clone)]
pub struct IntervalTracker {
    video_id: String,
    min_duration: Option<f64>,
    state: TrackerState,
    last_timestamp: Option<f64>,
    intervals: Vec<Interval>,
}

impl IntervalTracker {
    /// Create a tracker; `min_duration` drops intervals shorter than it
    pub fn new(video_id: impl Into<String>, min_duration: Option<f64>) -> Self {
        Self {
            video_id: video_id.into(),
            min_duration,
            state: TrackerState::Outside,
            last_timestamp: None,
            intervals: Vec::new(),
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// Apply one observation
    pub fn observe(&mut self, observation: &Observation) -> Option<TrackerEvent> {
        let timestamp = observation.timestamp;
        if let Some(last) = self.last_timestamp {
            if timestamp < last {
                debug!(
                    video = %self.video_id,
                    timestamp,
                    last,
                    "Ignoring observation that goes back in time"
                );
                return None;
            }
        }
        self.last_timestamp = Some(timestamp);

        match (self.state, observation.present) {
            (TrackerState::Outside, true) => {
                self.state = TrackerState::Inside { start: timestamp };
                Some(TrackerEvent::Opened { at: timestamp })
            }
            (TrackerState::Inside { start }, false) => {
                self.state = TrackerState::Outside;
                Some(self.close(start, timestamp))
            }
            _ => None,
        }
    }

    /// Close the stream; an open interval ends at `video_duration`
    pub fn finish(&mut self, video_duration: f64) -> Option<TrackerEvent> {
        let TrackerState::Inside { start } = self.state else {
            return None;
        };
        self.state = TrackerState::Outside;

        let end = if video_duration > start {
            video_duration
        } else {
            // metadata shorter than what was decoded
            self.last_timestamp.unwrap_or(start)
        };
        Some(self.close(start, end))
    }

    /// Intervals emitted so far, in timestamp order
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn into_intervals(self) -> Vec<Interval> {
        self.intervals
    }

    fn close(&mut self, start: f64, end: f64) -> TrackerEvent {
        let too_short = self
            .min_duration
            .map(|min| end - start < min)
            .unwrap_or(false);

        match Interval::new(self.video_id.clone(), start, end) {
            Ok(interval) if !too_short => {
                self.intervals.push(interval.clone());
                TrackerEvent::Closed(interval)
            }
            _ => TrackerEvent::Dropped { start, end },
        }
    }
}

#[cfg(test)]
mod tests;
