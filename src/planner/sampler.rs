//! Frame selection over a decoded stream

use crate::domain::model::FrameHeader;
use crate::planner::SamplingPolicy;

/// Tolerance when comparing frame timestamps against cadence points
const CADENCE_EPSILON: f64 = 1e-6;

/// Walks a stream's frames and decides which ones to inspect
#[derive(Debug, Clone)]
pub struct FrameSampler {
    policy: SamplingPolicy,
    fps: f64,
    /// Adaptive: first frame index eligible for inspection
    next_index: u64,
    /// Fixed cadence: index of the next cadence point `k * step`
    next_point: u64,
}

impl FrameSampler {
    /// Create a sampler for a stream with the given frame rate
    pub fn new(policy: SamplingPolicy, fps: f64) -> Self {
        Self {
            policy,
            fps,
            next_index: 0,
            next_point: 0,
        }
    }

    pub fn policy(&self) -> SamplingPolicy {
        self.policy
    }

    /// Frames to skip after an inspection with the given verdict
    pub fn skip_frames(&self, present: bool) -> u64 {
        match self.policy {
            SamplingPolicy::AdaptiveStep {
                step_present,
                step_absent,
            } => {
                let step = if present { step_present } else { step_absent };
                let frames = (step * self.fps).floor();
                if frames.is_finite() && frames > 0.0 {
                    frames as u64
                } else {
                    0
                }
            }
            SamplingPolicy::FixedCadenceBatched { .. } => 0,
        }
    }

    /// Decide whether this frame should be classified.
    ///
    /// Under a fixed cadence the decision also consumes the cadence point(s)
    /// the frame covers, so call this exactly once per decoded frame.
    pub fn select(&mut self, header: &FrameHeader) -> bool {
        match self.policy {
            SamplingPolicy::AdaptiveStep { .. } => header.index >= self.next_index,
            SamplingPolicy::FixedCadenceBatched { step, .. } => {
                let reached = header.timestamp + CADENCE_EPSILON;
                if reached < self.cadence_point(step) {
                    return false;
                }
                // sparse streams may cover several points with one frame
                while self.cadence_point(step) <= reached {
                    self.next_point += 1;
                }
                true
            }
        }
    }

    /// Feed back the verdict for an inspected frame
    pub fn record(&mut self, header: &FrameHeader, present: bool) {
        if let SamplingPolicy::AdaptiveStep { .. } = self.policy {
            // the cursor moves at least one frame whatever the skip
            self.next_index = header.index + 1 + self.skip_frames(present);
        }
    }

    /// Timestamp of the next frame the sampler will inspect
    pub fn next_timestamp(&self) -> f64 {
        match self.policy {
            SamplingPolicy::AdaptiveStep { .. } => self.next_index as f64 / self.fps,
            SamplingPolicy::FixedCadenceBatched { step, .. } => self.cadence_point(step),
        }
    }

    fn cadence_point(&self, step: f64) -> f64 {
        // multiply instead of accumulating to keep points exact
        self.next_point as f64 * step
    }
}
