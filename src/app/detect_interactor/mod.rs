// Detect interactor - Scans every input video for target intervals

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::config::{AppConfig, DetectionConfig};
use crate::domain::model::{FrameImage, Interval, Observation};
use crate::domain::tracker::{IntervalTracker, TrackerEvent};
use crate::error::{CatClipError, CatClipResult};
use crate::output::{table, IntervalStore, ResumeLedger, Stage, WorkLayout};
use crate::planner::FrameSampler;
use crate::ports::{Classifier, MediaTool, VideoOpener};
use crate::utils::path::{discover_videos, video_id};
use crate::utils::progress::ProgressFactory;
use crate::utils::time::format_duration;

/// Outcome of the detection stage
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectReport {
    pub videos_found: usize,
    pub videos_scanned: usize,
    /// Already listed in the resume ledger
    pub videos_skipped: usize,
    pub videos_failed: usize,
    pub intervals_found: usize,
    /// The whole stage was skipped because its marker exists
    pub stage_skipped: bool,
}

/// Interactor for the detection stage
pub struct DetectInteractor {
    layout: WorkLayout,
    detection: DetectionConfig,
    video_extensions: Vec<String>,
    opener: Box<dyn VideoOpener>,
    classifier: Box<dyn Classifier>,
    media: Arc<dyn MediaTool>,
    progress: ProgressFactory,
}

impl DetectInteractor {
    /// Create new detect interactor with injected ports
    pub fn new(
        config: &AppConfig,
        opener: Box<dyn VideoOpener>,
        classifier: Box<dyn Classifier>,
        media: Arc<dyn MediaTool>,
    ) -> Self {
        Self {
            layout: WorkLayout::new(&config.paths),
            detection: config.detection.clone(),
            video_extensions: config.paths.video_extensions.clone(),
            opener,
            classifier,
            media,
            progress: ProgressFactory::new(config.display.progress),
        }
    }

    /// Scan all videos not yet in the ledger and store their intervals.
    ///
    /// Per-video failures are logged and skipped. The `detect.ok` marker is
    /// written last, and only when no video failed, so failed videos are
    /// retried by the next run.
    pub fn execute(&mut self) -> CatClipResult<DetectReport> {
        let videos = discover_videos(&self.layout.input_dir, &self.video_extensions)?;
        if videos.is_empty() {
            return Err(CatClipError::NoUsableWork {
                message: format!("no videos found in {}", self.layout.input_dir.display()),
            });
        }
        let mut report = DetectReport {
            videos_found: videos.len(),
            ..DetectReport::default()
        };

        let marker = self.layout.marker(Stage::Detect);
        if marker.exists() && self.layout.timestamps.is_file() {
            info!("Detection already complete, skipping ({})", marker.path().display());
            report.stage_skipped = true;
            return Ok(report);
        }

        self.layout.ensure_dirs()?;
        self.layout.marker(Stage::Merge).clear()?;

        let mut ledger = ResumeLedger::open(&self.layout.processed_log)?;
        let store = IntervalStore::new(&self.layout.timestamps);
        info!("Found {} videos, {} already processed", videos.len(), ledger.len());

        let videos_bar = self.progress.bar(videos.len() as u64, "videos");
        for (n, path) in videos.iter().enumerate() {
            videos_bar.inc(1);
            let id = video_id(path);
            if ledger.is_done(&id) {
                debug!(video = %id, "Already processed, skipping");
                report.videos_skipped += 1;
                continue;
            }

            info!(video = %id, "Scanning video {}/{}", n + 1, videos.len());
            let started = Instant::now();
            match self.scan_video(path, &id) {
                Ok(intervals) => {
                    store.append_intervals(&id, &intervals)?;
                    ledger.mark_done(&id)?;
                    info!(
                        video = %id,
                        "Found {} intervals in {}",
                        intervals.len(),
                        format_duration(started.elapsed())
                    );
                    report.videos_scanned += 1;
                    report.intervals_found += intervals.len();
                }
                Err(e) if e.is_per_item() => {
                    warn!(video = %id, "Skipping video: {}", e);
                    report.videos_failed += 1;
                }
                Err(e) => return Err(e),
            }
        }
        videos_bar.finish_and_clear();

        if !self.layout.timestamps.exists() {
            table::write(&self.layout.timestamps, &[])?;
        }
        if report.videos_failed == 0 {
            marker.write()?;
        } else {
            warn!(
                "{} videos failed, {} not written so they are retried next run",
                report.videos_failed,
                marker.path().display()
            );
        }
        info!(
            "Detection finished: {} scanned, {} skipped, {} failed, {} intervals",
            report.videos_scanned, report.videos_skipped, report.videos_failed, report.intervals_found
        );
        Ok(report)
    }

    /// Decode one video, classify the sampled frames and track intervals
    fn scan_video(&mut self, path: &Path, id: &str) -> CatClipResult<Vec<Interval>> {
        let mut source = self.opener.open(path)?;
        let metadata = source.metadata().clone();
        metadata.validate(id)?;
        debug!(
            video = %id,
            fps = metadata.fps,
            frames = metadata.frame_count,
            duration = metadata.duration,
            "Video metadata"
        );

        let mut sampler = FrameSampler::new(self.detection.sampling, metadata.fps);
        let mut tracker = IntervalTracker::new(id, self.detection.min_duration);
        let batch_size = self.detection.sampling.batch_size().max(1);
        let mut batch: Vec<FrameImage> = Vec::with_capacity(batch_size);
        let frames_bar = self.progress.bar(metadata.frame_count.max(0) as u64, id);

        while let Some(header) = source.next_frame()? {
            frames_bar.set_position(header.index + 1);
            if !sampler.select(&header) {
                continue;
            }
            batch.push(source.current_image()?);
            if batch.len() >= batch_size {
                self.classify_batch(&mut batch, &mut sampler, &mut tracker, path)?;
            }
        }
        self.classify_batch(&mut batch, &mut sampler, &mut tracker, path)?;
        frames_bar.finish_and_clear();

        if let Some(event) = tracker.finish(metadata.duration) {
            self.on_event(&event, path, id);
        }
        Ok(tracker.into_intervals())
    }

    fn classify_batch(
        &mut self,
        batch: &mut Vec<FrameImage>,
        sampler: &mut FrameSampler,
        tracker: &mut IntervalTracker,
        path: &Path,
    ) -> CatClipResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let verdicts = self.classifier.classify(batch)?;
        if verdicts.len() != batch.len() {
            return Err(CatClipError::tool(
                "classifier",
                format!("{} verdicts for {} frames", verdicts.len(), batch.len()),
            ));
        }

        for (frame, present) in batch.iter().zip(verdicts) {
            sampler.record(&frame.header, present);
            let observation = Observation::new(tracker.video_id(), frame.header.timestamp, present);
            if let Some(event) = tracker.observe(&observation) {
                self.on_event(&event, path, tracker.video_id());
            }
        }
        batch.clear();
        Ok(())
    }

    fn on_event(&self, event: &TrackerEvent, path: &Path, id: &str) {
        match event {
            TrackerEvent::Opened { at } => {
                info!(video = %id, start = at, "Target appeared");
                self.save_detect_frame(path, id, *at, "start");
            }
            TrackerEvent::Closed(interval) => {
                info!(video = %id, start = interval.start, end = interval.end, "Interval closed");
                self.save_detect_frame(path, id, interval.end, "end");
            }
            TrackerEvent::Dropped { start, end } => {
                info!(video = %id, start, end, "Interval shorter than minimum, dropped");
            }
        }
    }

    fn save_detect_frame(&self, path: &Path, id: &str, at: f64, label: &str) {
        if !self.detection.save_detect_frames {
            return;
        }
        let dest = self
            .layout
            .frags_dir
            .join(format!("{}-{:.2}-{}.jpg", id, at, label));
        let outcome = self.media.snapshot(path, at, &dest);
        if !outcome.is_success() {
            warn!(video = %id, "Failed to save detect frame {}: {:?}", dest.display(), outcome);
        }
    }
}
