//! Pipeline tests with synthetic videos, a scripted classifier and a
//! recording media tool

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use catclip_cli::app::{DetectInteractor, MergeInteractor, RunInteractor, SpliceInteractor};
use catclip_cli::domain::config::AppConfig;
use catclip_cli::domain::model::{FrameHeader, FrameImage, Interval, VideoMetadata};
use catclip_cli::engine::PolicyTable;
use catclip_cli::output::{table, Stage, WorkLayout};
use catclip_cli::planner::SamplingPolicy;
use catclip_cli::ports::{Classifier, FrameSource, MediaTool, Method, ToolOutcome, VideoOpener};
use catclip_cli::{CatClipError, CatClipResult};
use tempfile::TempDir;

/// Video whose frames sit on an exact `index / fps` grid
#[derive(Debug, Clone)]
struct SyntheticVideo {
    fps: f64,
    duration: f64,
    /// Half-open `[from, to)` ranges where the cat is visible
    presence: Vec<(f64, f64)>,
}

impl SyntheticVideo {
    fn new(fps: f64, duration: f64, presence: &[(f64, f64)]) -> Self {
        Self {
            fps,
            duration,
            presence: presence.to_vec(),
        }
    }

    fn present_at(&self, t: f64) -> bool {
        self.presence.iter().any(|&(from, to)| t >= from && t < to)
    }
}

struct SyntheticSource {
    video: SyntheticVideo,
    metadata: VideoMetadata,
    next: u64,
    current: Option<FrameHeader>,
}

impl FrameSource for SyntheticSource {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn next_frame(&mut self) -> CatClipResult<Option<FrameHeader>> {
        if self.next as i64 >= self.metadata.frame_count {
            return Ok(None);
        }
        let header = FrameHeader {
            index: self.next,
            timestamp: self.next as f64 / self.video.fps,
        };
        self.next += 1;
        self.current = Some(header);
        Ok(Some(header))
    }

    fn current_image(&mut self) -> CatClipResult<FrameImage> {
        let header = self.current.expect("frame decoded");
        let value = if self.video.present_at(header.timestamp) { 255 } else { 0 };
        Ok(FrameImage {
            header,
            width: 1,
            height: 1,
            data: vec![value, 0, 0],
        })
    }
}

#[derive(Clone, Default)]
struct SyntheticOpener {
    videos: HashMap<String, SyntheticVideo>,
    opened: Rc<RefCell<Vec<String>>>,
}

impl SyntheticOpener {
    fn with(mut self, name: &str, video: SyntheticVideo) -> Self {
        self.videos.insert(name.to_string(), video);
        self
    }
}

impl VideoOpener for SyntheticOpener {
    fn open(&self, path: &Path) -> CatClipResult<Box<dyn FrameSource>> {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.opened.borrow_mut().push(name.clone());
        let video = self.videos.get(&name).cloned().expect("known video");
        let frame_count = (video.duration * video.fps).round() as i64;
        Ok(Box::new(SyntheticSource {
            metadata: VideoMetadata {
                fps: video.fps,
                frame_count,
                duration: video.duration,
                width: 1,
                height: 1,
            },
            video,
            next: 0,
            current: None,
        }))
    }
}

/// Reads the verdict painted into the first pixel
#[derive(Clone, Default)]
struct ScriptedClassifier {
    seen: Rc<RefCell<Vec<(f64, bool)>>>,
    batches: Rc<RefCell<Vec<usize>>>,
}

impl Classifier for ScriptedClassifier {
    fn classify(&mut self, frames: &[FrameImage]) -> CatClipResult<Vec<bool>> {
        self.batches.borrow_mut().push(frames.len());
        let verdicts: Vec<bool> = frames.iter().map(|f| f.data[0] > 127).collect();
        for (frame, present) in frames.iter().zip(&verdicts) {
            self.seen.borrow_mut().push((frame.header.timestamp, *present));
        }
        Ok(verdicts)
    }
}

/// Media tool that records calls and writes placeholder outputs
#[derive(Default)]
struct RecordingTool {
    fail_copy_concat: bool,
    calls: RefCell<Vec<String>>,
}

impl RecordingTool {
    fn produce(dest: &Path) -> ToolOutcome {
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(dest, b"media").unwrap();
        ToolOutcome::Succeeded {
            output_path: dest.to_path_buf(),
        }
    }
}

impl MediaTool for RecordingTool {
    fn check_available(&self) -> CatClipResult<()> {
        Ok(())
    }

    fn cut(&self, source: &Path, start: f64, end: f64, dest: &Path, method: Method) -> ToolOutcome {
        self.calls.borrow_mut().push(format!(
            "cut {} {:.2} {:.2} {}",
            source.file_name().unwrap().to_string_lossy(),
            start,
            end,
            method
        ));
        Self::produce(dest)
    }

    fn concat(&self, clips: &[PathBuf], dest: &Path, method: Method) -> ToolOutcome {
        self.calls
            .borrow_mut()
            .push(format!("concat {} {}", clips.len(), method));
        if self.fail_copy_concat && method == Method::StreamCopy {
            return ToolOutcome::Failed {
                stderr: "Non-monotonous DTS in output stream".to_string(),
            };
        }
        Self::produce(dest)
    }

    fn snapshot(&self, source: &Path, at: f64, dest: &Path) -> ToolOutcome {
        self.calls.borrow_mut().push(format!(
            "snapshot {} {:.2} {}",
            source.file_name().unwrap().to_string_lossy(),
            at,
            dest.file_name().unwrap().to_string_lossy()
        ));
        Self::produce(dest)
    }
}

struct Workspace {
    _temp: TempDir,
    config: AppConfig,
    layout: WorkLayout,
}

fn workspace(videos: &[&str], sampling: SamplingPolicy) -> Workspace {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("footage");
    let output = temp.path().join("out");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::create_dir_all(&output).unwrap();
    for video in videos {
        std::fs::write(input.join(video), b"not really a video").unwrap();
    }

    let mut config = AppConfig::default();
    config.paths.input_dir = input;
    config.paths.output_dir = output;
    config.detection.sampling = sampling;
    config.display.progress = false;
    config.validate().unwrap();

    Workspace {
        layout: WorkLayout::new(&config.paths),
        config,
        _temp: temp,
    }
}

fn fixed(step: f64, batch_size: usize) -> SamplingPolicy {
    SamplingPolicy::FixedCadenceBatched { step, batch_size }
}

fn detect(ws: &Workspace, opener: &SyntheticOpener, classifier: &ScriptedClassifier, tool: &Arc<RecordingTool>) -> DetectInteractor {
    DetectInteractor::new(
        &ws.config,
        Box::new(opener.clone()),
        Box::new(classifier.clone()),
        Arc::clone(tool) as Arc<dyn MediaTool>,
    )
}

fn iv(video: &str, start: f64, end: f64) -> Interval {
    Interval::new(video, start, end).unwrap()
}

fn scenario_video() -> SyntheticVideo {
    SyntheticVideo::new(25.0, 30.0, &[(4.0, 4.9), (10.0, 14.0)])
}

#[test]
fn test_end_to_end_scenario() {
    let ws = workspace(&["a.mp4"], fixed(0.1, 4));
    let opener = SyntheticOpener::default().with("a.mp4", scenario_video());
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    let report = detect(&ws, &opener, &classifier, &tool).execute().unwrap();
    assert_eq!(report.videos_scanned, 1);
    assert_eq!(report.intervals_found, 1);
    assert_eq!(
        table::read(&ws.layout.timestamps).unwrap(),
        vec![iv("a.mp4", 10.0, 14.0)]
    );
    assert!(ws.layout.marker(Stage::Detect).exists());

    let merge = MergeInteractor::new(&ws.config).execute().unwrap();
    assert_eq!(merge.fragments, 1);
    assert_eq!(
        table::read(&ws.layout.merged_timestamps).unwrap(),
        vec![iv("a.mp4", 8.0, 16.0)]
    );
    assert!(ws.layout.marker(Stage::Merge).exists());

    let splice = SpliceInteractor::new(&ws.config, PolicyTable::default(), Arc::clone(&tool) as Arc<dyn MediaTool>)
        .execute()
        .unwrap();
    assert_eq!(splice.fragments_cut, 1);
    assert!(ws.layout.final_video.is_file());
    assert_eq!(
        *tool.calls.borrow(),
        vec!["cut a.mp4 8.00 16.00 stream-copy", "concat 1 stream-copy"]
    );
}

#[test]
fn test_batch_cadence_scenario() {
    let ws = workspace(&["cam.mp4"], fixed(0.25, 3));
    let opener = SyntheticOpener::default().with("cam.mp4", SyntheticVideo::new(20.0, 2.0, &[(1.0, 1.55)]));
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    detect(&ws, &opener, &classifier, &tool).execute().unwrap();

    let seen = classifier.seen.borrow();
    let sampled: Vec<f64> = seen.iter().map(|(t, _)| *t).collect();
    assert_eq!(sampled, vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75]);
    let present: Vec<f64> = seen.iter().filter(|(_, p)| *p).map(|(t, _)| *t).collect();
    assert_eq!(present, vec![1.0, 1.25, 1.5]);
    assert_eq!(*classifier.batches.borrow(), vec![3, 3, 2]);
}

#[test]
fn test_adaptive_sampling_closes_at_duration() {
    let ws = workspace(&["yard.mp4"], SamplingPolicy::default());
    let opener = SyntheticOpener::default().with("yard.mp4", SyntheticVideo::new(25.0, 10.0, &[(3.0, 100.0)]));
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    detect(&ws, &opener, &classifier, &tool).execute().unwrap();

    let rows = table::read(&ws.layout.timestamps).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].end, 10.0);
    assert!(rows[0].start >= 3.0 && rows[0].start < 3.3);

    // one classifier call per frame, sparser once the cat is visible
    assert!(classifier.batches.borrow().iter().all(|&n| n == 1));
    let seen = classifier.seen.borrow();
    let gaps: Vec<f64> = seen.windows(2).map(|w| w[1].0 - w[0].0).collect();
    assert!(gaps.iter().any(|g| (g - 0.28).abs() < 1e-9));
    assert!(gaps.iter().any(|g| (g - 1.04).abs() < 1e-9));
}

#[test]
fn test_resume_skips_processed_videos() {
    let ws = workspace(&["a.mp4", "b.mp4"], fixed(0.1, 4));
    std::fs::create_dir_all(&ws.layout.work_dir).unwrap();
    std::fs::write(&ws.layout.processed_log, "a.mp4\n").unwrap();
    table::write(&ws.layout.timestamps, &[iv("a.mp4", 1.0, 3.0)]).unwrap();

    let opener = SyntheticOpener::default()
        .with("a.mp4", scenario_video())
        .with("b.mp4", SyntheticVideo::new(25.0, 5.0, &[(1.0, 3.0)]));
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    let report = detect(&ws, &opener, &classifier, &tool).execute().unwrap();
    assert_eq!(report.videos_skipped, 1);
    assert_eq!(report.videos_scanned, 1);
    assert_eq!(*opener.opened.borrow(), vec!["b.mp4"]);
    assert_eq!(
        table::read(&ws.layout.timestamps).unwrap(),
        vec![iv("a.mp4", 1.0, 3.0), iv("b.mp4", 1.0, 3.0)]
    );
    let ledger = std::fs::read_to_string(&ws.layout.processed_log).unwrap();
    assert_eq!(ledger, "a.mp4\nb.mp4\n");
}

#[test]
fn test_rescanned_video_replaces_stale_rows() {
    let ws = workspace(&["a.mp4"], fixed(0.1, 4));
    std::fs::create_dir_all(&ws.layout.work_dir).unwrap();
    // crash after storing but before the ledger entry
    table::write(&ws.layout.timestamps, &[iv("a.mp4", 10.0, 14.0), iv("a.mp4", 20.0, 22.0)]).unwrap();

    let opener = SyntheticOpener::default().with("a.mp4", scenario_video());
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());
    detect(&ws, &opener, &classifier, &tool).execute().unwrap();

    assert_eq!(
        table::read(&ws.layout.timestamps).unwrap(),
        vec![iv("a.mp4", 10.0, 14.0)]
    );
}

#[test]
fn test_unreadable_metadata_skips_only_that_video() {
    let ws = workspace(&["a.mp4", "broken.mp4"], fixed(0.1, 4));
    let opener = SyntheticOpener::default()
        .with("a.mp4", scenario_video())
        .with("broken.mp4", SyntheticVideo::new(0.0, 12.0, &[]));
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    let report = detect(&ws, &opener, &classifier, &tool).execute().unwrap();
    assert_eq!(report.videos_failed, 1);
    assert_eq!(report.videos_scanned, 1);
    let ledger = std::fs::read_to_string(&ws.layout.processed_log).unwrap();
    assert!(!ledger.contains("broken.mp4"));
    assert!(!ws.layout.marker(Stage::Detect).exists());
}

#[test]
fn test_failed_video_is_retried_next_run() {
    let ws = workspace(&["a.mp4", "broken.mp4"], fixed(0.1, 4));
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    let first = SyntheticOpener::default()
        .with("a.mp4", scenario_video())
        .with("broken.mp4", SyntheticVideo::new(0.0, 12.0, &[]));
    detect(&ws, &first, &classifier, &tool).execute().unwrap();

    let repaired = SyntheticOpener::default()
        .with("a.mp4", scenario_video())
        .with("broken.mp4", SyntheticVideo::new(25.0, 12.0, &[(2.0, 5.0)]));
    let report = detect(&ws, &repaired, &classifier, &tool).execute().unwrap();

    assert!(!report.stage_skipped);
    assert_eq!(report.videos_skipped, 1);
    assert_eq!(report.videos_scanned, 1);
    assert_eq!(*repaired.opened.borrow(), vec!["broken.mp4"]);
    assert_eq!(
        table::read(&ws.layout.timestamps).unwrap(),
        vec![iv("a.mp4", 10.0, 14.0), iv("broken.mp4", 2.0, 5.0)]
    );
    assert!(ws.layout.marker(Stage::Detect).exists());
}

#[test]
fn test_new_fragment_list_is_cut_afresh() {
    let ws = workspace(&["b.mp4"], fixed(0.1, 4));
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());
    let splice = || SpliceInteractor::new(&ws.config, PolicyTable::default(), Arc::clone(&tool) as Arc<dyn MediaTool>);

    let opener = SyntheticOpener::default().with("b.mp4", scenario_video());
    detect(&ws, &opener, &classifier, &tool).execute().unwrap();
    MergeInteractor::new(&ws.config).execute().unwrap();
    splice().execute().unwrap();
    tool.calls.borrow_mut().clear();

    // a new video shows up and detection runs again
    std::fs::write(ws.config.paths.input_dir.join("a.mp4"), b"footage").unwrap();
    ws.layout.marker(Stage::Detect).clear().unwrap();
    let opener = opener.with("a.mp4", SyntheticVideo::new(25.0, 40.0, &[(20.0, 25.0)]));
    detect(&ws, &opener, &classifier, &tool).execute().unwrap();
    MergeInteractor::new(&ws.config).execute().unwrap();
    let report = splice().execute().unwrap();

    assert_eq!(report.fragments_reused, 0);
    assert_eq!(report.fragments_cut, 2);
    assert_eq!(
        *tool.calls.borrow(),
        vec![
            "cut a.mp4 18.00 27.00 stream-copy",
            "cut b.mp4 8.00 16.00 stream-copy",
            "concat 2 stream-copy"
        ]
    );
}

#[test]
fn test_unchanged_merge_keeps_cut_fragments() {
    let ws = workspace(&["a.mp4"], fixed(0.1, 4));
    let opener = SyntheticOpener::default().with("a.mp4", scenario_video());
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    detect(&ws, &opener, &classifier, &tool).execute().unwrap();
    MergeInteractor::new(&ws.config).execute().unwrap();
    SpliceInteractor::new(&ws.config, PolicyTable::default(), Arc::clone(&tool) as Arc<dyn MediaTool>)
        .execute()
        .unwrap();

    assert!(MergeInteractor::new(&ws.config).execute().unwrap().stage_skipped);
    let report = SpliceInteractor::new(&ws.config, PolicyTable::default(), Arc::clone(&tool) as Arc<dyn MediaTool>)
        .execute()
        .unwrap();
    assert_eq!(report.fragments_reused, 1);
    assert_eq!(report.fragments_cut, 0);
}

#[test]
fn test_changed_merge_settings_rebuild_fragments() {
    let mut ws = workspace(&["a.mp4"], fixed(0.1, 4));
    std::fs::create_dir_all(&ws.layout.frags_dir).unwrap();
    table::write(&ws.layout.timestamps, &[iv("a.mp4", 10.0, 14.0), iv("a.mp4", 22.0, 25.0)]).unwrap();

    let first = MergeInteractor::new(&ws.config).execute().unwrap();
    assert_eq!(first.fragments, 1);
    std::fs::write(ws.layout.frags_dir.join("frag_0001.mp4"), b"old clip").unwrap();

    ws.config.postprocess.max_merge_gap = 3.0;
    let second = MergeInteractor::new(&ws.config).execute().unwrap();
    assert!(!second.stage_skipped);
    assert_eq!(
        table::read(&ws.layout.merged_timestamps).unwrap(),
        vec![iv("a.mp4", 8.0, 16.0), iv("a.mp4", 20.0, 27.0)]
    );
    assert!(!ws.layout.frags_dir.join("frag_0001.mp4").exists());

    let third = MergeInteractor::new(&ws.config).execute().unwrap();
    assert!(third.stage_skipped);
    assert_eq!(third.fragments, 2);
}

#[test]
fn test_detect_marker_skips_stage_and_rerun_clears_merge_marker() {
    let ws = workspace(&["a.mp4"], fixed(0.1, 4));
    let opener = SyntheticOpener::default().with("a.mp4", scenario_video());
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    detect(&ws, &opener, &classifier, &tool).execute().unwrap();
    MergeInteractor::new(&ws.config).execute().unwrap();

    let second = detect(&ws, &opener, &classifier, &tool).execute().unwrap();
    assert!(second.stage_skipped);
    assert_eq!(opener.opened.borrow().len(), 1);
    assert!(ws.layout.marker(Stage::Merge).exists());

    ws.layout.marker(Stage::Detect).clear().unwrap();
    let third = detect(&ws, &opener, &classifier, &tool).execute().unwrap();
    assert!(!third.stage_skipped);
    assert!(!ws.layout.marker(Stage::Merge).exists());
}

#[test]
fn test_no_videos_is_fatal() {
    let ws = workspace(&[], fixed(0.1, 4));
    std::fs::write(ws.config.paths.input_dir.join("notes.txt"), b"").unwrap();
    let opener = SyntheticOpener::default();
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    let err = detect(&ws, &opener, &classifier, &tool).execute().unwrap_err();
    assert!(matches!(err, CatClipError::NoUsableWork { .. }));
}

#[test]
fn test_save_detect_frames_snapshots_interval_edges() {
    let mut ws = workspace(&["a.mp4"], fixed(0.1, 4));
    ws.config.detection.save_detect_frames = true;
    let opener = SyntheticOpener::default().with("a.mp4", scenario_video());
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    detect(&ws, &opener, &classifier, &tool).execute().unwrap();

    let calls = tool.calls.borrow();
    assert!(calls.contains(&"snapshot a.mp4 10.00 a.mp4-10.00-start.jpg".to_string()));
    assert!(calls.contains(&"snapshot a.mp4 14.00 a.mp4-14.00-end.jpg".to_string()));
    assert!(ws.layout.frags_dir.join("a.mp4-10.00-start.jpg").is_file());
}

#[test]
fn test_full_run_writes_report_and_cleans_up() {
    let ws = workspace(&["a.mp4", "b.mp4"], fixed(0.1, 4));
    let opener = SyntheticOpener::default()
        .with("a.mp4", scenario_video())
        .with("b.mp4", SyntheticVideo::new(25.0, 20.0, &[(2.0, 4.0), (9.0, 12.0)]));
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool {
        fail_copy_concat: true,
        ..RecordingTool::default()
    });

    let mut run = RunInteractor::new(
        &ws.config,
        detect(&ws, &opener, &classifier, &tool),
        MergeInteractor::new(&ws.config),
        SpliceInteractor::new(&ws.config, PolicyTable::default(), Arc::clone(&tool) as Arc<dyn MediaTool>),
    );
    let report = run.execute().unwrap();

    assert_eq!(report.detect.videos_scanned, 2);
    assert_eq!(report.detect.intervals_found, 3);
    // b.mp4: (0,6) and (7,14) are 1s apart and merge
    assert_eq!(report.merge.fragments, 2);
    assert_eq!(report.splice.concat_method, Method::Reencode);
    assert!(report.cleaned_up);
    assert!(!ws.layout.work_dir.exists());
    assert!(ws.layout.final_video.is_file());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&ws.layout.report).unwrap()).unwrap();
    assert_eq!(json["splice"]["concat_method"], "Reencode");
    assert!(json["started_at"].as_str().unwrap().contains('T'));
}

#[test]
fn test_run_keeps_work_dir_when_asked() {
    let mut ws = workspace(&["a.mp4"], fixed(0.1, 4));
    ws.config.splice.delete_temp_files = false;
    let opener = SyntheticOpener::default().with("a.mp4", scenario_video());
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    let mut run = RunInteractor::new(
        &ws.config,
        detect(&ws, &opener, &classifier, &tool),
        MergeInteractor::new(&ws.config),
        SpliceInteractor::new(&ws.config, PolicyTable::default(), Arc::clone(&tool) as Arc<dyn MediaTool>),
    );
    let report = run.execute().unwrap();
    assert!(!report.cleaned_up);
    assert!(ws.layout.frags_dir.join("frag_0001.mp4").is_file());
}

/// Log sink shared between the subscriber and the test
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_short_intervals_are_logged_at_info() {
    let ws = workspace(&["a.mp4"], fixed(0.1, 4));
    let opener = SyntheticOpener::default().with("a.mp4", scenario_video());
    let classifier = ScriptedClassifier::default();
    let tool = Arc::new(RecordingTool::default());

    let logs = CapturedLogs::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        detect(&ws, &opener, &classifier, &tool).execute().unwrap();
    });

    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(text.contains("Interval shorter than minimum, dropped"));
    assert!(text.contains("start=4.0"));
}
