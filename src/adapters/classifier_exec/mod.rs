//! Detector process classifier adapter
//!
//! Talks to a long-lived detector process over its standard streams. For each
//! batch it writes one JSON header line followed by the raw RGB24 bytes of
//! every frame, then reads one JSON line holding the detections per frame.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::config::DetectionConfig;
use crate::domain::model::FrameImage;
use crate::error::{CatClipError, CatClipResult};
use crate::ports::Classifier;

const TOOL: &str = "detector";

/// Header line preceding each batch of frames
#[derive(Debug, Serialize)]
struct BatchHeader<'a> {
    frames: usize,
    width: u32,
    height: u32,
    model: &'a str,
}

/// One detected object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Detection {
    pub class_id: u32,
    pub confidence: f64,
}

/// Detector reply for one batch, one list per frame
#[derive(Debug, Deserialize)]
struct BatchResponse {
    detections: Vec<Vec<Detection>>,
}

struct DetectorProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Classifier backed by an external detector program
pub struct ExecClassifier {
    command: Vec<String>,
    model: String,
    threshold: f64,
    target_classes: Vec<u32>,
    process: Option<DetectorProcess>,
}

impl ExecClassifier {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            command: config.detector_command.clone(),
            model: config.model_path.clone(),
            threshold: config.confidence_threshold,
            target_classes: config.target_classes.clone(),
            process: None,
        }
    }

    /// Start the detector now instead of on the first batch
    pub fn start(&mut self) -> CatClipResult<()> {
        if self.process.is_none() {
            self.process = Some(self.spawn()?);
        }
        Ok(())
    }

    fn spawn(&self) -> CatClipResult<DetectorProcess> {
        let (program, args) = self.command.split_first().ok_or_else(|| CatClipError::ToolUnavailable {
            tool: TOOL.to_string(),
            message: "empty detector command".to_string(),
        })?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| CatClipError::ToolUnavailable {
                tool: TOOL.to_string(),
                message: format!("cannot start {}: {}", program, e),
            })?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        match (stdin, stdout) {
            (Some(stdin), Some(stdout)) => {
                info!("Started detector {} (pid {})", program, child.id());
                Ok(DetectorProcess {
                    child,
                    stdin,
                    stdout: BufReader::new(stdout),
                })
            }
            _ => {
                let _ = child.kill();
                Err(CatClipError::ToolUnavailable {
                    tool: TOOL.to_string(),
                    message: "detector pipes unavailable".to_string(),
                })
            }
        }
    }

    fn exchange(process: &mut DetectorProcess, header: &str, frames: &[FrameImage]) -> CatClipResult<String> {
        let io_error = |e: std::io::Error| CatClipError::tool(TOOL, e.to_string());

        process.stdin.write_all(header.as_bytes()).map_err(io_error)?;
        process.stdin.write_all(b"\n").map_err(io_error)?;
        for frame in frames {
            process.stdin.write_all(&frame.data).map_err(io_error)?;
        }
        process.stdin.flush().map_err(io_error)?;

        let mut line = String::new();
        let read = process.stdout.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Err(CatClipError::tool(TOOL, "detector closed its output"));
        }
        Ok(line)
    }

    fn stop(&mut self) {
        if let Some(mut process) = self.process.take() {
            drop(process.stdin);
            match process.child.wait() {
                Ok(status) => debug!("Detector exited with {}", status),
                Err(e) => warn!("Failed to wait for detector: {}", e),
            }
        }
    }
}

impl Classifier for ExecClassifier {
    fn classify(&mut self, frames: &[FrameImage]) -> CatClipResult<Vec<bool>> {
        let Some(first) = frames.first() else {
            return Ok(Vec::new());
        };
        if let Some(odd) = frames
            .iter()
            .find(|f| f.width != first.width || f.height != first.height || f.data.len() != f.expected_len())
        {
            return Err(CatClipError::tool(
                TOOL,
                format!(
                    "frame {} is {}x{} with {} bytes, batch expects {}x{}",
                    odd.header.index,
                    odd.width,
                    odd.height,
                    odd.data.len(),
                    first.width,
                    first.height
                ),
            ));
        }

        let header = serde_json::to_string(&BatchHeader {
            frames: frames.len(),
            width: first.width,
            height: first.height,
            model: &self.model,
        })?;

        self.start()?;
        let result = match self.process.as_mut() {
            Some(process) => Self::exchange(process, &header, frames),
            None => Err(CatClipError::tool(TOOL, "detector not running")),
        };
        let line = match result {
            Ok(line) => line,
            Err(e) => {
                // the stream position is unknown now, restart on the next batch
                if let Some(mut process) = self.process.take() {
                    let _ = process.child.kill();
                    let _ = process.child.wait();
                }
                return Err(e);
            }
        };

        let detections = parse_response(&line, frames.len())?;
        Ok(detections
            .iter()
            .map(|objects| is_present(objects, &self.target_classes, self.threshold))
            .collect())
    }
}

impl Drop for ExecClassifier {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Parse a reply line and check it covers every frame of the batch
fn parse_response(line: &str, expected: usize) -> CatClipResult<Vec<Vec<Detection>>> {
    let response: BatchResponse = serde_json::from_str(line.trim())
        .map_err(|e| CatClipError::tool(TOOL, format!("malformed reply: {}", e)))?;
    if response.detections.len() != expected {
        return Err(CatClipError::tool(
            TOOL,
            format!(
                "reply has {} results for {} frames",
                response.detections.len(),
                expected
            ),
        ));
    }
    Ok(response.detections)
}

/// A frame is positive if any target-class detection reaches the threshold
pub fn is_present(detections: &[Detection], target_classes: &[u32], threshold: f64) -> bool {
    detections
        .iter()
        .any(|d| target_classes.contains(&d.class_id) && d.confidence >= threshold)
}
