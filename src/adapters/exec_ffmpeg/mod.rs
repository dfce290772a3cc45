//! FFmpeg execution adapter
//!
//! Runs the `ffmpeg` binary as one subprocess per operation. An operation
//! succeeds only if the process exits cleanly and the output file exists.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::config::SpliceConfig;
use crate::engine::{copy, ReencodeSettings};
use crate::error::{CatClipError, CatClipResult};
use crate::output::writer::write_atomic;
use crate::ports::{MediaTool, Method, ToolOutcome};
use crate::utils::time::format_seconds;

const CONCAT_LIST_NAME: &str = "concat_list.txt";

/// `MediaTool` backed by the ffmpeg command line
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    program: String,
    reencode: ReencodeSettings,
    /// Directory for the concat list file
    scratch_dir: PathBuf,
}

impl FfmpegTool {
    pub fn new(config: &SpliceConfig, scratch_dir: &Path) -> Self {
        Self {
            program: config.ffmpeg.clone(),
            reencode: ReencodeSettings::from_config(config),
            scratch_dir: scratch_dir.to_path_buf(),
        }
    }

    pub fn concat_list_path(&self) -> PathBuf {
        self.scratch_dir.join(CONCAT_LIST_NAME)
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-y", "-hide_banner", "-loglevel", "error"]);
        cmd
    }

    fn run(&self, args: Vec<OsString>, dest: &Path) -> ToolOutcome {
        if let Err(e) = remove_stale(dest) {
            return ToolOutcome::Failed {
                stderr: format!("cannot remove stale {}: {}", dest.display(), e),
            };
        }

        let mut cmd = self.command();
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        debug!("Running {} {:?}", self.program, args);

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) => {
                return ToolOutcome::Failed {
                    stderr: format!("failed to run {}: {}", self.program, e),
                }
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return ToolOutcome::Failed {
                stderr: format!("{} exited with {}\n{}", self.program, output.status, stderr),
            };
        }
        if !dest.is_file() {
            return ToolOutcome::Failed {
                stderr: format!("{} produced no output at {}\n{}", self.program, dest.display(), stderr),
            };
        }
        ToolOutcome::Succeeded {
            output_path: dest.to_path_buf(),
        }
    }
}

impl MediaTool for FfmpegTool {
    fn check_available(&self) -> CatClipResult<()> {
        let status = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| CatClipError::ToolUnavailable {
                tool: self.program.clone(),
                message: e.to_string(),
            })?;
        if !status.success() {
            return Err(CatClipError::ToolUnavailable {
                tool: self.program.clone(),
                message: format!("-version exited with {}", status),
            });
        }
        Ok(())
    }

    fn cut(&self, source: &Path, start: f64, end: f64, dest: &Path, method: Method) -> ToolOutcome {
        let args = match method {
            Method::StreamCopy => copy::cut_args(source, start, end, dest),
            Method::Reencode => self.reencode.cut_args(source, start, end, dest),
        };
        self.run(args, dest)
    }

    fn concat(&self, clips: &[PathBuf], dest: &Path, method: Method) -> ToolOutcome {
        let list = self.concat_list_path();
        if let Err(e) = write_atomic(&list, concat_list(clips).as_bytes()) {
            return ToolOutcome::Failed {
                stderr: format!("cannot write {}: {}", list.display(), e),
            };
        }
        let args = match method {
            Method::StreamCopy => copy::concat_args(&list, dest),
            Method::Reencode => self.reencode.concat_args(&list, dest),
        };
        self.run(args, dest)
    }

    fn snapshot(&self, source: &Path, at: f64, dest: &Path) -> ToolOutcome {
        let args: Vec<OsString> = vec![
            "-ss".into(),
            format_seconds(at).into(),
            "-i".into(),
            source.as_os_str().to_owned(),
            "-frames:v".into(),
            "1".into(),
            "-q:v".into(),
            "2".into(),
            dest.as_os_str().to_owned(),
        ];
        self.run(args, dest)
    }
}

/// Concat demuxer list with absolute paths and escaped single quotes
pub fn concat_list(clips: &[PathBuf]) -> String {
    let mut text = String::new();
    for clip in clips {
        let absolute = clip.canonicalize().unwrap_or_else(|_| clip.to_path_buf());
        let escaped = absolute.to_string_lossy().replace('\'', "'\\''");
        text.push_str(&format!("file '{}'\n", escaped));
    }
    text
}

fn remove_stale(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
