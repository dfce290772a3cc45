//! Fragment extraction and final concatenation

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::model::Fragment;
use crate::engine::{run_with_fallback, PolicyTable};
use crate::error::{CatClipError, CatClipResult};
use crate::ports::{MediaTool, Method};
use crate::utils::progress::ProgressFactory;

/// Outcome of one splice run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpliceReport {
    pub fragments_cut: usize,
    pub fragments_reused: usize,
    pub fragments_skipped: usize,
    /// Cuts that needed the fallback method
    pub cut_fallbacks: usize,
    pub concat_method: Method,
    pub output_path: PathBuf,
}

/// Cuts fragments out of their source videos and joins them in order
pub struct Splicer<'a> {
    tool: &'a dyn MediaTool,
    policies: PolicyTable,
    input_dir: PathBuf,
    frags_dir: PathBuf,
    progress: ProgressFactory,
}

impl<'a> Splicer<'a> {
    pub fn new(tool: &'a dyn MediaTool, policies: PolicyTable, input_dir: &Path, frags_dir: &Path) -> Self {
        Self {
            tool,
            policies,
            input_dir: input_dir.to_path_buf(),
            frags_dir: frags_dir.to_path_buf(),
            progress: ProgressFactory::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressFactory) -> Self {
        self.progress = progress;
        self
    }

    /// Path of the n-th fragment clip (1-based)
    pub fn fragment_path(&self, number: usize) -> PathBuf {
        self.frags_dir.join(format!("frag_{:04}.mp4", number))
    }

    /// Cut every fragment, then concatenate the clips into `final_path`.
    ///
    /// Missing sources and failed cuts are skipped. Fails with
    /// `NoUsableWork` when no clip exists to join or the join produced no
    /// output.
    pub fn splice(&self, fragments: &[Fragment], final_path: &Path) -> CatClipResult<SpliceReport> {
        std::fs::create_dir_all(&self.frags_dir)?;

        let mut clips = Vec::with_capacity(fragments.len());
        let mut cut = 0;
        let mut reused = 0;
        let mut skipped = 0;
        let mut cut_fallbacks = 0;
        let bar = self.progress.bar(fragments.len() as u64, "cut");

        for (idx, fragment) in fragments.iter().enumerate() {
            bar.inc(1);
            let clip = self.fragment_path(idx + 1);
            if clip.is_file() {
                info!("Reusing existing fragment {}", clip.display());
                clips.push(clip);
                reused += 1;
                continue;
            }

            match self.cut_fragment(fragment, &clip) {
                Ok(fell_back) => {
                    clips.push(clip);
                    cut += 1;
                    if fell_back {
                        cut_fallbacks += 1;
                    }
                }
                Err(e) => {
                    warn!(video = %fragment.video_id, start = fragment.start, end = fragment.end, "Skipping fragment: {}", e);
                    skipped += 1;
                }
            }
        }

        bar.finish_and_clear();

        if clips.is_empty() {
            return Err(CatClipError::NoUsableWork {
                message: format!("none of {} fragments could be cut", fragments.len()),
            });
        }

        info!("Concatenating {} clips into {}", clips.len(), final_path.display());
        let run = run_with_fallback(&self.policies.concat, "concat", |method| {
            self.tool.concat(&clips, final_path, method)
        })
        .map_err(|e| CatClipError::NoUsableWork {
            message: format!("final video was not produced: {}", e),
        })?;

        if !final_path.is_file() {
            return Err(CatClipError::NoUsableWork {
                message: format!("{} missing after concatenation", final_path.display()),
            });
        }

        Ok(SpliceReport {
            fragments_cut: cut,
            fragments_reused: reused,
            fragments_skipped: skipped,
            cut_fallbacks,
            concat_method: run.method,
            output_path: final_path.to_path_buf(),
        })
    }

    /// Cut one fragment through a temporary file; returns whether the
    /// fallback method was needed
    fn cut_fragment(&self, fragment: &Fragment, clip: &Path) -> CatClipResult<bool> {
        let source = self.input_dir.join(&fragment.video_id);
        if !source.is_file() {
            return Err(CatClipError::SourceMissing { path: source });
        }

        let tmp = clip.with_extension("tmp.mp4");
        let run = run_with_fallback(&self.policies.cut, "cut", |method| {
            self.tool.cut(&source, fragment.start, fragment.end, &tmp, method)
        });
        let run = match run {
            Ok(run) => run,
            Err(e) => {
                let _ = std::fs::remove_file(&tmp);
                return Err(e);
            }
        };

        std::fs::rename(&tmp, clip)?;
        info!(
            "Cut {} -> {} ({})",
            fragment,
            clip.display(),
            run.method
        );
        Ok(run.fell_back)
    }
}
