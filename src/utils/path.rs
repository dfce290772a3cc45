//! Input discovery helpers

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{CatClipError, CatClipResult};

/// Lowercase extension of a path, if any
pub fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Video files directly inside `dir`, sorted by file name.
///
/// Only regular files whose extension matches one of `extensions`
/// (case-insensitive) are returned. Subdirectories are not searched.
pub fn discover_videos(dir: &Path, extensions: &[String]) -> CatClipResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CatClipError::InputDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut videos = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            CatClipError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = extension_lowercase(entry.path())
            .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext)))
            .unwrap_or(false);
        if matches {
            videos.push(entry.into_path());
        } else {
            debug!("Ignoring non-video file {}", entry.path().display());
        }
    }
    Ok(videos)
}

/// File name of a video, used as its id in every table
pub fn video_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        vec!["mp4".to_string(), "mkv".to_string()]
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let temp = tempfile::tempdir().unwrap();
        for name in ["b.MP4", "a.mp4", "notes.txt", "c.mkv", "d.avi"] {
            std::fs::write(temp.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(temp.path().join("nested.mp4")).unwrap();
        std::fs::write(temp.path().join("nested.mp4").join("inner.mp4"), b"").unwrap();

        let found: Vec<String> = discover_videos(temp.path(), &exts())
            .unwrap()
            .iter()
            .map(|p| video_id(p))
            .collect();
        assert_eq!(found, vec!["a.mp4", "b.MP4", "c.mkv"]);
    }

    #[test]
    fn test_missing_dir() {
        let temp = tempfile::tempdir().unwrap();
        let err = discover_videos(&temp.path().join("nope"), &exts()).unwrap_err();
        assert!(matches!(err, CatClipError::InputDirNotFound { .. }));
    }
}
