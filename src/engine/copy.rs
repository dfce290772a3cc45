//! Stream copy arguments for lossless, keyframe-aligned operations

use std::ffi::OsString;
use std::path::Path;

use crate::utils::time::format_seconds;

/// Arguments for cutting `[start, end]` of `source` into `dest` without
/// re-encoding.
///
/// Seeking before `-i` snaps to the nearest keyframe, so the cut may start
/// slightly early.
pub fn cut_args(source: &Path, start: f64, end: f64, dest: &Path) -> Vec<OsString> {
    vec![
        "-ss".into(),
        format_seconds(start).into(),
        "-to".into(),
        format_seconds(end).into(),
        "-i".into(),
        source.as_os_str().to_owned(),
        "-c".into(),
        "copy".into(),
        "-avoid_negative_ts".into(),
        "make_zero".into(),
        dest.as_os_str().to_owned(),
    ]
}

/// Arguments for joining the clips listed in a concat list file
pub fn concat_args(list: &Path, dest: &Path) -> Vec<OsString> {
    vec![
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-fflags".into(),
        "+genpts".into(),
        "-i".into(),
        list.as_os_str().to_owned(),
        "-c".into(),
        "copy".into(),
        "-movflags".into(),
        "+faststart".into(),
        dest.as_os_str().to_owned(),
    ]
}
