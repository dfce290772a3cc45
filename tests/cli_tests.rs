//! Command-line behaviour of the `catclip` binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const WORK_DIR: &str = ".tmp_catclipper";

fn catclip(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("catclip").unwrap();
    cmd.current_dir(cwd);
    for var in [
        "CATCLIP_INPUT_DIR",
        "CATCLIP_OUTPUT_DIR",
        "CATCLIP_THRESHOLD",
        "CATCLIP_MERGE_GAP",
        "CATCLIP_MODEL",
        "CATCLIP_FFMPEG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Input and output directories with a timestamps table ready to merge
fn detected_workspace(rows: &str) -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(temp.path().join("footage")).unwrap();
    let work = temp.path().join("out").join(WORK_DIR);
    std::fs::create_dir_all(&work).unwrap();
    std::fs::write(
        work.join("cat_timestamps.csv"),
        format!("video,start,end\n{}", rows),
    )
    .unwrap();
    temp
}

fn merged_table(temp: &TempDir) -> String {
    std::fs::read_to_string(
        temp.path()
            .join("out")
            .join(WORK_DIR)
            .join("cat_timestamps_merged.csv"),
    )
    .unwrap()
}

#[test]
fn test_help_lists_commands() {
    let temp = tempfile::tempdir().unwrap();
    catclip(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("splice"));
}

#[test]
fn test_missing_input_dir_fails() {
    let temp = tempfile::tempdir().unwrap();
    catclip(temp.path())
        .args(["run", "--input-dir", "no-such-footage"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input directory not found"));
}

#[test]
fn test_unknown_sampling_mode_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    catclip(temp.path())
        .args(["detect", "--sampling", "sometimes"])
        .assert()
        .failure();
}

#[test]
fn test_out_of_range_threshold_fails() {
    let temp = detected_workspace("");
    catclip(temp.path())
        .args(["merge", "-i", "footage", "-o", "out", "--threshold", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_merge_without_timestamps_fails() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(temp.path().join("footage")).unwrap();
    catclip(temp.path())
        .args(["merge", "-i", "footage", "-o", "out"])
        .assert()
        .failure();
}

#[test]
fn test_merge_writes_fragment_table() {
    let temp = detected_workspace("a.mp4,10.00,14.00\na.mp4,22.00,25.00\n");
    catclip(temp.path())
        .args(["merge", "-i", "footage", "-o", "out"])
        .assert()
        .success();

    assert_eq!(merged_table(&temp), "video,start,end\na.mp4,8.00,27.00\n");
    assert!(temp.path().join("out").join(WORK_DIR).join("merge.ok").is_file());
}

#[test]
fn test_merge_gap_flag_beats_env_and_file() {
    let temp = detected_workspace("a.mp4,10.00,14.00\na.mp4,22.00,25.00\n");
    std::fs::write(
        temp.path().join("catclip.toml"),
        "[postprocess]\nmax_merge_gap = 10.0\n",
    )
    .unwrap();

    catclip(temp.path())
        .env("CATCLIP_MERGE_GAP", "8")
        .args(["merge", "-i", "footage", "-o", "out", "--merge-gap", "3"])
        .assert()
        .success();

    assert_eq!(
        merged_table(&temp),
        "video,start,end\na.mp4,8.00,16.00\na.mp4,20.00,27.00\n"
    );
}

#[test]
fn test_env_overrides_config_file() {
    let temp = detected_workspace("a.mp4,10.00,14.00\na.mp4,22.00,25.00\n");
    std::fs::write(
        temp.path().join("catclip.toml"),
        "[postprocess]\nmax_merge_gap = 10.0\n",
    )
    .unwrap();

    catclip(temp.path())
        .env("CATCLIP_MERGE_GAP", "1")
        .args(["merge", "-i", "footage", "-o", "out"])
        .assert()
        .success();

    assert_eq!(
        merged_table(&temp),
        "video,start,end\na.mp4,8.00,16.00\na.mp4,20.00,27.00\n"
    );
}

#[test]
fn test_merge_reruns_with_new_gap() {
    let temp = detected_workspace("a.mp4,10.00,14.00\na.mp4,22.00,25.00\n");
    catclip(temp.path())
        .args(["merge", "-i", "footage", "-o", "out"])
        .assert()
        .success();
    assert_eq!(merged_table(&temp), "video,start,end\na.mp4,8.00,27.00\n");

    catclip(temp.path())
        .args(["merge", "-i", "footage", "-o", "out", "--merge-gap", "3"])
        .assert()
        .success();
    assert_eq!(
        merged_table(&temp),
        "video,start,end\na.mp4,8.00,16.00\na.mp4,20.00,27.00\n"
    );
}
