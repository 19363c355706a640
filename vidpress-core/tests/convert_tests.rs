//! Integration tests for the conversion runner.
//!
//! These drive `convert_files` against small shell scripts standing in for
//! the real ffmpeg binary, so exit-status and missing-output handling can be
//! exercised without an actual encoder.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use chrono::Local;
use vidpress_core::config::{Codec, ConversionConfig};
use vidpress_core::reporting::RunReport;
use vidpress_core::{convert_files, write_reports};

/// Writes an executable stub encoder script and returns its path.
fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Stub that writes one byte to its last argument (the output path) and
/// exits 0, mimicking a successful encode.
fn succeeding_encoder(dir: &Path) -> PathBuf {
    write_stub(
        dir,
        "ffmpeg-ok",
        r#"for a in "$@"; do out="$a"; done
printf 'x' > "$out"
exit 0"#,
    )
}

fn failing_encoder(dir: &Path) -> PathBuf {
    write_stub(dir, "ffmpeg-fail", "exit 1")
}

/// Stub that exits 0 without producing any output file.
fn silent_encoder(dir: &Path) -> PathBuf {
    write_stub(dir, "ffmpeg-silent", "exit 0")
}

fn input_file(dir: &Path, name: &str, bytes: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![0u8; bytes]).unwrap();
    path
}

#[test]
fn successful_conversion_records_sizes_and_ratio() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let input = input_file(dir.path(), "a.mp4", 100);

    let mut config = ConversionConfig::new(Codec::H264);
    config.ffmpeg_path = succeeding_encoder(dir.path());

    let results = convert_files(&config, &[input.clone()], &out_dir).unwrap();

    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert!(r.success);
    assert_eq!(r.input_path, input);
    assert_eq!(r.original_size, 100);
    assert_eq!(r.converted_size, 1);
    assert_eq!(r.compression_ratio, 99.0);
    assert!(r.output_path.ends_with("a_h264.mp4"));
    assert!(r.output_path.is_file());
}

#[test]
fn nonzero_exit_marks_file_failed_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let a = input_file(dir.path(), "a.mp4", 50);
    let b = input_file(dir.path(), "b.mp4", 50);

    let mut config = ConversionConfig::new(Codec::H264);
    config.ffmpeg_path = failing_encoder(dir.path());

    let results = convert_files(&config, &[a, b], &out_dir).unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| !r.success));
    assert!(results.iter().all(|r| r.converted_size == 0));
}

#[test]
fn zero_exit_with_missing_output_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let input = input_file(dir.path(), "a.mkv", 50);

    let mut config = ConversionConfig::new(Codec::Hevc);
    config.ffmpeg_path = silent_encoder(dir.path());

    let results = convert_files(&config, &[input], &out_dir).unwrap();

    assert_eq!(results.len(), 1);
    assert!(!results[0].success);
}

#[test]
fn two_pass_invokes_encoder_twice() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let input = input_file(dir.path(), "a.mp4", 50);

    // Stub counts its invocations and only writes output when the args
    // contain "-pass 2"
    let counter = dir.path().join("count");
    let stub = write_stub(
        dir.path(),
        "ffmpeg-2pass",
        &format!(
            r#"echo run >> {count}
pass2=0
prev=""
for a in "$@"; do
  if [ "$prev" = "-pass" ] && [ "$a" = "2" ]; then pass2=1; fi
  prev="$a"
  out="$a"
done
if [ "$pass2" = "1" ]; then printf 'xx' > "$out"; fi
exit 0"#,
            count = counter.display()
        ),
    );

    let mut config = ConversionConfig::new(Codec::H264);
    config.ffmpeg_path = stub;
    config.two_pass = true;

    let results = convert_files(&config, &[input], &out_dir).unwrap();

    assert!(results[0].success);
    assert_eq!(results[0].converted_size, 2);

    let runs = fs::read_to_string(&counter).unwrap();
    assert_eq!(runs.lines().count(), 2);
}

#[test]
fn failed_first_pass_skips_second_pass() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let input = input_file(dir.path(), "a.mp4", 50);

    let counter = dir.path().join("count");
    let stub = write_stub(
        dir.path(),
        "ffmpeg-firstfail",
        &format!("echo run >> {}\nexit 1", counter.display()),
    );

    let mut config = ConversionConfig::new(Codec::H264);
    config.ffmpeg_path = stub;
    config.two_pass = true;

    let results = convert_files(&config, &[input], &out_dir).unwrap();

    assert!(!results[0].success);
    let runs = fs::read_to_string(&counter).unwrap();
    assert_eq!(runs.lines().count(), 1);
}

#[test]
fn mixed_run_report_reflects_partial_success() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let good = input_file(dir.path(), "good.mp4", 100);
    let bad = input_file(dir.path(), "bad.mp4", 100);

    // Stub fails whenever the input path contains "bad"
    let stub = write_stub(
        dir.path(),
        "ffmpeg-mixed",
        r#"case "$*" in *bad*) exit 1 ;; esac
for a in "$@"; do out="$a"; done
printf 'x' > "$out"
exit 0"#,
    );

    let mut config = ConversionConfig::new(Codec::H264);
    config.ffmpeg_path = stub;

    let started = Local::now();
    let results = convert_files(&config, &[bad, good], &out_dir).unwrap();
    let report = RunReport::from_results(results, started, 2.0);

    assert_eq!(report.total_files, 2);
    assert_eq!(report.successful_conversions, 1);
    assert!(!report.all_succeeded());

    // Reports land next to the converted files
    let (json_path, text_path) = write_reports(&report, &out_dir).unwrap();
    assert!(json_path.is_file());
    assert!(text_path.is_file());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["total_files"], 2);
    assert_eq!(json["successful_conversions"], 1);

    let text = fs::read_to_string(&text_path).unwrap();
    assert!(text.contains("[FAIL] bad.mp4"));
    assert!(text.contains("[OK]   good.mp4"));
}
