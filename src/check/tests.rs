//! Unit tests for the transcript checker.

use std::io::Write;

use super::{check, check_file, split_lines, Mismatch};
use crate::oracle::transcript;

#[test]
fn exact_transcript_passes() {
    let report = check(&transcript());
    assert!(report.is_pass(), "{report}");
    assert_eq!(report.expected_lines, 22);
    assert_eq!(report.actual_lines, 22);
}

#[test]
fn missing_final_newline_still_passes() {
    let captured = transcript();
    assert!(check(captured.trim_end_matches('\n')).is_pass());
}

#[test]
fn changed_line_is_reported_with_its_number() {
    let captured = transcript().replace("Sum: 15", "Sum: 16");
    let report = check(&captured);
    assert_eq!(
        report.mismatches,
        vec![Mismatch {
            line: 12,
            expected: Some("Sum: 15".into()),
            actual: Some("Sum: 16".into()),
        }]
    );
}

#[test]
fn whitespace_differences_fail() {
    let report = check(&transcript().replace("[ 1, 2, 3, 4, 5 ]", "[1, 2, 3, 4, 5]"));
    assert!(!report.is_pass());

    let report = check(&transcript().replace("Sum: 15", "Sum: 15 "));
    assert_eq!(report.mismatches.len(), 1);
}

#[test]
fn crlf_capture_fails() {
    let report = check(&transcript().replace('\n', "\r\n"));
    assert!(!report.is_pass());
}

#[test]
fn extra_trailing_blank_line_fails() {
    let mut captured = transcript();
    captured.push('\n');
    let report = check(&captured);
    assert_eq!(
        report.mismatches,
        vec![Mismatch {
            line: 23,
            expected: None,
            actual: Some(String::new()),
        }]
    );
}

#[test]
fn truncated_capture_lists_missing_lines() {
    let captured: String = transcript().lines().take(20).map(|l| format!("{l}\n")).collect();
    let report = check(&captured);
    assert_eq!(report.mismatches.len(), 2);
    assert_eq!(report.mismatches[1].line, 22);
    assert_eq!(report.mismatches[1].actual, None);
    assert!(report.to_string().contains("missing \"=== Demo Complete ===\""));
}

#[test]
fn empty_capture_misses_everything() {
    assert!(split_lines("").is_empty());
    assert_eq!(check("").mismatches.len(), 22);
}

#[test]
fn check_file_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(transcript().as_bytes()).expect("write");
    let report = check_file(file.path()).expect("readable");
    assert!(report.is_pass());
}

#[test]
fn check_file_reports_missing_path() {
    let err = check_file("does/not/exist.txt").unwrap_err();
    assert!(err.to_string().contains("reading transcript"));
}
