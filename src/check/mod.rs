//! Transcript checker.
//!
//! Compares what a host captured from the engine against the oracle, line by
//! line. The only tolerance is the terminator after the last line; every
//! other difference, whitespace and `\r` included, is a mismatch.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::oracle;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    /// 1-based line number.
    pub line: usize,
    /// `None` when the capture has an extra line.
    pub expected: Option<String>,
    /// `None` when the capture is missing this line.
    pub actual: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub expected_lines: usize,
    pub actual_lines: usize,
    pub mismatches: Vec<Mismatch>,
}

impl Report {
    pub fn is_pass(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Splits a capture into lines. One trailing `\n` closes the last line.
pub fn split_lines(captured: &str) -> Vec<&str> {
    if captured.is_empty() {
        return Vec::new();
    }
    let body = captured.strip_suffix('\n').unwrap_or(captured);
    body.split('\n').collect()
}

pub fn check(captured: &str) -> Report {
    compare(&oracle::run(), &split_lines(captured))
}

pub fn check_file(path: impl AsRef<Path>) -> Result<Report> {
    let path = path.as_ref();
    let captured = fs::read_to_string(path)
        .with_context(|| format!("reading transcript {}", path.display()))?;
    Ok(check(&captured))
}

fn compare(expected: &[String], actual: &[&str]) -> Report {
    let len = expected.len().max(actual.len());
    let mismatches: Vec<Mismatch> = (0..len)
        .filter_map(|i| {
            let exp = expected.get(i).map(String::as_str);
            let act = actual.get(i).copied();
            (exp != act).then(|| Mismatch {
                line: i + 1,
                expected: exp.map(str::to_string),
                actual: act.map(str::to_string),
            })
        })
        .collect();

    if mismatches.is_empty() {
        log::info!("transcript matches ({} lines)", expected.len());
    } else {
        log::warn!(
            "transcript mismatch: {} of {} lines differ",
            mismatches.len(),
            len
        );
    }

    Report {
        expected_lines: expected.len(),
        actual_lines: actual.len(),
        mismatches,
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.expected, &self.actual) {
            (Some(e), Some(a)) => write!(f, "line {}: expected {e:?}, got {a:?}", self.line),
            (Some(e), None) => write!(f, "line {}: missing {e:?}", self.line),
            (None, Some(a)) => write!(f, "line {}: unexpected {a:?}", self.line),
            (None, None) => write!(f, "line {}: ok", self.line),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            return write!(f, "PASS: {} lines match", self.expected_lines);
        }
        writeln!(
            f,
            "FAIL: {} mismatch(es) (expected {} lines, got {})",
            self.mismatches.len(),
            self.expected_lines,
            self.actual_lines
        )?;
        for (i, m) in self.mismatches.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {m}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
