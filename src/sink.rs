//! Append-only output sink.
//!
//! A line is an ordered list of fragments joined by one space, which is how
//! `console.log("Sum:", 15)` lays out its arguments.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::value::Value;

/// Mirror target, relative to the working directory.
pub const MIRROR_PATH: &str = "logs/run_latest.log";

/// `DEMO_ORACLE_OUTPUT_LOG=1|true|yes|on` turns the file mirror on.
fn mirror_requested() -> bool {
    std::env::var("DEMO_ORACLE_OUTPUT_LOG").is_ok_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

/// Starts a fresh mirror file for this run. `None` if it cannot be created.
fn open_mirror(path: &Path) -> Option<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok()?;
    }
    match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
    {
        Ok(file) => Some(file),
        Err(e) => {
            log::warn!("output mirror disabled: {}: {e}", path.display());
            None
        }
    }
}

/* --- Sink ------------------------------------------------------------ */
#[derive(Debug, Default)]
pub struct OutputSink {
    lines: Vec<String>,
    mirror: Option<File>,
}

impl OutputSink {
    /// In-memory only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`OutputSink::new`], but also copies each emitted line to
    /// [`MIRROR_PATH`] when `DEMO_ORACLE_OUTPUT_LOG` is set.
    pub fn mirrored() -> Self {
        if mirror_requested() {
            Self::mirrored_to(MIRROR_PATH)
        } else {
            Self::new()
        }
    }

    /// Copies each emitted line to `path`, replacing whatever it held.
    pub fn mirrored_to(path: impl AsRef<Path>) -> Self {
        Self {
            lines: Vec::new(),
            mirror: open_mirror(path.as_ref()),
        }
    }

    /// Appends one line built from `fragments`.
    pub fn log(&mut self, fragments: &[Value]) {
        let line = fragments
            .iter()
            .map(Value::render)
            .collect::<Vec<_>>()
            .join(" ");
        self.push(line);
    }

    pub fn blank(&mut self) {
        self.push(String::new());
    }

    fn push(&mut self, line: String) {
        log::debug!("sink: {line}");
        if let Some(file) = self.mirror.as_mut() {
            // A failing mirror never affects the transcript.
            if writeln!(file, "{line}").is_err() {
                self.mirror = None;
            }
        }
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}
