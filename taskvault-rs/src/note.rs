//! Note line buffers and section-scoped task scanning.

use crate::error::{Result, VaultError};
use crate::parser::{parse_task_line, SectionScope};
use crate::types::Task;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// A note held as its sequence of lines.
///
/// Lines are split on `\n` only, so a `\r` before the newline stays part of
/// the line and every untouched line is written back byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Absolute path of the note.
    pub path: PathBuf,

    /// Lines without their `\n` terminators.
    pub lines: Vec<String>,

    /// Set when the file was not valid UTF-8 and `lines` hold replacement
    /// characters. Such a note can be scanned but not saved.
    lossy: bool,
}

impl Note {
    /// Build a note from raw content.
    pub fn new(path: impl Into<PathBuf>, content: &str) -> Self {
        let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        // A trailing newline leaves one empty tail element; empty content too.
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        Self {
            path: path.into(),
            lines,
            lossy: false,
        }
    }

    /// Read a note fresh from disk.
    ///
    /// Invalid UTF-8 is decoded lossily so the note can still be scanned.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        match String::from_utf8(bytes) {
            Ok(content) => Ok(Self::new(path, &content)),
            Err(err) => {
                tracing::warn!(path = %path.display(), "note is not valid UTF-8");
                let mut note = Self::new(path, &String::from_utf8_lossy(err.as_bytes()));
                note.lossy = true;
                Ok(note)
            }
        }
    }

    /// Whether the note was decoded lossily.
    pub fn is_lossy(&self) -> bool {
        self.lossy
    }

    /// Full content: lines joined with `\n` plus a trailing newline.
    pub fn content(&self) -> String {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }

    /// Rewrite the whole note to disk.
    ///
    /// A lossily decoded note is refused so its original bytes survive.
    pub fn save(&self) -> Result<()> {
        if self.lossy {
            return Err(VaultError::InvalidEncoding(self.path.clone()));
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, self.content())?;
        Ok(())
    }

    /// Index into `lines` for a 1-based line number.
    pub fn line_index(&self, line: usize) -> Result<usize> {
        if line == 0 || line > self.lines.len() {
            return Err(VaultError::LineOutOfRange {
                path: self.path.clone(),
                line,
                len: self.lines.len(),
            });
        }
        Ok(line - 1)
    }

    /// Tasks inside the section under `heading` (whole note if empty).
    ///
    /// Tasks without an explicit due date inherit `note_date`.
    pub fn tasks(&self, note_date: NaiveDate, heading: &str) -> Vec<Task> {
        scan_tasks(self.lines.iter().map(String::as_str), &self.path, note_date, heading)
    }
}

/// Scan lines for tasks within a heading-delimited section.
pub fn scan_tasks<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    file_path: &Path,
    note_date: NaiveDate,
    heading: &str,
) -> Vec<Task> {
    let mut scope = SectionScope::new(heading);
    let mut tasks = Vec::new();

    for (line_idx, line) in lines.into_iter().enumerate() {
        if !scope.advance(line) {
            continue;
        }
        if let Some(mut task) = parse_task_line(line, file_path, line_idx + 1) {
            if task.due.is_none() {
                task.due = Some(note_date);
            }
            tasks.push(task);
        }
    }

    tasks
}

/// Read one file and scan it.
///
/// Any read failure is returned as [`VaultError::Scan`]; no partial results.
pub fn scan_file(path: &Path, note_date: NaiveDate, heading: &str) -> Result<Vec<Task>> {
    let note = Note::load(path).map_err(|e| match e {
        VaultError::Io(source) => VaultError::Scan {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    let tasks = note.tasks(note_date, heading);
    tracing::debug!(path = %path.display(), tasks = tasks.len(), "scanned note");
    Ok(tasks)
}
