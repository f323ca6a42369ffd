//! Shared types for taskvault.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A checkbox task found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Location of the task at the last scan.
    pub location: TaskLocation,

    /// The raw task line as it appears in the note.
    pub raw: String,

    /// The task description (without tags and date markers).
    pub description: String,

    /// Checkbox state.
    pub done: bool,

    /// Tags in order of appearance, including the leading `#`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Due date, explicit or inherited from the note's date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,

    /// Completion date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<NaiveDate>,
}

impl Task {
    /// Case-insensitive match against the description and tags.
    /// An empty filter matches everything.
    pub fn matches_filter(&self, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        let needle = filter.to_lowercase();
        self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// Location of a task: file path plus 1-based line number.
///
/// Only valid until the next structural edit of the file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskLocation {
    /// Absolute path of the owning note.
    pub file: PathBuf,

    /// Line number (1-indexed).
    pub line: usize,
}

impl std::fmt::Display for TaskLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}
