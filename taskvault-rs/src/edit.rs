//! Single-line task mutations.
//!
//! Every operation re-reads the note from disk, changes exactly one line (or
//! inserts one), and rewrites the whole note. Line numbers of later lines in
//! the same note shift after a delete or insert, so callers must reload
//! before using any other locator into that note.

use crate::error::Result;
use crate::note::Note;
use crate::parser::task::{DATE_FORMAT, DONE_EMOJI, DONE_REGEX, DUE_EMOJI};
use crate::types::Task;
use chrono::NaiveDate;

/// Flip a task's checkbox on disk and in `task`.
///
/// Marking done appends `✅ <today>`; marking undone removes the marker.
pub fn toggle_done(task: &mut Task, today: NaiveDate) -> Result<()> {
    let mut note = Note::load(&task.location.file)?;
    let idx = note.line_index(task.location.line)?;

    let line = toggle_line(&note.lines[idx], task.done, today);
    note.lines[idx] = line.clone();
    note.save()?;

    task.done = !task.done;
    task.completed = task.done.then_some(today);
    task.raw = line;
    tracing::debug!(location = %task.location, done = task.done, "toggled task");
    Ok(())
}

/// Remove a task's line from its note.
pub fn delete_task(task: &Task) -> Result<()> {
    let mut note = Note::load(&task.location.file)?;
    let idx = note.line_index(task.location.line)?;
    note.lines.remove(idx);
    note.save()?;
    tracing::debug!(location = %task.location, "deleted task");
    Ok(())
}

/// Replace a task's line with `new_line`.
///
/// The caller is responsible for encoding tags and dates into `new_line`.
pub fn update_task_line(task: &mut Task, new_line: &str) -> Result<()> {
    let mut note = Note::load(&task.location.file)?;
    let idx = note.line_index(task.location.line)?;
    note.lines[idx] = new_line.to_string();
    note.save()?;
    task.raw = new_line.to_string();
    tracing::debug!(location = %task.location, "updated task line");
    Ok(())
}

/// The toggled form of a single task line.
pub fn toggle_line(line: &str, done: bool, today: NaiveDate) -> String {
    let (body, cr) = match line.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (line, ""),
    };

    let mut result = if done {
        let checked = [body.find("[x]"), body.find("[X]")].into_iter().flatten().min();
        match checked {
            Some(pos) => format!("{}[ ]{}", &body[..pos], &body[pos + 3..]),
            None => body.to_string(),
        }
    } else {
        body.replacen("[ ]", "[x]", 1)
    };

    result = DONE_REGEX.replace_all(&result, "").trim_end().to_string();
    if !done {
        result.push_str(&format!(" {} {}", DONE_EMOJI, today.format(DATE_FORMAT)));
    }
    result.push_str(cr);
    result
}

/// Line written for a newly created task.
pub fn new_task_line(description: &str, due: NaiveDate) -> String {
    format!("- [ ] {} {} {}", description.trim(), DUE_EMOJI, due.format(DATE_FORMAT))
}

/// Content of a daily note created to hold its first task.
pub fn new_note_content(created: NaiveDate, heading: &str, task_line: &str) -> String {
    let mut content = format!("---\ncreated: {}\n---\n\n", created.format(DATE_FORMAT));
    if !heading.trim().is_empty() {
        content.push_str(heading.trim());
        content.push_str("\n\n");
    }
    content.push_str(task_line);
    content.push_str("\n\n---\n");
    content
}

/// Insert `task_line` below `heading`, after any blank lines following it.
///
/// Without the heading, a blank line, the heading, another blank line and
/// the task are appended. An empty heading appends the task at the end.
pub fn insert_under_heading(lines: &mut Vec<String>, heading: &str, task_line: String) {
    let heading = heading.trim();
    if heading.is_empty() {
        lines.push(task_line);
        return;
    }

    match lines.iter().position(|l| l.trim() == heading) {
        Some(heading_idx) => {
            let mut idx = heading_idx + 1;
            while idx < lines.len() && lines[idx].trim().is_empty() {
                idx += 1;
            }
            lines.insert(idx, task_line);
        }
        None => {
            lines.push(String::new());
            lines.push(heading.to_string());
            lines.push(String::new());
            lines.push(task_line);
        }
    }
}
