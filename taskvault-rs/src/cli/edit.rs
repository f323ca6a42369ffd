//! Task mutation commands: `toggle`, `delete`, `edit` and `add`.

use crate::cli::args::{AddArgs, EditArgs, LocatorArgs};
use crate::cli::output::Output;
use crate::cli::tasks::TaskView;
use crate::error::{Result, VaultError};
use crate::parser::parse_relative_date;
use crate::session::Session;
use crate::types::TaskLocation;
use crate::vault::Vault;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub action: &'static str,
    pub task: TaskView,
}

#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub path: String,
    pub due: NaiveDate,
    pub message: String,
}

/// Parse a `FILE:LINE` locator.
///
/// FILE is resolved against the vault root; a bare `YYYY-MM-DD` names that
/// day's daily note.
pub fn parse_locator(vault: &Vault, locator: &str) -> Result<TaskLocation> {
    let (file, line) = locator
        .rsplit_once(':')
        .ok_or_else(|| VaultError::InvalidLocator(locator.to_string()))?;

    let line: usize = line
        .trim()
        .parse()
        .map_err(|_| VaultError::InvalidLocator(locator.to_string()))?;
    if file.is_empty() || line == 0 {
        return Err(VaultError::InvalidLocator(locator.to_string()));
    }

    let file = match NaiveDate::parse_from_str(file, "%Y-%m-%d") {
        Ok(date) => vault.daily_note_path(date)?,
        Err(_) => vault.resolve_path(Path::new(file)),
    };

    Ok(TaskLocation { file, line })
}

pub fn toggle(session: &mut Session<'_>, vault: &Vault, args: &LocatorArgs, output: &Output) -> Result<()> {
    let location = parse_locator(vault, &args.task)?;
    let task = session.toggle(&location)?;
    output.print(&TaskResponse {
        action: if task.done { "done" } else { "undone" },
        task: TaskView::new(&task, &vault.root),
    })
}

pub fn delete(session: &mut Session<'_>, vault: &Vault, args: &LocatorArgs, output: &Output) -> Result<()> {
    let location = parse_locator(vault, &args.task)?;
    let task = session.delete(&location)?;
    output.info(&format!("Deleted {}", args.task));
    output.print(&TaskResponse {
        action: "deleted",
        task: TaskView::new(&task, &vault.root),
    })
}

pub fn edit(session: &mut Session<'_>, vault: &Vault, args: &EditArgs, output: &Output) -> Result<()> {
    let location = parse_locator(vault, &args.task)?;
    let task = session.edit_description(&location, &args.description)?;
    output.print(&TaskResponse {
        action: "edited",
        task: TaskView::new(&task, &vault.root),
    })
}

pub fn add(session: &mut Session<'_>, vault: &Vault, args: &AddArgs, output: &Output) -> Result<()> {
    let due = args
        .due
        .as_deref()
        .map(|value| {
            parse_relative_date(value, session.today())
                .ok_or_else(|| VaultError::InvalidDate(value.to_string()))
        })
        .transpose()?;

    let (path, due) = session.create(&args.text, due)?;
    let relative = path.strip_prefix(&vault.root).unwrap_or(&path);
    output.print(&AddResponse {
        path: relative.display().to_string(),
        due,
        message: format!("Added task to {}", relative.display()),
    })
}
