//! Task view commands: `list` and `board`.

use crate::categorize::DateGroup;
use crate::cli::args::{BoardArgs, ListArgs};
use crate::cli::output::Output;
use crate::error::Result;
use crate::session::Session;
use crate::types::Task;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

/// A task as shown by the CLI, with its path relative to the vault.
#[derive(Debug, Serialize)]
pub struct TaskView {
    /// `FILE:LINE`, accepted by the mutation commands.
    pub locator: String,
    pub description: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<NaiveDate>,
}

impl TaskView {
    pub fn new(task: &Task, root: &Path) -> Self {
        let file = task.location.file.strip_prefix(root).unwrap_or(&task.location.file);
        Self {
            locator: format!("{}:{}", file.display(), task.location.line),
            description: task.description.clone(),
            done: task.done,
            tags: task.tags.clone(),
            due: task.due,
            completed: task.completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub today: NaiveDate,
    pub count: usize,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Serialize)]
pub struct GroupView {
    pub date: NaiveDate,
    pub label: String,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Serialize)]
pub struct BoardOutput {
    pub today: NaiveDate,
    pub overdue: Vec<TaskView>,
    pub due_today: Vec<TaskView>,
    pub upcoming: Vec<GroupView>,
    pub logbook: Vec<GroupView>,
}

pub fn list(session: &mut Session<'_>, root: &Path, args: &ListArgs, output: &Output) -> Result<()> {
    if let Some(filter) = &args.filter {
        session.set_filter(filter.as_str());
    }

    let tasks: Vec<TaskView> = session
        .visible()
        .filter(|task| args.done.is_none_or(|done| task.done == done))
        .map(|task| TaskView::new(task, root))
        .collect();

    output.print(&ListOutput {
        today: session.today(),
        count: tasks.len(),
        tasks,
    })
}

pub fn board(session: &mut Session<'_>, root: &Path, args: &BoardArgs, output: &Output) -> Result<()> {
    if let Some(filter) = &args.filter {
        session.set_filter(filter.as_str());
    }

    let tasks = session.tasks();
    let views = |indices: &[usize]| -> Vec<TaskView> {
        indices.iter().map(|&idx| TaskView::new(&tasks[idx], root)).collect()
    };
    let groups = |groups: &[DateGroup]| -> Vec<GroupView> {
        groups
            .iter()
            .map(|group| GroupView {
                date: group.date,
                label: group.label.clone(),
                tasks: views(&group.tasks),
            })
            .collect()
    };

    let categories = session.categories();
    output.print(&BoardOutput {
        today: session.today(),
        overdue: views(&categories.overdue),
        due_today: views(&categories.today),
        upcoming: groups(&categories.upcoming),
        logbook: groups(&categories.logbook),
    })
}
