//! Date-based grouping of tasks into board views.

use crate::types::Task;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label format for date groups, e.g. `Sunday, Mar 01`.
pub const GROUP_LABEL_FORMAT: &str = "%A, %b %d";

/// Tasks sharing one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub label: String,
    /// Indices into the categorized task slice, in input order.
    pub tasks: Vec<usize>,
}

impl DateGroup {
    fn new(date: NaiveDate, tasks: Vec<usize>) -> Self {
        Self {
            date,
            label: group_label(date),
            tasks,
        }
    }
}

/// Display label for a date group.
pub fn group_label(date: NaiveDate) -> String {
    date.format(GROUP_LABEL_FORMAT).to_string()
}

/// The four board views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Overdue,
    Today,
    Upcoming,
    Logbook,
}

impl View {
    pub const ALL: [View; 4] = [View::Overdue, View::Today, View::Upcoming, View::Logbook];

    fn index(self) -> usize {
        self as usize
    }
}

/// Result of [`categorize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Categories {
    /// Not done and due before today, by ascending due date.
    pub overdue: Vec<usize>,
    /// Not done and due today.
    pub today: Vec<usize>,
    /// Not done and due after today, ascending by date.
    pub upcoming: Vec<DateGroup>,
    /// Done, descending by completion date.
    pub logbook: Vec<DateGroup>,
}

impl Categories {
    /// Task indices shown in `view`, in display order.
    pub fn view(&self, view: View) -> Vec<usize> {
        match view {
            View::Overdue => self.overdue.clone(),
            View::Today => self.today.clone(),
            View::Upcoming => flatten(&self.upcoming),
            View::Logbook => flatten(&self.logbook),
        }
    }

    /// Number of tasks shown in `view`.
    pub fn view_len(&self, view: View) -> usize {
        match view {
            View::Overdue => self.overdue.len(),
            View::Today => self.today.len(),
            View::Upcoming => self.upcoming.iter().map(|g| g.tasks.len()).sum(),
            View::Logbook => self.logbook.iter().map(|g| g.tasks.len()).sum(),
        }
    }

    /// Total number of categorized tasks.
    pub fn len(&self) -> usize {
        View::ALL.iter().map(|&v| self.view_len(v)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn flatten(groups: &[DateGroup]) -> Vec<usize> {
    groups.iter().flat_map(|g| g.tasks.iter().copied()).collect()
}

/// Filter and group `tasks` relative to `today`.
///
/// A task passes the filter when the filter is empty or appears,
/// case-insensitively, in its description or any tag.
pub fn categorize(tasks: &[Task], today: NaiveDate, filter: &str) -> Categories {
    let mut categories = Categories::default();
    let mut upcoming: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    let mut logbook: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();

    for (idx, task) in tasks.iter().enumerate() {
        if !task.matches_filter(filter) {
            continue;
        }

        if task.done {
            match task.completed.or(task.due) {
                Some(date) => logbook.entry(date).or_default().push(idx),
                None => tracing::debug!(location = %task.location, "done task without dates"),
            }
            continue;
        }

        let due = task.due.unwrap_or(today);
        if due < today {
            categories.overdue.push(idx);
        } else if due == today {
            categories.today.push(idx);
        } else {
            upcoming.entry(due).or_default().push(idx);
        }
    }

    categories.overdue.sort_by_key(|&idx| tasks[idx].due);
    categories.upcoming = upcoming
        .into_iter()
        .map(|(date, tasks)| DateGroup::new(date, tasks))
        .collect();
    categories.logbook = logbook
        .into_iter()
        .rev()
        .map(|(date, tasks)| DateGroup::new(date, tasks))
        .collect();

    categories
}

/// Active view plus a selected position in each view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub view: View,
    positions: [usize; 4],
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            view: View::Today,
            positions: [0; 4],
        }
    }
}

impl Cursor {
    /// Selected position in `view`.
    pub fn position(&self, view: View) -> usize {
        self.positions[view.index()]
    }

    /// Selected position in the active view.
    pub fn current(&self) -> usize {
        self.position(self.view)
    }

    /// Pull every position back inside the new view sizes.
    pub fn clamp(&mut self, categories: &Categories) {
        for view in View::ALL {
            let len = categories.view_len(view);
            let pos = &mut self.positions[view.index()];
            if *pos >= len {
                *pos = len.saturating_sub(1);
            }
        }
    }

    /// Move down in the active view, stopping at the last task.
    pub fn down(&mut self, categories: &Categories) {
        let len = categories.view_len(self.view);
        let pos = &mut self.positions[self.view.index()];
        if len > 0 {
            *pos = (*pos + 1).min(len - 1);
        }
    }

    /// Move up in the active view, stopping at the first task.
    pub fn up(&mut self) {
        let pos = &mut self.positions[self.view.index()];
        *pos = pos.saturating_sub(1);
    }

    /// Switch to the previous view, stopping at the first.
    pub fn left(&mut self) {
        self.view = View::ALL[self.view.index().saturating_sub(1)];
    }

    /// Switch to the next view, stopping at the last.
    pub fn right(&mut self) {
        self.view = View::ALL[(self.view.index() + 1).min(View::ALL.len() - 1)];
    }

    /// Task index under the cursor, if the active view is not empty.
    pub fn selected(&self, categories: &Categories) -> Option<usize> {
        categories.view(self.view).get(self.current()).copied()
    }
}
