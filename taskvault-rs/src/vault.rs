//! Vault representation: daily note lookup, task index and task creation.

use crate::config::Config;
use crate::edit::{insert_under_heading, new_note_content, new_task_line};
use crate::error::{Result, VaultError};
use crate::note::{scan_file, Note};
use crate::parser::is_excluded;
use crate::types::Task;
use chrono::{Duration, NaiveDate};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// `[today - lookback, today + lookahead]`.
    pub fn around(today: NaiveDate, lookback_days: u32, lookahead_days: u32) -> Self {
        Self {
            start: today - Duration::days(i64::from(lookback_days)),
            end: today + Duration::days(i64::from(lookahead_days)),
        }
    }

    /// Every date in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

/// Where daily notes live and how their tasks are scoped.
#[derive(Debug, Clone)]
pub struct DailyNotes<'a> {
    /// Directory holding the daily notes.
    pub dir: PathBuf,
    /// strftime pattern for file names (without `.md`).
    pub format: &'a str,
    /// Section heading bounding the task list.
    pub heading: &'a str,
    /// Excluded tags in `#tag` form.
    pub excluded_tags: &'a [String],
}

impl DailyNotes<'_> {
    /// Path of the daily note for `date`.
    pub fn path_for(&self, date: NaiveDate) -> Result<PathBuf> {
        let mut name = String::new();
        write!(name, "{}", date.format(self.format)).map_err(|_| {
            VaultError::Config(format!("invalid daily_note_format '{}'", self.format))
        })?;
        name.push_str(".md");
        Ok(self.dir.join(name))
    }

    /// Scan every existing daily note in `range`.
    ///
    /// Missing notes are skipped; any read failure aborts the build. Tasks
    /// without tags, or with an excluded tag, are dropped. Output is ordered
    /// by note date, then by line.
    pub fn build_index(&self, range: &DateRange) -> Result<Vec<Task>> {
        let mut all_tasks = Vec::new();

        for day in range.days() {
            let path = self.path_for(day)?;
            if !path.exists() {
                continue;
            }
            let tasks = scan_file(&path, day, self.heading)?;
            all_tasks.extend(tasks.into_iter().filter(|task| {
                !task.tags.is_empty() && !is_excluded(&task.tags, self.excluded_tags)
            }));
        }

        tracing::debug!(
            start = %range.start,
            end = %range.end,
            tasks = all_tasks.len(),
            "built task index"
        );
        Ok(all_tasks)
    }
}

/// A vault of daily notes.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,

    /// Active configuration.
    pub config: Config,

    excluded_tags: Vec<String>,
}

impl Vault {
    /// Create a new vault instance.
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(VaultError::VaultNotFound(root));
        }

        let excluded_tags = config.excluded_tags();
        Ok(Self {
            root,
            config,
            excluded_tags,
        })
    }

    /// Directory holding the daily notes.
    pub fn daily_notes_dir(&self) -> PathBuf {
        self.root.join(&self.config.vault.daily_notes_dir)
    }

    /// Daily-note settings derived from the config.
    pub fn daily_notes(&self) -> DailyNotes<'_> {
        DailyNotes {
            dir: self.daily_notes_dir(),
            format: &self.config.vault.daily_note_format,
            heading: &self.config.tasks.section_heading,
            excluded_tags: &self.excluded_tags,
        }
    }

    /// Path of the daily note for `date`.
    pub fn daily_note_path(&self, date: NaiveDate) -> Result<PathBuf> {
        self.daily_notes().path_for(date)
    }

    /// Configured scan window around `today`.
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        DateRange::around(
            today,
            self.config.tasks.lookback_days,
            self.config.tasks.lookahead_days,
        )
    }

    /// Resolve a path given relative to the vault root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Scan the configured window around `today`.
    pub fn load_tasks(&self, today: NaiveDate) -> Result<Vec<Task>> {
        self.daily_notes().build_index(&self.date_range(today))
    }

    /// Add a task to the daily note for `due`.
    ///
    /// A missing note is created from the daily template. In an existing
    /// note the task goes right below the section heading (after any blank
    /// lines); if the heading is absent it is appended with the task.
    pub fn create_task(&self, description: &str, due: NaiveDate) -> Result<PathBuf> {
        let path = self.daily_note_path(due)?;
        let heading = self.config.tasks.section_heading.as_str();
        let line = new_task_line(description, due);

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, new_note_content(due, heading, &line))?;
            tracing::info!(path = %path.display(), "created daily note");
            return Ok(path);
        }

        let mut note = Note::load(&path)?;
        insert_under_heading(&mut note.lines, heading, line);
        note.save()?;
        tracing::debug!(path = %path.display(), "inserted task");
        Ok(path)
    }
}
