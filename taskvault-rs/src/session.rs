//! Task board state: the loaded tasks, their categories, the active filter and
//! the cursor.
//!
//! Every mutation goes through a `Session` method that writes one task and then
//! reloads the whole index, so no locator survives a write. A failed mutation
//! leaves the state exactly as it was.

use crate::categorize::{categorize, Categories, Cursor};
use crate::edit;
use crate::error::{Result, VaultError};
use crate::parser::{parse_new_task_input, reencode_with_description};
use crate::types::{Task, TaskLocation};
use crate::vault::Vault;
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Session<'v> {
    vault: &'v Vault,
    today: NaiveDate,
    tasks: Vec<Task>,
    filter: String,
    categories: Categories,
    pub cursor: Cursor,
}

impl<'v> Session<'v> {
    /// Build the index for the window around `today` and categorize it.
    pub fn open(vault: &'v Vault, today: NaiveDate) -> Result<Self> {
        let tasks = vault.load_tasks(today)?;
        let mut session = Self {
            vault,
            today,
            tasks,
            filter: String::new(),
            categories: Categories::default(),
            cursor: Cursor::default(),
        };
        session.recategorize();
        Ok(session)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    /// Tasks passing the current filter, in index order.
    pub fn visible(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.matches_filter(&self.filter))
    }

    /// Re-run the index build. On failure the previous tasks are kept.
    pub fn reload(&mut self) -> Result<()> {
        self.tasks = self.vault.load_tasks(self.today)?;
        self.recategorize();
        Ok(())
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.recategorize();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(String::new());
    }

    fn recategorize(&mut self) {
        self.categories = categorize(&self.tasks, self.today, &self.filter);
        self.cursor.clamp(&self.categories);
    }

    /// Index of the visible task at `location`.
    pub fn find(&self, location: &TaskLocation) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| &t.location == location && t.matches_filter(&self.filter))
            .ok_or_else(|| {
                tracing::warn!(%location, "no visible task at locator");
                VaultError::TaskNotFound(location.to_string())
            })
    }

    /// Task under the cursor.
    pub fn selected(&self) -> Option<&Task> {
        self.cursor
            .selected(&self.categories)
            .and_then(|idx| self.tasks.get(idx))
    }

    /// Toggle the task at `location`; returns it as written.
    pub fn toggle(&mut self, location: &TaskLocation) -> Result<Task> {
        let mut task = self.tasks[self.find(location)?].clone();
        edit::toggle_done(&mut task, self.today)?;
        self.reload()?;
        Ok(task)
    }

    /// Delete the task at `location`; returns the removed task.
    pub fn delete(&mut self, location: &TaskLocation) -> Result<Task> {
        let task = self.tasks[self.find(location)?].clone();
        edit::delete_task(&task)?;
        self.reload()?;
        Ok(task)
    }

    /// Replace the description of the task at `location`, keeping its tags
    /// and dates. A blank description is rejected.
    pub fn edit_description(&mut self, location: &TaskLocation, description: &str) -> Result<Task> {
        if description.trim().is_empty() {
            return Err(VaultError::EmptyDescription);
        }
        let mut task = self.tasks[self.find(location)?].clone();
        let line = reencode_with_description(&task, description);
        edit::update_task_line(&mut task, &line)?;
        task.description = description.trim().to_string();
        self.reload()?;
        Ok(task)
    }

    /// Create a task from typed input; returns the note path and due date.
    ///
    /// A `📅` marker in the input sets the due date, then `due`, then today.
    /// Input that is blank once the marker is removed is rejected.
    pub fn create(&mut self, input: &str, due: Option<NaiveDate>) -> Result<(PathBuf, NaiveDate)> {
        let (description, due) = parse_new_task_input(input, due.unwrap_or(self.today));
        if description.is_empty() {
            return Err(VaultError::EmptyDescription);
        }

        let path = self.vault.create_task(&description, due)?;
        self.reload()?;
        Ok((path, due))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::View;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup_vault() -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.tasks.section_heading = "## Open Space".to_string();
        let vault = Vault::new(dir.path(), config).unwrap();
        std::fs::create_dir_all(vault.daily_notes_dir()).unwrap();

        let note = |day: NaiveDate, content: &str| {
            std::fs::write(vault.daily_note_path(day).unwrap(), content).unwrap();
        };
        note(
            date(2026, 2, 27),
            "## Open Space\n- [ ] late #work\n- [x] shipped #work ✅ 2026-02-27\n",
        );
        note(
            date(2026, 2, 28),
            "## Open Space\n- [ ] first #home\n- [ ] second #home\n- [ ] untagged\n",
        );
        (dir, vault)
    }

    fn location(vault: &Vault, day: NaiveDate, line: usize) -> TaskLocation {
        TaskLocation {
            file: vault.daily_note_path(day).unwrap(),
            line,
        }
    }

    #[test]
    fn test_open_categorizes() {
        let (_dir, vault) = setup_vault();
        let session = Session::open(&vault, date(2026, 2, 28)).unwrap();

        assert_eq!(session.tasks().len(), 4);
        assert_eq!(session.categories().overdue.len(), 1);
        assert_eq!(session.categories().today.len(), 2);
        assert_eq!(session.categories().logbook.len(), 1);
        assert_eq!(session.selected().unwrap().description, "first");
    }

    #[test]
    fn test_toggle_reloads() {
        let (_dir, vault) = setup_vault();
        let mut session = Session::open(&vault, date(2026, 2, 28)).unwrap();

        let task = session.toggle(&location(&vault, date(2026, 2, 28), 2)).unwrap();
        assert!(task.done);
        assert_eq!(session.categories().today.len(), 1);
        assert_eq!(session.categories().view(View::Logbook).len(), 2);
        assert_eq!(session.categories().logbook[0].date, date(2026, 2, 28));
    }

    #[test]
    fn test_delete_shifts_locators_after_reload() {
        let (_dir, vault) = setup_vault();
        let mut session = Session::open(&vault, date(2026, 2, 28)).unwrap();
        session.cursor.down(&session.categories);
        assert_eq!(session.cursor.current(), 1);

        session.delete(&location(&vault, date(2026, 2, 28), 2)).unwrap();
        let today = session.categories().today.clone();
        assert_eq!(today.len(), 1);
        let second = &session.tasks()[today[0]];
        assert_eq!(second.description, "second");
        assert_eq!(second.location.line, 2);
        assert_eq!(session.cursor.current(), 0);

        // The old locator of "second" is gone.
        assert!(matches!(
            session.toggle(&location(&vault, date(2026, 2, 28), 3)),
            Err(VaultError::TaskNotFound(_))
        ));
    }

    #[test]
    fn test_edit_description() {
        let (_dir, vault) = setup_vault();
        let mut session = Session::open(&vault, date(2026, 2, 28)).unwrap();
        let loc = location(&vault, date(2026, 2, 28), 3);

        session.edit_description(&loc, "renamed").unwrap();
        let idx = session.find(&loc).unwrap();
        assert_eq!(session.tasks()[idx].description, "renamed");
        assert_eq!(session.tasks()[idx].tags, vec!["#home"]);
        assert_eq!(session.tasks()[idx].raw, "- [ ] renamed #home 📅 2026-02-28");
    }

    #[test]
    fn test_create() {
        let (_dir, vault) = setup_vault();
        let mut session = Session::open(&vault, date(2026, 2, 28)).unwrap();

        session.create("Buy milk #errand 📅 2026-03-01", None).unwrap();
        session.create("Plan #trip", Some(date(2026, 3, 2))).unwrap();
        session.create("Now #home", None).unwrap();

        let upcoming = &session.categories().upcoming;
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].label, "Sunday, Mar 01");
        assert_eq!(session.tasks()[upcoming[0].tasks[0]].description, "Buy milk");
        assert_eq!(session.categories().today.len(), 3);
    }

    #[test]
    fn test_filter_hides_and_blocks_mutation() {
        let (_dir, vault) = setup_vault();
        let mut session = Session::open(&vault, date(2026, 2, 28)).unwrap();

        session.set_filter("WORK");
        assert_eq!(session.visible().count(), 2);
        assert!(session.categories().today.is_empty());
        assert!(session.selected().is_none());
        assert!(session.find(&location(&vault, date(2026, 2, 28), 2)).is_err());

        session.clear_filter();
        assert_eq!(session.visible().count(), 4);
    }

    #[test]
    fn test_failed_mutation_keeps_state() {
        let (_dir, vault) = setup_vault();
        let mut session = Session::open(&vault, date(2026, 2, 28)).unwrap();
        let before = session.tasks().to_vec();

        // Truncate the note behind the session's back.
        std::fs::write(vault.daily_note_path(date(2026, 2, 28)).unwrap(), "## Open Space\n").unwrap();

        let result = session.toggle(&location(&vault, date(2026, 2, 28), 3));
        assert!(matches!(result, Err(VaultError::LineOutOfRange { .. })));
        assert_eq!(session.tasks(), before.as_slice());
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let (_dir, vault) = setup_vault();
        let mut session = Session::open(&vault, date(2026, 2, 28)).unwrap();
        let path = vault.daily_note_path(date(2026, 2, 28)).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        for input in ["", "   ", "📅 2026-03-01"] {
            assert!(
                matches!(session.create(input, None), Err(VaultError::EmptyDescription)),
                "{:?}",
                input
            );
        }
        assert!(!vault.daily_note_path(date(2026, 3, 1)).unwrap().exists());

        let loc = location(&vault, date(2026, 2, 28), 2);
        assert!(matches!(session.edit_description(&loc, " \t"), Err(VaultError::EmptyDescription)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
        assert_eq!(session.tasks().len(), 4);
    }

    #[test]
    fn test_invalid_utf8_note_does_not_hide_other_notes() {
        let (_dir, vault) = setup_vault();
        let latin1 = vault.daily_note_path(date(2026, 2, 27)).unwrap();
        std::fs::write(&latin1, b"## Open Space\n- [ ] caf\xE9 #work\n").unwrap();

        let mut session = Session::open(&vault, date(2026, 2, 28)).unwrap();
        let names: Vec<&str> = session.tasks().iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["caf\u{FFFD}", "first", "second"]);

        // Writing the lossy note back would replace its bytes.
        let result = session.toggle(&location(&vault, date(2026, 2, 27), 2));
        assert!(matches!(result, Err(VaultError::InvalidEncoding(_))));
        assert_eq!(std::fs::read(&latin1).unwrap(), b"## Open Space\n- [ ] caf\xE9 #work\n".to_vec());

        session.toggle(&location(&vault, date(2026, 2, 28), 2)).unwrap();
        assert_eq!(session.categories().today.len(), 1);
    }

    #[test]
    fn test_edit_keeps_crlf() {
        let (_dir, vault) = setup_vault();
        let path = vault.daily_note_path(date(2026, 2, 28)).unwrap();
        std::fs::write(&path, "## Open Space\r\n- [ ] a #x\r\n- [ ] b #x\r\n").unwrap();
        let mut session = Session::open(&vault, date(2026, 2, 28)).unwrap();

        session
            .edit_description(&location(&vault, date(2026, 2, 28), 2), "renamed")
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "## Open Space\r\n- [ ] renamed #x 📅 2026-02-28\r\n- [ ] b #x\r\n"
        );
        let idx = session.find(&location(&vault, date(2026, 2, 28), 2)).unwrap();
        assert_eq!(session.tasks()[idx].description, "renamed");
    }
}
