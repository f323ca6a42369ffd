//! Task line decoding and encoding.

use crate::parser::tag::{parse_tags, strip_tags};
use crate::types::{Task, TaskLocation};
use chrono::{NaiveDate, TimeDelta};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Date format used by the due and done markers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Due date marker.
pub const DUE_EMOJI: &str = "📅";

/// Completion date marker.
pub const DONE_EMOJI: &str = "✅";

/// Regex for parsing task lines.
/// Matches: optional indent, "- [ ]" or "- [x]" / "- [X]", then the rest.
/// Indent and separators are ASCII whitespace only.
static TASK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?-u:\s)*)-(?-u:\s)\[([ xX])\](?-u:\s)*(.*)$").unwrap()
});

/// Due date marker with its date.
pub(crate) static DUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"📅\s*([0-9]{4}-[0-9]{2}-[0-9]{2})").unwrap()
});

/// Completion date marker with its date.
pub(crate) static DONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"✅\s*([0-9]{4}-[0-9]{2}-[0-9]{2})").unwrap()
});

/// Decode a single line into a task.
///
/// `due` is left unset when the line has no valid `📅` marker; the scanner
/// fills it from the note date.
pub fn parse_task_line(line: &str, file_path: &Path, line_num: usize) -> Option<Task> {
    let caps = TASK_REGEX.captures(line)?;

    let done = caps.get(2).map(|m| m.as_str() != " ").unwrap_or(false);
    let rest = caps.get(3).map(|m| m.as_str()).unwrap_or("");

    let tags = parse_tags(rest);
    let due = marker_date(&DUE_REGEX, rest);
    let completed = marker_date(&DONE_REGEX, rest);

    let description = strip_tags(rest);
    let description = DUE_REGEX.replace_all(&description, "");
    let description = DONE_REGEX.replace_all(&description, "");
    let description = description.trim().to_string();

    Some(Task {
        location: TaskLocation {
            file: file_path.to_path_buf(),
            line: line_num,
        },
        raw: line.to_string(),
        description,
        done,
        tags,
        due,
        completed,
    })
}

/// Date of the first marker match. A malformed date counts as absent.
fn marker_date(regex: &Regex, text: &str) -> Option<NaiveDate> {
    let caps = regex.captures(text)?;
    let value = caps.get(1)?.as_str();
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!(value, "ignoring malformed date marker");
            None
        }
    }
}

/// Format a task as a Markdown checkbox line.
pub fn format_task(task: &Task) -> String {
    let mut parts = vec![format!(
        "- {} {}",
        if task.done { "[x]" } else { "[ ]" },
        task.description
    )];

    parts.extend(task.tags.iter().cloned());

    if let Some(due) = task.due {
        parts.push(format!("{} {}", DUE_EMOJI, due.format(DATE_FORMAT)));
    }
    if let Some(completed) = task.completed {
        parts.push(format!("{} {}", DONE_EMOJI, completed.format(DATE_FORMAT)));
    }

    parts.join(" ")
}

/// Replacement line for editing a task's description.
///
/// Tags and dates are carried over; the original indentation and a trailing
/// `\r` are kept.
pub fn reencode_with_description(task: &Task, description: &str) -> String {
    let indent_len = task.raw.len() - task.raw.trim_start().len();
    let cr = if task.raw.ends_with('\r') { "\r" } else { "" };
    let edited = Task {
        description: description.trim().to_string(),
        ..task.clone()
    };
    format!("{}{}{}", &task.raw[..indent_len], format_task(&edited), cr)
}

/// Split text typed for a new task into description and due date.
///
/// A `📅 YYYY-MM-DD` marker in the text sets the due date and is removed;
/// otherwise the task is due `today`.
pub fn parse_new_task_input(input: &str, today: NaiveDate) -> (String, NaiveDate) {
    let due = marker_date(&DUE_REGEX, input).unwrap_or(today);
    let description = DUE_REGEX.replace_all(input, "").trim().to_string();
    (description, due)
}

/// Parse a relative date string into a date.
///
/// Unknown units and offsets that leave chrono's date range give `None`.
pub fn parse_relative_date(date_str: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = date_str.trim().to_lowercase();

    match lower.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.checked_add_signed(TimeDelta::days(1)),
        "yesterday" => return today.checked_sub_signed(TimeDelta::days(1)),
        _ => {}
    }

    // Parse offset format: +3d, -1w, +2m
    if let Some(offset_str) = lower.strip_prefix('+').or_else(|| lower.strip_prefix('-')) {
        let (unit_idx, unit) = offset_str.char_indices().last()?;
        let amount: i64 = offset_str[..unit_idx].parse().ok()?;
        let amount = if lower.starts_with('-') { amount.checked_neg()? } else { amount };
        let delta = match unit {
            'd' => TimeDelta::try_days(amount),
            'w' => TimeDelta::try_weeks(amount),
            // Approximate month as 30 days
            'm' => amount.checked_mul(30).and_then(TimeDelta::try_days),
            _ => None,
        }?;
        return today.checked_add_signed(delta);
    }

    NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(line: &str) -> Option<Task> {
        parse_task_line(line, &PathBuf::from("/vault/2026-02-28.md"), 1)
    }

    #[test]
    fn test_parse_simple_task() {
        let task = parse("- [ ] A simple task #home").unwrap();
        assert_eq!(task.description, "A simple task");
        assert!(!task.done);
        assert_eq!(task.tags, vec!["#home"]);
        assert_eq!(task.due, None);
        assert_eq!(task.completed, None);
        assert_eq!(task.raw, "- [ ] A simple task #home");
    }

    #[test]
    fn test_parse_completed_task() {
        assert!(parse("- [x] Completed task").unwrap().done);
        assert!(parse("- [X] Completed task").unwrap().done);
    }

    #[test]
    fn test_non_tasks_rejected() {
        assert!(parse("Just text").is_none());
        assert!(parse("- plain bullet").is_none());
        assert!(parse("- [>] forwarded").is_none());
        assert!(parse("* [ ] star bullet").is_none());
        assert!(parse("-[ ] missing space").is_none());
    }

    #[test]
    fn test_only_ascii_whitespace_indents() {
        assert!(parse("\u{00A0}- [ ] nbsp indent #a").is_none());
        assert!(parse("-\u{2003}[ ] em space #a").is_none());
        assert_eq!(parse("\t- [ ] tab indent #a").unwrap().description, "tab indent");
    }

    #[test]
    fn test_indented_and_tight_tasks() {
        let task = parse("    - [ ] nested #a").unwrap();
        assert_eq!(task.description, "nested");

        let task = parse("- [ ]tight #a").unwrap();
        assert_eq!(task.description, "tight");
    }

    #[test]
    fn test_parse_task_with_dates() {
        let task = parse("- [x] Ship it #work 📅 2026-02-10 ✅ 2026-02-09").unwrap();
        assert_eq!(task.description, "Ship it");
        assert_eq!(task.due, Some(date(2026, 2, 10)));
        assert_eq!(task.completed, Some(date(2026, 2, 9)));
    }

    #[test]
    fn test_markers_in_any_order_and_without_space() {
        let task = parse("- [ ] ✅2026-01-02 Call #family/mom 📅2026-01-05 back").unwrap();
        assert_eq!(task.description, "Call   back");
        assert_eq!(task.tags, vec!["#family/mom"]);
        assert_eq!(task.due, Some(date(2026, 1, 5)));
        assert_eq!(task.completed, Some(date(2026, 1, 2)));
    }

    #[test]
    fn test_first_due_marker_wins() {
        let task = parse("- [ ] Two dates #a 📅 2026-03-01 📅 2026-04-01").unwrap();
        assert_eq!(task.due, Some(date(2026, 3, 1)));
        assert_eq!(task.description, "Two dates");
    }

    #[test]
    fn test_malformed_date_is_absent_but_stripped() {
        let task = parse("- [ ] Bad date #a 📅 2026-13-45").unwrap();
        assert_eq!(task.due, None);
        assert_eq!(task.description, "Bad date");
    }

    #[test]
    fn test_partial_date_stays_in_description() {
        let task = parse("- [ ] Soon #a 📅 2026-3-1").unwrap();
        assert_eq!(task.due, None);
        assert_eq!(task.description, "Soon  📅 2026-3-1");
    }

    #[test]
    fn test_format_task() {
        let mut task = parse("- [x] My task #a #b/c 📅 2026-02-10 ✅ 2026-02-11").unwrap();
        assert_eq!(format_task(&task), "- [x] My task #a #b/c 📅 2026-02-10 ✅ 2026-02-11");

        task.done = false;
        task.completed = None;
        task.due = None;
        assert_eq!(format_task(&task), "- [ ] My task #a #b/c");
    }

    #[test]
    fn test_decode_encode_roundtrip_on_fields() {
        for line in [
            "- [ ] Plain #a",
            "  - [x] Indented #a/b #c 📅 2026-01-01 ✅ 2026-01-03",
            "- [ ] #lead tag first then text 📅 2026-05-05",
            "- [X] upper ✅ 2026-02-26 #done",
        ] {
            let task = parse(line).unwrap();
            let again = parse(&format_task(&task)).unwrap();
            assert_eq!(again.description, task.description, "{}", line);
            assert_eq!(again.done, task.done, "{}", line);
            assert_eq!(again.tags, task.tags, "{}", line);
            assert_eq!(again.due, task.due, "{}", line);
            assert_eq!(again.completed, task.completed, "{}", line);
        }
    }

    #[test]
    fn test_reencode_keeps_indent_tags_and_dates() {
        let task = parse("\t- [ ] Old text #work 📅 2026-03-02").unwrap();
        assert_eq!(
            reencode_with_description(&task, " New text "),
            "\t- [ ] New text #work 📅 2026-03-02"
        );
    }

    #[test]
    fn test_reencode_keeps_crlf() {
        let task = parse("  - [x] Old #a ✅ 2026-02-27\r").unwrap();
        assert_eq!(task.completed, Some(date(2026, 2, 27)));
        assert_eq!(
            reencode_with_description(&task, "New"),
            "  - [x] New #a ✅ 2026-02-27\r"
        );
    }

    #[test]
    fn test_parse_new_task_input() {
        let today = date(2026, 2, 28);
        assert_eq!(
            parse_new_task_input("Buy milk #errands", today),
            ("Buy milk #errands".to_string(), today)
        );
        assert_eq!(
            parse_new_task_input("Buy milk 📅 2026-03-01 #errands", today),
            ("Buy milk  #errands".to_string(), date(2026, 3, 1))
        );
    }

    #[test]
    fn test_parse_relative_date() {
        let today = date(2026, 2, 2);

        assert_eq!(parse_relative_date("today", today), Some(today));
        assert_eq!(parse_relative_date("Tomorrow", today), Some(date(2026, 2, 3)));
        assert_eq!(parse_relative_date("yesterday", today), Some(date(2026, 2, 1)));
        assert_eq!(parse_relative_date("+3d", today), Some(date(2026, 2, 5)));
        assert_eq!(parse_relative_date("-1w", today), Some(date(2026, 1, 26)));
        assert_eq!(parse_relative_date("+1m", today), Some(date(2026, 3, 4)));
        assert_eq!(parse_relative_date("2026-12-24", today), Some(date(2026, 12, 24)));
        assert_eq!(parse_relative_date("+3y", today), None);
        assert_eq!(parse_relative_date("someday", today), None);
    }

    #[test]
    fn test_parse_relative_date_rejects_bad_offsets() {
        let today = date(2026, 2, 28);

        assert_eq!(parse_relative_date("+3é", today), None);
        assert_eq!(parse_relative_date("+é", today), None);
        assert_eq!(parse_relative_date("+d", today), None);
        assert_eq!(parse_relative_date("-", today), None);
        assert_eq!(parse_relative_date("+99999999999d", today), None);
        assert_eq!(parse_relative_date("-99999999999w", today), None);
        assert_eq!(parse_relative_date("+999999999999999999m", today), None);
        assert_eq!(parse_relative_date("--9223372036854775808d", today), None);
    }
}
