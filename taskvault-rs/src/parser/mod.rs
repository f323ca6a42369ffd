//! Parsers for checkbox tasks inside Markdown notes.

pub mod heading;
pub mod tag;
pub mod task;

pub use heading::{heading_level, SectionScope};
pub use tag::{is_excluded, is_same_or_child, parse_tags};
pub use task::{
    format_task, parse_new_task_input, parse_relative_date, parse_task_line,
    reencode_with_description,
};
