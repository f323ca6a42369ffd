//! Heading levels and heading-bounded section scope.

use regex::Regex;
use std::sync::LazyLock;

// ATX-style heading: # Heading, ## Heading, or a bare run of #.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})(?:\s|$)").unwrap()
});

/// Heading level (1-6) of a line, ignoring surrounding whitespace.
pub fn heading_level(line: &str) -> Option<usize> {
    HEADING
        .captures(line.trim())
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().len())
}

/// Number of leading `#` characters in a section heading.
///
/// Zero for headings that are not Markdown headings (such a section never
/// closes once opened).
fn section_level(heading: &str) -> usize {
    heading.trim().chars().take_while(|&c| c == '#').count()
}

/// Tracks whether successive lines are inside a heading-delimited section.
///
/// The section opens on a line equal to the heading (after trimming) and
/// closes on the next heading whose level is the same or shallower. Deeper
/// subheadings and body lines stay inside.
#[derive(Debug, Clone)]
pub struct SectionScope<'a> {
    heading: &'a str,
    level: usize,
    inside: bool,
}

impl<'a> SectionScope<'a> {
    /// An empty heading puts every line in scope.
    pub fn new(heading: &'a str) -> Self {
        let heading = heading.trim();
        Self {
            heading,
            level: section_level(heading),
            inside: heading.is_empty(),
        }
    }

    /// Feed the next line; returns true if the line's content is in scope.
    ///
    /// Boundary lines (the section heading and the heading closing it) are
    /// never in scope.
    pub fn advance(&mut self, line: &str) -> bool {
        if self.heading.is_empty() {
            return true;
        }

        let trimmed = line.trim();
        if trimmed == self.heading {
            self.inside = true;
            return false;
        }

        if self.inside && self.level > 0 {
            if let Some(level) = heading_level(trimmed) {
                if level <= self.level {
                    self.inside = false;
                    return false;
                }
            }
        }

        self.inside
    }
}
