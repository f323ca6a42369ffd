//! Tag parsing (#tag and #tag/subtag) and tag-hierarchy exclusion.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// Tag pattern: # followed by word characters, optionally repeated
// `/word` segments. Word characters are ASCII only ([0-9A-Za-z_]), so
// digits-only tags such as #123 are tags too.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#[0-9A-Za-z_]+(?:/[0-9A-Za-z_]+)*").unwrap()
});

/// All tags in `text`, left to right, duplicates preserved.
pub fn parse_tags(text: &str) -> Vec<String> {
    TAG.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// `text` with every tag occurrence removed.
pub fn strip_tags(text: &str) -> Cow<'_, str> {
    TAG.replace_all(text, "")
}

/// True if `tag` equals `parent` or is nested below it.
///
/// `#habit/daily` is below `#habit`; `#habitat` is not.
pub fn is_same_or_child(tag: &str, parent: &str) -> bool {
    match tag.strip_prefix(parent) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

/// True if any of `tags` is one of `excluded` or nested below one.
pub fn is_excluded(tags: &[String], excluded: &[String]) -> bool {
    tags.iter()
        .any(|tag| excluded.iter().any(|ex| is_same_or_child(tag, ex)))
}
