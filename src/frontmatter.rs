//! Front-matter extraction for article index files.
//!
//! An article's `index.md` may open with a metadata block delimited by
//! `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-02-03T14:44:42+08:00
//! summary: First post
//! ---
//! Body starts here.
//! ```
//!
//! The block is recognized only when the `---` fence is the very first line
//! of the file. Anything else (no fence, a fence further down, a fence
//! that is never closed) means "no metadata": the parser returns an empty
//! mapping and leaves the body untouched. Malformed metadata is never an
//! error; articles without front matter are perfectly valid.
//!
//! Interior lines are `key: value` pairs split on the *first* colon, so
//! values may contain colons (timestamps with offsets being the everyday
//! case). Lines without a colon, including blank lines, are skipped.
//!
//! Keys carry no semantics here. The typed [`ArticleMeta`] view picks out
//! the fields the generator cares about (`title`, `date`, `summary`);
//! interpretation of the date, including whether it parses at all, is
//! left to the listing sorter.

use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;

const FENCE: &str = "---";

/// Typed view of an article's front matter.
///
/// All fields are optional; an article with no front matter yields a
/// record of `None`s. The raw `date` string is preserved as written so it
/// can be displayed verbatim; [`ArticleMeta::parsed_date`] is the place
/// where it gets interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleMeta {
    /// `title` key, verbatim.
    pub title: Option<String>,
    /// `date` key, verbatim (expected ISO-8601 with offset).
    pub date: Option<String>,
    /// `summary` key, verbatim.
    pub summary: Option<String>,
}

impl ArticleMeta {
    /// Pick the known fields out of a generic key/value mapping.
    pub fn from_pairs(pairs: &BTreeMap<String, String>) -> Self {
        Self {
            title: pairs.get("title").cloned(),
            date: pairs.get("date").cloned(),
            summary: pairs.get("summary").cloned(),
        }
    }

    /// Parse the whole front-matter block of a file in one step.
    pub fn extract(content: &str) -> Self {
        Self::from_pairs(&parse(content))
    }

    /// Interpret the `date` field as an ISO-8601 timestamp with offset.
    ///
    /// Returns `None` when the field is absent or does not parse; callers
    /// decide what that means (the listing sorter treats it as "oldest").
    pub fn parsed_date(&self) -> Option<DateTime<FixedOffset>> {
        self.date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
    }
}

/// Parse a leading front-matter block into a key/value mapping.
///
/// Returns an empty mapping when the file does not start with a closed
/// `---` block.
pub fn parse(content: &str) -> BTreeMap<String, String> {
    match block_bounds(content) {
        Some((start, end, _)) => parse_pairs(&content[start..end]),
        None => BTreeMap::new(),
    }
}

/// Return the body with a leading front-matter block removed.
///
/// When no block is recognized the input is returned unchanged.
pub fn strip(content: &str) -> &str {
    match block_bounds(content) {
        Some((_, _, body)) => &content[body..],
        None => content,
    }
}

/// Locate a leading front-matter block.
///
/// Returns `(interior_start, interior_end, body_start)` byte offsets, or
/// `None` when the first line is not a fence or no closing fence exists.
fn block_bounds(content: &str) -> Option<(usize, usize, usize)> {
    let rest = content.strip_prefix(FENCE)?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;
    let interior_start = content.len() - rest.len();

    let mut pos = interior_start;
    loop {
        let line_end = content[pos..].find('\n');
        let (line, after) = match line_end {
            Some(i) => (&content[pos..pos + i], pos + i + 1),
            None => (&content[pos..], content.len()),
        };
        if line.trim_end_matches('\r') == FENCE {
            return Some((interior_start, pos, after));
        }
        if line_end.is_none() {
            return None;
        }
        pos = after;
    }
}

fn parse_pairs(block: &str) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();
    for line in block.lines() {
        if let Some((key, value)) = line.split_once(':') {
            pairs.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // parse() tests
    // =========================================================================

    #[test]
    fn parse_round_trip() {
        let content = "---\ntitle: A\ndate: 2024-02-03T14:44:42+08:00\n---\nbody";
        let pairs = parse(content);
        assert_eq!(pairs.get("title").map(String::as_str), Some("A"));
        assert_eq!(
            pairs.get("date").map(String::as_str),
            Some("2024-02-03T14:44:42+08:00")
        );
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn parse_empty_when_no_fence() {
        assert!(parse("title: A\ndate: whenever\n").is_empty());
    }

    #[test]
    fn parse_empty_when_fence_not_first_line() {
        assert!(parse("\n---\ntitle: A\n---\n").is_empty());
        assert!(parse("# Heading\n---\ntitle: A\n---\n").is_empty());
    }

    #[test]
    fn parse_empty_when_fence_never_closes() {
        assert!(parse("---\ntitle: A\nno closing fence").is_empty());
    }

    #[test]
    fn parse_empty_when_fence_has_trailing_text() {
        assert!(parse("---- not a fence\ntitle: A\n---\n").is_empty());
        assert!(parse("--- extra\ntitle: A\n---\n").is_empty());
    }

    #[test]
    fn parse_value_keeps_colons_after_first() {
        let pairs = parse("---\ndate: 2024-02-03T14:44:42+08:00\n---\n");
        assert_eq!(
            pairs.get("date").map(String::as_str),
            Some("2024-02-03T14:44:42+08:00")
        );
    }

    #[test]
    fn parse_trims_key_and_value() {
        let pairs = parse("---\n  title  :   Spaced Out  \n---\n");
        assert_eq!(pairs.get("title").map(String::as_str), Some("Spaced Out"));
    }

    #[test]
    fn parse_skips_blank_and_colonless_lines() {
        let pairs = parse("---\n\ntitle: A\njust some words\n\ndate: d\n---\n");
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn parse_closing_fence_at_eof() {
        let pairs = parse("---\ntitle: A\n---");
        assert_eq!(pairs.get("title").map(String::as_str), Some("A"));
    }

    #[test]
    fn parse_crlf_fences() {
        let pairs = parse("---\r\ntitle: A\r\n---\r\nbody");
        assert_eq!(pairs.get("title").map(String::as_str), Some("A"));
    }

    #[test]
    fn parse_last_duplicate_key_wins() {
        let pairs = parse("---\ntitle: First\ntitle: Second\n---\n");
        assert_eq!(pairs.get("title").map(String::as_str), Some("Second"));
    }

    // =========================================================================
    // strip() tests
    // =========================================================================

    #[test]
    fn strip_removes_leading_block() {
        let content = "---\ntitle: A\n---\n# Heading\n\nbody";
        assert_eq!(strip(content), "# Heading\n\nbody");
    }

    #[test]
    fn strip_returns_input_when_no_block() {
        let content = "# Heading\n\nbody";
        assert_eq!(strip(content), content);
    }

    #[test]
    fn strip_returns_input_when_unclosed() {
        let content = "---\ntitle: A\nbody without closing fence";
        assert_eq!(strip(content), content);
    }

    #[test]
    fn strip_empty_body() {
        assert_eq!(strip("---\ntitle: A\n---\n"), "");
    }

    // =========================================================================
    // ArticleMeta tests
    // =========================================================================

    #[test]
    fn meta_extracts_known_fields() {
        let meta = ArticleMeta::extract(
            "---\ntitle: A\ndate: 2024-02-03T14:44:42+08:00\nsummary: hi\nauthor: koril\n---\n",
        );
        assert_eq!(meta.title.as_deref(), Some("A"));
        assert_eq!(meta.date.as_deref(), Some("2024-02-03T14:44:42+08:00"));
        assert_eq!(meta.summary.as_deref(), Some("hi"));
    }

    #[test]
    fn meta_defaults_to_none_without_block() {
        assert_eq!(ArticleMeta::extract("body only"), ArticleMeta::default());
    }

    #[test]
    fn parsed_date_reads_offset() {
        let meta = ArticleMeta {
            date: Some("2024-02-03T14:44:42+08:00".to_string()),
            ..Default::default()
        };
        let parsed = meta.parsed_date().unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn parsed_date_none_for_garbage() {
        let meta = ArticleMeta {
            date: Some("yesterday-ish".to_string()),
            ..Default::default()
        };
        assert_eq!(meta.parsed_date(), None);
    }

    #[test]
    fn parsed_date_none_when_absent() {
        assert_eq!(ArticleMeta::default().parsed_date(), None);
    }

    #[test]
    fn parsed_date_rejects_date_only() {
        // Bare dates have no offset; the sorter treats them as missing.
        let meta = ArticleMeta {
            date: Some("2024-02-03".to_string()),
            ..Default::default()
        };
        assert_eq!(meta.parsed_date(), None);
    }
}
