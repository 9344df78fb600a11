//! Frontmatter extraction and line-level rewrites.
//!
//! This is deliberately not a YAML parser. Frontmatter is the text between
//! the first pair of `---` delimiter lines, and every operation here is a
//! superficial `key: value` line match or substitution — enough for the
//! flat metadata blocks the hook manages, and nothing more.

mod scaffold;

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

pub use scaffold::{ScaffoldOptions, scaffold};

/// Matches the frontmatter block: everything between the opening and the
/// first closing `---` line.
static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)---\n(.*?)---\n").expect("valid regex"));

/// Matches one `key: value` line within a frontmatter block.
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+):\s*(.*)$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Extraction and parsing
// ---------------------------------------------------------------------------

/// Extract the frontmatter block from a document, without the delimiters.
///
/// Returns `None` when the document has no `---` delimited block.
pub fn extract(content: &str) -> Option<&str> {
    BLOCK_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parsed frontmatter: an ordered list of `key: value` entries.
///
/// Lines that do not look like `key: value` (list items, continuation
/// lines) are skipped, exactly as the hook has always done.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    entries: Vec<(String, String)>,
}

impl Frontmatter {
    /// Parse the entries of an extracted frontmatter block.
    pub fn parse(block: &str) -> Self {
        let mut entries = Vec::new();

        for line in block.lines() {
            if let Some(caps) = ENTRY_RE.captures(line) {
                let key = caps[1].to_string();
                let value = caps[2].trim().trim_matches('"').to_string();
                entries.push((key, value));
            } else {
                trace!(line, "skipping non key-value frontmatter line");
            }
        }

        Self { entries }
    }

    /// Parse frontmatter straight from full document content.
    pub fn of_document(content: &str) -> Option<Self> {
        extract(content).map(Self::parse)
    }

    /// Look up the value for a key (first occurrence wins).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the block contains a key at all, even with an empty value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of parsed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Rewrites
// ---------------------------------------------------------------------------

/// Set `key` to `value` inside the frontmatter block.
///
/// Replaces the existing `key:` line if present, otherwise inserts a new
/// line at the end of the block. The document body is never touched; a
/// document without a frontmatter block is returned unchanged.
pub fn upsert(content: &str, key: &str, value: &str) -> String {
    let Some(block) = extract(content) else {
        return content.to_string();
    };

    let line = render_entry(key, value);

    // An empty block would make the replacen below match the empty string
    // at position 0; splice between the delimiters directly instead.
    if block.is_empty() {
        return content.replacen("---\n---\n", &format!("---\n{line}\n---\n"), 1);
    }

    let key_re = entry_regex(key);

    let new_block = if key_re.is_match(block) {
        key_re
            .replace(block, regex::NoExpand(line.as_str()))
            .to_string()
    } else {
        // Insert before the closing delimiter: the block always ends with
        // the newline that precedes `---`.
        let mut b = block.to_string();
        if !b.ends_with('\n') {
            b.push('\n');
        }
        b.push_str(&line);
        b.push('\n');
        b
    };

    content.replacen(block, &new_block, 1)
}

/// Blank out the value of `key`, keeping the line (`key:`).
///
/// Unlike [`upsert`], a missing key is left missing.
pub fn clear(content: &str, key: &str) -> String {
    let Some(block) = extract(content) else {
        return content.to_string();
    };

    let key_re = entry_regex(key);
    if !key_re.is_match(block) {
        return content.to_string();
    }

    let new_block = key_re.replace(block, format!("{key}:")).to_string();
    content.replacen(block, &new_block, 1)
}

fn render_entry(key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{key}:")
    } else {
        format!("{key}: {value}")
    }
}

/// Regex matching the whole `key: …` line for one specific key.
fn entry_regex(key: &str) -> Regex {
    Regex::new(&format!(r"(?m)^{}:[ \t]*.*$", regex::escape(key))).expect("valid regex")
}

// ---------------------------------------------------------------------------
// Reading time
// ---------------------------------------------------------------------------

/// Estimated reading time in minutes: `floor(words / wpm) + 1`.
///
/// Words are whitespace-separated tokens over the whole file content,
/// frontmatter included. The `+ 1` keeps even an empty file at one minute.
pub fn reading_time(content: &str, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1);
    let words = content.split_whitespace().count() as u32;
    words / wpm + 1
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "---\n\
id: \"abc-123\"\n\
title: \"Hello World\"\n\
draft: false\n\
modDatetime: 2024-01-15T10:30:00Z\n\
---\n\
\n\
# Hello World\n\
\n\
Body text here.\n";

    #[test]
    fn extract_returns_block_without_delimiters() {
        let block = extract(DOC).expect("block");
        assert!(block.starts_with("id:"));
        assert!(block.ends_with("modDatetime: 2024-01-15T10:30:00Z\n"));
        assert!(!block.contains("---"));
    }

    #[test]
    fn extract_none_without_frontmatter() {
        assert!(extract("# Just a heading\n\nBody.\n").is_none());
    }

    #[test]
    fn extract_ignores_later_separators() {
        let doc = "---\na: 1\n---\n\nBody\n\n---\n\nMore body\n";
        assert_eq!(extract(doc), Some("a: 1\n"));
    }

    #[test]
    fn parse_strips_quotes() {
        let fm = Frontmatter::of_document(DOC).expect("frontmatter");
        assert_eq!(fm.get("id"), Some("abc-123"));
        assert_eq!(fm.get("title"), Some("Hello World"));
        assert_eq!(fm.get("draft"), Some("false"));
        assert_eq!(fm.len(), 4);
    }

    #[test]
    fn parse_skips_list_items() {
        let fm = Frontmatter::parse("title: Post\ntags:\n  - health\n  - food\n");
        assert_eq!(fm.get("title"), Some("Post"));
        assert_eq!(fm.get("tags"), Some(""));
        assert_eq!(fm.len(), 2);
    }

    #[test]
    fn parse_empty_value_counts_as_present() {
        let fm = Frontmatter::parse("modDatetime:\ndraft: true\n");
        assert!(fm.contains("modDatetime"));
        assert_eq!(fm.get("modDatetime"), Some(""));
    }

    #[test]
    fn upsert_replaces_existing_line() {
        let updated = upsert(DOC, "draft", "true");
        let fm = Frontmatter::of_document(&updated).expect("frontmatter");
        assert_eq!(fm.get("draft"), Some("true"));
        // Body untouched
        assert!(updated.contains("Body text here."));
    }

    #[test]
    fn upsert_inserts_missing_key_inside_block() {
        let doc = "---\ntitle: Post\n---\n\nBody draft: false mention.\n";
        let updated = upsert(doc, "id", "xyz-789");

        let block = extract(&updated).expect("block");
        assert!(block.contains("id: xyz-789"));
        // The body mention must not be rewritten
        assert!(updated.contains("Body draft: false mention."));
    }

    #[test]
    fn upsert_into_empty_block() {
        let doc = "---\n---\n\nBody.\n";
        let updated = upsert(doc, "id", "xyz-789");
        assert_eq!(updated, "---\nid: xyz-789\n---\n\nBody.\n");
    }

    #[test]
    fn upsert_without_frontmatter_is_noop() {
        let doc = "# No metadata\n";
        assert_eq!(upsert(doc, "id", "xyz"), doc);
    }

    #[test]
    fn upsert_does_not_touch_body_occurrences() {
        let doc = "---\ndraft: first\n---\n\ndraft: first appears in prose too\n";
        let updated = upsert(doc, "draft", "false");
        assert!(updated.contains("draft: first appears in prose too"));
        let fm = Frontmatter::of_document(&updated).expect("frontmatter");
        assert_eq!(fm.get("draft"), Some("false"));
    }

    #[test]
    fn clear_blanks_value_keeps_key() {
        let cleared = clear(DOC, "modDatetime");
        let block = extract(&cleared).expect("block");
        assert!(block.contains("modDatetime:\n"));
        assert!(!block.contains("modDatetime: 2024"));
    }

    #[test]
    fn clear_missing_key_is_noop() {
        let doc = "---\ntitle: Post\n---\nBody\n";
        assert_eq!(clear(doc, "modDatetime"), doc);
    }

    #[test]
    fn reading_time_floors_and_adds_one() {
        let one_word = "word";
        assert_eq!(reading_time(one_word, 200), 1);

        let exactly_200 = vec!["word"; 200].join(" ");
        assert_eq!(reading_time(&exactly_200, 200), 2);

        let words_450 = vec!["word"; 450].join(" ");
        assert_eq!(reading_time(&words_450, 200), 3);
    }

    #[test]
    fn reading_time_empty_is_one_minute() {
        assert_eq!(reading_time("", 200), 1);
    }
}
