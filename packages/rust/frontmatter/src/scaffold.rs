//! Frontmatter scaffolding for freshly created documents.
//!
//! Built by hand rather than through a YAML serializer so the field order
//! and quoting stay stable across runs.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Inputs for a scaffolded frontmatter block.
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Document title.
    pub title: String,
    /// Author slug.
    pub author: String,
    /// Publication timestamp, usually now.
    pub pub_datetime: DateTime<Utc>,
}

/// Build a complete frontmatter block for a new document.
///
/// The document starts as an unpublished draft; the pre-commit hook takes
/// over the lifecycle from there (`draft: first` on publication, then
/// `modDatetime` tracking).
pub fn scaffold(opts: &ScaffoldOptions) -> String {
    let id = Uuid::new_v4();
    let pub_datetime = opts
        .pub_datetime
        .to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut fm = String::from("---\n");
    fm.push_str(&format!("id: \"{id}\"\n"));
    fm.push_str(&format!("title: \"{}\"\n", escape_yaml_string(&opts.title)));
    fm.push_str(&format!(
        "author: \"{}\"\n",
        escape_yaml_string(&opts.author)
    ));
    fm.push_str(&format!("pubDatetime: \"{pub_datetime}\"\n"));
    fm.push_str("draft: true\n");
    fm.push_str("---\n");
    fm
}

/// Escape special characters in a YAML string value.
fn escape_yaml_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
