//! Scaffolding of new draft documents (`mdxhook new`).

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use mdxhook_frontmatter::{ScaffoldOptions, scaffold};
use mdxhook_shared::{AppConfig, MdxHookError, Result};

/// Create a new MDX file with generated frontmatter at `path`.
///
/// The title defaults to a prettified file stem (`gesunde-ernaehrung` →
/// `Gesunde Ernaehrung`). Fails rather than overwrite an existing file.
pub fn new_document(path: &Path, title: Option<&str>, config: &AppConfig) -> Result<PathBuf> {
    if path.exists() {
        return Err(MdxHookError::validation(format!(
            "'{}' already exists",
            path.display()
        )));
    }

    let title = match title {
        Some(t) => t.to_string(),
        None => title_from_stem(path)?,
    };

    let frontmatter = scaffold(&ScaffoldOptions {
        title: title.clone(),
        author: config.scaffold.author.clone(),
        pub_datetime: Utc::now(),
    });

    let content = format!("{frontmatter}\n# {title}\n");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| MdxHookError::io(parent, e))?;
        }
    }
    std::fs::write(path, content).map_err(|e| MdxHookError::io(path, e))?;

    info!(path = %path.display(), title, "scaffolded new draft");
    Ok(path.to_path_buf())
}

/// Derive a human-readable title from the file stem.
fn title_from_stem(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            MdxHookError::validation(format!("cannot derive a title from '{}'", path.display()))
        })?;

    let title = stem
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    Ok(title)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
