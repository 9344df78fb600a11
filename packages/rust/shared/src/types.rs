//! Core domain types for the mdxhook pipeline.

use serde::{Deserialize, Serialize};

use crate::error::MdxHookError;

/// Frontmatter key holding the document identifier.
pub const ID_KEY: &str = "id";

/// Frontmatter key holding the draft lifecycle state.
pub const DRAFT_KEY: &str = "draft";

/// Frontmatter key holding the last-modification timestamp.
pub const MOD_DATETIME_KEY: &str = "modDatetime";

/// Frontmatter key holding the estimated reading time in minutes.
pub const READING_TIME_KEY: &str = "readingTime";

// ---------------------------------------------------------------------------
// DraftState
// ---------------------------------------------------------------------------

/// Publication lifecycle state carried in the `draft` frontmatter field.
///
/// `true` — unpublished draft, left alone by the hook.
/// `first` — publishing with this commit; transitions to `false`.
/// `false` — published; the hook tracks `modDatetime` on every commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Unpublished,
    First,
    Published,
}

impl DraftState {
    /// The literal frontmatter value for this state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unpublished => "true",
            Self::First => "first",
            Self::Published => "false",
        }
    }
}

impl std::str::FromStr for DraftState {
    type Err = MdxHookError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::Unpublished),
            "first" => Ok(Self::First),
            "false" => Ok(Self::Published),
            other => Err(MdxHookError::parse(format!(
                "unknown draft state '{other}' (expected true, first, or false)"
            ))),
        }
    }
}

impl std::fmt::Display for DraftState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FileAction
// ---------------------------------------------------------------------------

/// One rewrite applied to a staged document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FileAction {
    /// A generated identifier was written into the frontmatter.
    IdAssigned { id: String },
    /// `draft: first` transitioned to `draft: false`.
    Published,
    /// `modDatetime` was set to the commit time.
    Touched { timestamp: String },
    /// `readingTime` was (re)computed.
    ReadingTime { minutes: u32 },
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdAssigned { id } => write!(f, "id assigned ({id})"),
            Self::Published => write!(f, "first release, draft set to false"),
            Self::Touched { timestamp } => write!(f, "modDatetime updated ({timestamp})"),
            Self::ReadingTime { minutes } => write!(f, "readingTime set to {minutes} min"),
        }
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Per-file outcome of a hook run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Path relative to the repository root.
    pub path: String,
    /// Rewrites applied (empty if the file was already normalized).
    pub actions: Vec<FileAction>,
}

/// Summary of a whole hook run, printable as JSON by `mdxhook check --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookReport {
    /// Staged files matching a managed extension.
    pub files_scanned: usize,
    /// Files actually rewritten and re-staged.
    pub files_rewritten: usize,
    /// Per-file detail.
    pub files: Vec<FileReport>,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
}
