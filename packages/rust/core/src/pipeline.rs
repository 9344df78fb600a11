//! End-to-end hook pipeline: staged files → frontmatter rewrites →
//! re-stage → index refresh → lint.

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use mdxhook_frontmatter::{Frontmatter, clear, reading_time, upsert};
use mdxhook_shared::{
    AppConfig, DRAFT_KEY, DraftState, FileAction, FileReport, HookReport, ID_KEY,
    MOD_DATETIME_KEY, MdxHookError, READING_TIME_KEY, Result,
};

/// Options for one hook run.
#[derive(Debug, Clone, Default)]
pub struct HookOptions {
    /// Plan rewrites without writing files or touching the index.
    pub dry_run: bool,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each staged file has been checked.
    fn file_checked(&self, path: &str, actions: &[FileAction]);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_checked(&self, _path: &str, _actions: &[FileAction]) {}
}

// ---------------------------------------------------------------------------
// Rewrite rules
// ---------------------------------------------------------------------------

/// Apply the normalization rules to one document, in order:
///
/// 1. a missing `id` gets a generated UUID;
/// 2. `draft: false` gets `modDatetime` set to the commit time;
/// 3. `draft: first` becomes `draft: false` with `modDatetime` cleared
///    (first publication carries no modification timestamp);
/// 4. `readingTime` is recomputed from the rewritten content.
///
/// Returns `None` for documents without a frontmatter block; those are
/// left untouched. Otherwise returns the rewritten content and the list
/// of rewrites that actually changed something.
pub fn plan_rewrite(
    content: &str,
    config: &AppConfig,
    now: DateTime<Utc>,
) -> Option<(String, Vec<FileAction>)> {
    let fm = Frontmatter::of_document(content)?;

    let mut updated = content.to_string();
    let mut actions = Vec::new();

    if !fm.contains(ID_KEY) {
        let id = Uuid::new_v4().to_string();
        updated = upsert(&updated, ID_KEY, &id);
        actions.push(FileAction::IdAssigned { id });
    }

    match fm.get(DRAFT_KEY).map(|v| v.parse::<DraftState>()) {
        Some(Ok(DraftState::Published)) => {
            let timestamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
            let before = updated.clone();
            updated = upsert(&updated, MOD_DATETIME_KEY, &timestamp);
            if updated != before {
                actions.push(FileAction::Touched { timestamp });
            }
        }
        Some(Ok(DraftState::First)) => {
            updated = upsert(&updated, DRAFT_KEY, DraftState::Published.as_str());
            updated = clear(&updated, MOD_DATETIME_KEY);
            actions.push(FileAction::Published);
        }
        Some(Ok(DraftState::Unpublished)) | None => {}
        Some(Err(_)) => {
            warn!(
                draft = fm.get(DRAFT_KEY),
                "unrecognized draft value, leaving lifecycle fields alone"
            );
        }
    }

    if config.hook.set_reading_time {
        let minutes = reading_time(&updated, config.hook.words_per_minute);
        let before = updated.clone();
        updated = upsert(&updated, READING_TIME_KEY, &minutes.to_string());
        if updated != before {
            actions.push(FileAction::ReadingTime { minutes });
        }
    }

    Some((updated, actions))
}

// ---------------------------------------------------------------------------
// Hook run
// ---------------------------------------------------------------------------

/// Run the full pre-commit pipeline against the staged index.
#[instrument(skip_all, fields(root = %root.display(), dry_run = opts.dry_run))]
pub fn run_hook(
    root: &Path,
    config: &AppConfig,
    opts: &HookOptions,
    progress: &dyn ProgressReporter,
) -> Result<HookReport> {
    let start = Instant::now();

    progress.phase("Scanning staged files");
    let staged = mdxhook_git::staged_markdown_files(root, &config.hook.extensions)?;

    let mut files = Vec::with_capacity(staged.len());
    let mut files_rewritten = 0;

    for file in &staged {
        info!(path = %file.path, "checking staged document");

        let abs = root.join(&file.path);
        let content =
            std::fs::read_to_string(&abs).map_err(|e| MdxHookError::io(&abs, e))?;

        let Some((updated, actions)) = plan_rewrite(&content, config, Utc::now()) else {
            warn!(path = %file.path, "no frontmatter block, skipping");
            files.push(FileReport {
                path: file.path.clone(),
                actions: Vec::new(),
            });
            continue;
        };

        if updated != content {
            files_rewritten += 1;
            if !opts.dry_run {
                std::fs::write(&abs, &updated).map_err(|e| MdxHookError::io(&abs, e))?;
                mdxhook_git::stage(root, &file.path)?;
            }
        }

        for action in &actions {
            info!(path = %file.path, "{action}");
        }

        progress.file_checked(&file.path, &actions);
        files.push(FileReport {
            path: file.path.clone(),
            actions,
        });
    }

    if !opts.dry_run {
        progress.phase("Refreshing index");
        mdxhook_git::refresh_index(root)?;

        if config.lint.enabled {
            progress.phase("Running lint");
            mdxhook_git::run_lint(root, &config.lint.command, &config.lint.args)?;
        }
    }

    Ok(HookReport {
        files_scanned: staged.len(),
        files_rewritten,
        files,
        elapsed_ms: start.elapsed().as_millis() as u64,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
