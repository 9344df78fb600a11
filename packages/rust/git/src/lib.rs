//! External process collaborators: git and the downstream lint runner.
//!
//! Everything here shells out via `std::process::Command`. The index is
//! read with `git diff --cached --name-status` and rewritten files are
//! re-staged with `git add`; no libgit2 binding is involved.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use mdxhook_shared::{MdxHookError, Result};

// ---------------------------------------------------------------------------
// Staged file listing
// ---------------------------------------------------------------------------

/// Index status of a staged file, as reported by `--name-status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedStatus {
    /// Newly added to the index (`A`).
    Added,
    /// Modified relative to HEAD (`M`).
    Modified,
}

/// One staged file the hook will process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Path relative to the repository root.
    pub path: String,
    /// Staged status letter.
    pub status: StagedStatus,
}

/// Locate the repository root from the current working directory.
pub fn repo_root() -> Result<PathBuf> {
    let stdout = run_git(None, &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(stdout.trim()))
}

/// List staged files with a managed extension (added or modified).
pub fn staged_markdown_files(root: &Path, extensions: &[String]) -> Result<Vec<StagedFile>> {
    let stdout = run_git(Some(root), &["diff", "--cached", "--name-status"])?;
    let files = parse_name_status(&stdout, extensions);
    debug!(count = files.len(), "staged files matching managed extensions");
    Ok(files)
}

/// Parse `git diff --cached --name-status` output, keeping `A`/`M` entries
/// whose path ends in one of the managed extensions.
///
/// Renames (`R…`) and deletions (`D`) are ignored: a rename carries content
/// already normalized on some earlier commit, and a deletion has nothing
/// left to rewrite.
pub fn parse_name_status(output: &str, extensions: &[String]) -> Vec<StagedFile> {
    let mut files = Vec::new();

    for line in output.lines() {
        let mut fields = line.split_whitespace();
        let Some(status) = fields.next() else {
            continue;
        };
        let Some(path) = fields.last() else {
            continue;
        };

        let status = match status.chars().next() {
            Some('A') => StagedStatus::Added,
            Some('M') => StagedStatus::Modified,
            _ => continue,
        };

        if has_managed_extension(path, extensions) {
            files.push(StagedFile {
                path: path.to_string(),
                status,
            });
        }
    }

    files
}

fn has_managed_extension(path: &str, extensions: &[String]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|managed| managed == ext))
}

// ---------------------------------------------------------------------------
// Index updates
// ---------------------------------------------------------------------------

/// Re-stage a rewritten file (`git add <path>`).
pub fn stage(root: &Path, path: &str) -> Result<()> {
    run_git(Some(root), &["add", path])?;
    debug!(path, "re-staged file");
    Ok(())
}

/// Refresh the whole index after the rewrite pass (`git update-index --again`).
pub fn refresh_index(root: &Path) -> Result<()> {
    run_git(Some(root), &["update-index", "--again"])?;
    Ok(())
}

/// Run one git command, capturing stdout and folding failures into
/// [`MdxHookError::Git`] with the command line and stderr attached.
fn run_git(root: Option<&Path>, args: &[&str]) -> Result<String> {
    let mut cmd = Command::new("git");
    if let Some(root) = root {
        cmd.current_dir(root);
    }

    let output = cmd
        .args(args)
        .output()
        .map_err(|e| MdxHookError::Git(format!("failed to spawn git {}: {e}", args.join(" "))))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MdxHookError::Git(format!(
            "git {} exited with status {}: {}",
            args.join(" "),
            output.status.code().unwrap_or(-1),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

// ---------------------------------------------------------------------------
// Lint runner
// ---------------------------------------------------------------------------

/// Invoke the configured lint runner (default `bun run lint-staged`),
/// inheriting stdio so its diagnostics reach the committer directly.
pub fn run_lint(root: &Path, command: &str, args: &[String]) -> Result<()> {
    info!(command, ?args, "running lint step");

    let status = Command::new(command)
        .args(args)
        .current_dir(root)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| MdxHookError::Lint(format!("failed to spawn {command}: {e}")))?;

    if !status.success() {
        return Err(MdxHookError::Lint(format!(
            "{command} exited with status {}",
            status.code().unwrap_or(-1)
        )));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        vec!["mdx".to_string()]
    }

    #[test]
    fn parse_keeps_added_and_modified_mdx() {
        let output = "M\tsrc/content/blog/post.mdx\n\
                      A\tsrc/content/blog/new-post.mdx\n\
                      D\tsrc/content/blog/gone.mdx\n\
                      M\tREADME.md\n";
        let files = parse_name_status(output, &exts());

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].status, StagedStatus::Modified);
        assert_eq!(files[0].path, "src/content/blog/post.mdx");
        assert_eq!(files[1].status, StagedStatus::Added);
    }

    #[test]
    fn parse_respects_configured_extensions() {
        let output = "M\tdocs/guide.md\nM\tsrc/post.mdx\n";
        let both = parse_name_status(output, &["md".into(), "mdx".into()]);
        assert_eq!(both.len(), 2);

        let md_only = parse_name_status(output, &["md".into()]);
        assert_eq!(md_only.len(), 1);
        assert_eq!(md_only[0].path, "docs/guide.md");
    }

    #[test]
    fn parse_ignores_renames_and_empty_lines() {
        let output = "\nR100\told.mdx\tnew.mdx\n\nM\tkept.mdx\n";
        let files = parse_name_status(output, &exts());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "kept.mdx");
    }

    #[test]
    fn parse_ignores_files_without_extension() {
        let output = "M\tMakefile\nA\tmdx\n";
        assert!(parse_name_status(output, &exts()).is_empty());
    }
}
