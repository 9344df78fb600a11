//! Installation of the pre-commit hook script into `.git/hooks/`.

use std::path::{Path, PathBuf};

use tracing::info;

use mdxhook_shared::{MdxHookError, Result};

/// Marker line identifying a hook script we own and may overwrite.
const HOOK_MARKER: &str = "# managed by mdxhook";

/// The script written to `.git/hooks/pre-commit`.
const HOOK_SCRIPT: &str = "#!/bin/sh\n# managed by mdxhook\nexec mdxhook run\n";

/// Write the pre-commit hook script into the repository.
///
/// Refuses to clobber a pre-existing hook it does not own unless `force`
/// is set. Returns the path of the installed script.
pub fn install_hook(root: &Path, force: bool) -> Result<PathBuf> {
    let hooks_dir = root.join(".git").join("hooks");
    if !hooks_dir.is_dir() {
        return Err(MdxHookError::install(format!(
            "no .git/hooks directory under '{}' — is this a git repository?",
            root.display()
        )));
    }

    let hook_path = hooks_dir.join("pre-commit");
    if hook_path.exists() && !force {
        let existing = std::fs::read_to_string(&hook_path).unwrap_or_default();
        if !existing.contains(HOOK_MARKER) {
            return Err(MdxHookError::install(format!(
                "a pre-commit hook already exists at '{}'; re-run with --force to replace it",
                hook_path.display()
            )));
        }
    }

    std::fs::write(&hook_path, HOOK_SCRIPT).map_err(|e| MdxHookError::io(&hook_path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o755);
        std::fs::set_permissions(&hook_path, perms)
            .map_err(|e| MdxHookError::io(&hook_path, e))?;
    }

    info!(path = %hook_path.display(), "installed pre-commit hook");
    Ok(hook_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join(".git/hooks")).expect("hooks dir");
        dir
    }

    #[test]
    fn installs_fresh_hook() {
        let repo = fake_repo();
        let path = install_hook(repo.path(), false).expect("install");

        let script = std::fs::read_to_string(&path).expect("read hook");
        assert!(script.starts_with("#!/bin/sh"));
        assert!(script.contains("mdxhook run"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o111, 0o111, "hook must be executable");
        }
    }

    #[test]
    fn reinstall_over_own_hook_succeeds() {
        let repo = fake_repo();
        install_hook(repo.path(), false).expect("first install");
        install_hook(repo.path(), false).expect("second install");
    }

    #[test]
    fn refuses_foreign_hook_without_force() {
        let repo = fake_repo();
        let hook = repo.path().join(".git/hooks/pre-commit");
        std::fs::write(&hook, "#!/bin/sh\necho custom hook\n").expect("write");

        let err = install_hook(repo.path(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        install_hook(repo.path(), true).expect("forced install");
        let script = std::fs::read_to_string(&hook).expect("read");
        assert!(script.contains("mdxhook run"));
    }

    #[test]
    fn errors_outside_git_repository() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = install_hook(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains(".git/hooks"));
    }
}
