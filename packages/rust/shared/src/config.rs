//! Application configuration for mdxhook.
//!
//! Per-repository config lives at `<repo root>/mdxhook.toml`, with a
//! user-level fallback at `~/.mdxhook/mdxhook.toml`. Missing files mean
//! defaults; CLI flags override config file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MdxHookError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "mdxhook.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".mdxhook";

// ---------------------------------------------------------------------------
// Config structs (matching mdxhook.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hook pipeline settings.
    #[serde(default)]
    pub hook: HookSettings,

    /// Downstream lint runner settings.
    #[serde(default)]
    pub lint: LintSettings,

    /// Settings for scaffolding new documents.
    #[serde(default)]
    pub scaffold: ScaffoldSettings,
}

/// `[hook]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookSettings {
    /// File extensions the hook manages (without the leading dot).
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Words-per-minute divisor for the reading time estimate.
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,

    /// Whether to write the `readingTime` frontmatter field.
    #[serde(default = "default_true")]
    pub set_reading_time: bool,
}

impl Default for HookSettings {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            words_per_minute: default_words_per_minute(),
            set_reading_time: default_true(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["mdx".into()]
}
fn default_words_per_minute() -> u32 {
    200
}
fn default_true() -> bool {
    true
}

/// `[lint]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintSettings {
    /// Whether to run the lint step at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Lint runner executable.
    #[serde(default = "default_lint_command")]
    pub command: String,

    /// Arguments passed to the lint runner.
    #[serde(default = "default_lint_args")]
    pub args: Vec<String>,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            command: default_lint_command(),
            args: default_lint_args(),
        }
    }
}

fn default_lint_command() -> String {
    "bun".into()
}
fn default_lint_args() -> Vec<String> {
    vec!["run".into(), "lint-staged".into()]
}

/// `[scaffold]` section — defaults for `mdxhook new`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldSettings {
    /// Author written into fresh frontmatter.
    #[serde(default = "default_author")]
    pub author: String,
}

impl Default for ScaffoldSettings {
    fn default() -> Self {
        Self {
            author: default_author(),
        }
    }
}

fn default_author() -> String {
    "Anonymous".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the user-level config directory (`~/.mdxhook/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MdxHookError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the user-level config file (`~/.mdxhook/mdxhook.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load config for a repository: `<root>/mdxhook.toml` first, then the
/// user-level file, then defaults.
pub fn load_config(repo_root: &Path) -> Result<AppConfig> {
    let repo_config = repo_root.join(CONFIG_FILE_NAME);
    if repo_config.exists() {
        return load_config_from(&repo_config);
    }

    let user_config = config_file_path()?;
    if user_config.exists() {
        return load_config_from(&user_config);
    }

    tracing::debug!("no config file found, using defaults");
    Ok(AppConfig::default())
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MdxHookError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| MdxHookError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file at `<root>/mdxhook.toml`.
/// Returns the path to the created file.
pub fn init_config(repo_root: &Path) -> Result<PathBuf> {
    let path = repo_root.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| MdxHookError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| MdxHookError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("words_per_minute"));
        assert!(toml_str.contains("lint-staged"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.hook.words_per_minute, 200);
        assert_eq!(parsed.hook.extensions, vec!["mdx".to_string()]);
        assert_eq!(parsed.lint.command, "bun");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[hook]
extensions = ["md", "mdx"]

[lint]
enabled = false
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.hook.extensions.len(), 2);
        assert_eq!(config.hook.words_per_minute, 200);
        assert!(!config.lint.enabled);
        assert_eq!(config.lint.args, vec!["run", "lint-staged"]);
    }

    #[test]
    fn load_config_prefers_repo_file() {
        let dir = std::env::temp_dir().join("mdxhook-config-test");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        std::fs::write(
            dir.join("mdxhook.toml"),
            "[hook]\nwords_per_minute = 150\n",
        )
        .expect("write config");

        let config = load_config(&dir).expect("load");
        assert_eq!(config.hook.words_per_minute, 150);

        std::fs::remove_dir_all(&dir).ok();
    }
}
