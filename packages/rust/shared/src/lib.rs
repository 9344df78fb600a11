//! Shared types, error model, and configuration for mdxhook.
//!
//! This crate is the foundation depended on by all other mdxhook crates.
//! It provides:
//! - [`MdxHookError`] — the unified error type
//! - Domain types ([`DraftState`], [`FileAction`], [`HookReport`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, HookSettings, LintSettings, ScaffoldSettings, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{MdxHookError, Result};
pub use types::{
    DRAFT_KEY, DraftState, FileAction, FileReport, HookReport, ID_KEY, MOD_DATETIME_KEY,
    READING_TIME_KEY,
};
