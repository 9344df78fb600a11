//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

use mdxhook_core::install::install_hook;
use mdxhook_core::new::new_document;
use mdxhook_core::pipeline::{HookOptions, ProgressReporter, SilentProgress, run_hook};
use mdxhook_shared::{AppConfig, FileAction, HookReport, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// mdxhook — keep MDX frontmatter honest at commit time.
#[derive(Parser)]
#[command(
    name = "mdxhook",
    version,
    about = "Normalize MDX frontmatter (ids, draft lifecycle, timestamps, reading time) before each commit.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the pre-commit pipeline against the staged index.
    ///
    /// This is what the installed hook calls. Pipeline failures are
    /// reported but never fail the commit.
    Run,

    /// Dry-run: show what a hook run would rewrite, without touching
    /// files or the index.
    Check {
        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Install mdxhook as this repository's pre-commit hook.
    Install {
        /// Replace an existing hook not owned by mdxhook.
        #[arg(long)]
        force: bool,
    },

    /// Scaffold a new draft document with generated frontmatter.
    New {
        /// Path of the file to create (e.g., src/content/blog/post.mdx).
        path: PathBuf,

        /// Document title (defaults to a prettified file name).
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default mdxhook.toml at the repository root.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "mdxhook=info",
        1 => "mdxhook=debug",
        _ => "mdxhook=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays clean for command output
    // (see `cmd_check`'s JSON report).
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run => cmd_run(),
        Command::Check { json } => cmd_check(json),
        Command::Install { force } => cmd_install(force),
        Command::New { path, title } => cmd_new(&path, title.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// Locate the repository root and load its config.
fn repo_context() -> Result<(PathBuf, AppConfig)> {
    let root = mdxhook_git::repo_root()?;
    let config = load_config(&root)?;
    Ok((root, config))
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Prints one line per checked file and one per applied rewrite.
struct CliProgress;

impl ProgressReporter for CliProgress {
    fn phase(&self, _name: &str) {}

    fn file_checked(&self, path: &str, actions: &[FileAction]) {
        println!("Checking {path}");
        for action in actions {
            println!("  {action}");
        }
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_run() -> Result<()> {
    // The hook must never abort a commit: any failure is reported and the
    // process still exits 0.
    match execute_hook(false, &CliProgress) {
        Ok(report) => {
            info!(
                scanned = report.files_scanned,
                rewritten = report.files_rewritten,
                elapsed_ms = report.elapsed_ms,
                "hook run complete"
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
        }
    }
    Ok(())
}

fn cmd_check(json: bool) -> Result<()> {
    // Keep stdout clean for the report (especially in JSON mode).
    let report = execute_hook(true, &SilentProgress)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("  Staged documents: {}", report.files_scanned);
    println!("  Would rewrite:    {}", report.files_rewritten);
    for file in &report.files {
        if file.actions.is_empty() {
            continue;
        }
        println!("  {}", file.path);
        for action in &file.actions {
            println!("    - {action}");
        }
    }
    println!();

    Ok(())
}

/// Shared body of `run` and `check`.
fn execute_hook(dry_run: bool, progress: &dyn ProgressReporter) -> Result<HookReport> {
    let (root, config) = repo_context()?;
    let opts = HookOptions { dry_run };
    let report = run_hook(&root, &config, &opts, progress)?;
    Ok(report)
}

fn cmd_install(force: bool) -> Result<()> {
    let root = mdxhook_git::repo_root()?;
    let path = install_hook(&root, force)?;
    println!("Installed pre-commit hook at: {}", path.display());
    Ok(())
}

fn cmd_new(path: &Path, title: Option<&str>) -> Result<()> {
    if path.extension().is_none() {
        return Err(eyre!(
            "'{}' has no file extension — expected something like post.mdx",
            path.display()
        ));
    }

    // `new` also works outside a repository; fall back to defaults then.
    let config = match mdxhook_git::repo_root() {
        Ok(root) => load_config(&root)?,
        Err(_) => AppConfig::default(),
    };

    let created = new_document(path, title, &config)?;
    println!("Created draft: {}", created.display());
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let root = mdxhook_git::repo_root()?;
    let path = init_config(&root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let root = match mdxhook_git::repo_root() {
        Ok(root) => root,
        Err(_) => std::env::current_dir()?,
    };
    let config: AppConfig = load_config(&root)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
