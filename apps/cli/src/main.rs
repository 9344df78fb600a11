//! mdxhook CLI — frontmatter-normalizing git pre-commit hook.
//!
//! Assigns ids to new documents, drives the draft publication lifecycle,
//! tracks modification timestamps, and computes reading times for staged
//! MDX files, then re-stages them and runs the configured lint step.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
