//! cli
//!
//! Command-line interface layer for flexipatch.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Build the org connection and document store a command needs
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Document updates go through
//! [`crate::engine::update`], which owns validation, resolution and patching.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::engine;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = engine::Context {
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(),
        instance_url: cli.instance_url.clone(),
        api_version: cli.api_version.clone(),
    };

    commands::dispatch(cli.command, &ctx)
}
