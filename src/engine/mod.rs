//! engine
//!
//! Runs one property update end to end.
//!
//! # Lifecycle
//!
//! ```text
//! Validate inputs -> Load -> Resolve -> Locate -> Patch -> Commit | Preview
//! ```
//!
//! # Invariants
//!
//! - Input validation happens before any file or network access
//! - Nothing is written unless every earlier step succeeded
//! - The store is only touched for a committed update

pub mod update;

pub use update::{confirmation_value, update, UpdateOutcome, UpdateRequest};

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive prompts allowed.
    pub interactive: bool,
    /// Instance URL override from the command line.
    pub instance_url: Option<String>,
    /// API version override from the command line.
    pub api_version: Option<String>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            debug: false,
            quiet: false,
            interactive: true,
            instance_url: None,
            api_version: None,
        }
    }
}

impl Context {
    /// Output verbosity for this invocation.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}
