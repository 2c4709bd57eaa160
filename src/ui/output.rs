//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! JSON values (previews, confirmations) are pretty-printed with two-space
//! indentation, the same layout the document store writes.

use std::fmt::Display;

use serde::Serialize;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    #[default]
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Whether debug tracing is enabled.
    pub fn is_debug(self) -> bool {
        self == Verbosity::Debug
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity.is_debug() {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Render a value as pretty JSON.
///
/// Falls back to the compact `Debug` form if serialization fails, which only
/// happens for maps with non-string keys.
pub fn render_json<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{:?}", value))
}

/// Print a value as pretty JSON (respects quiet mode).
pub fn print_json<T: Serialize + std::fmt::Debug>(value: &T, verbosity: Verbosity) {
    print(render_json(value), verbosity);
}

/// Print a value as pretty JSON to stderr (only in debug mode).
pub fn debug_json<T: Serialize + std::fmt::Debug>(label: &str, value: &T, verbosity: Verbosity) {
    if verbosity.is_debug() {
        eprintln!("[debug] {}:\n{}", label, render_json(value));
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
