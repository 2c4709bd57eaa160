//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing and JSON rendering
//!
//! # Design
//!
//! All output goes through this module so that `--quiet` and `--debug` are
//! honored consistently. Diagnostics go to stderr, results to stdout.

pub mod output;
