//! flexipatch - Patch component properties in Salesforce FlexiPage layouts
//!
//! flexipatch finds one component in a page layout by id and rewrites one of
//! its properties. The new value is a literal, the single result of a SOQL
//! query, or a variable of the connected org session. Properties holding
//! embedded JSON can be patched one key at a time.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, wires collaborators)
//! - [`engine`] - Runs an update: validate, load, resolve, locate, patch, commit
//! - [`core`] - Document model, locator, resolver, patcher, config
//! - [`store`] - Loading and saving documents
//! - [`org`] - Salesforce query client and session identity
//! - [`secrets`] - Secret storage for access tokens
//! - [`ui`] - Output utilities
//!
//! # Guarantees
//!
//! 1. Exactly one value source is accepted, checked before any I/O
//! 2. Nothing is written unless every step before the save succeeded
//! 3. Keys the tool does not model are written back unchanged

pub mod cli;
pub mod core;
pub mod engine;
pub mod org;
pub mod secrets;
pub mod store;
pub mod ui;
