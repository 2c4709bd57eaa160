//! core
//!
//! Domain types and the patching logic.
//!
//! # Modules
//!
//! - [`document`] - Page layout document schema
//! - [`locate`] - Find a component by id
//! - [`resolve`] - Produce the value to write from one source
//! - [`patch`] - Write the value into a component's attributes
//! - [`errors`] - Error taxonomy for a patch invocation
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - The core performs no I/O of its own; storage and org access are injected
//! - Value sources are an enum, so "exactly one source" holds by construction
//! - Embedded JSON is decoded and re-encoded, never edited as text

pub mod config;
pub mod document;
pub mod errors;
pub mod locate;
pub mod patch;
pub mod resolve;

pub use document::{Attributes, Component, Coordinate, Document, Region};
pub use errors::PatchError;
pub use locate::locate;
pub use patch::{patch, PatchTarget};
pub use resolve::{resolve, OrgHandle, ResolutionMode, ValueInputs, VariableName};
