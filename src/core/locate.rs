//! core::locate
//!
//! Find a component by id.
//!
//! Regions are scanned in order and, within each, components in order. The
//! first component whose id matches wins across the whole document; ids are
//! assumed unique but this is not verified.

use super::document::{Coordinate, Document};
use super::errors::PatchError;
use crate::ui::output::{self, Verbosity};

/// Locate the first component with the given id.
///
/// In debug mode, one trace line per scanned region lists the component ids
/// considered. Tracing never changes the result.
///
/// # Errors
///
/// Returns [`PatchError::NotFound`] if no component matches.
pub fn locate(
    document: &Document,
    id: &str,
    verbosity: Verbosity,
) -> Result<Coordinate, PatchError> {
    for (r, region) in document.regions.iter().enumerate() {
        output::debug(
            format!(
                "region '{}': [{}]",
                region.name(),
                region.component_ids().join(", ")
            ),
            verbosity,
        );

        if let Some(c) = region.components().iter().position(|comp| comp.has_id(id)) {
            return Ok(Coordinate {
                region: r,
                component: c,
            });
        }
    }

    Err(PatchError::NotFound { id: id.to_string() })
}
