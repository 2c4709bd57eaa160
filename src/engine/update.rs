//! engine::update
//!
//! The document updater: load a page layout, compute the new value, write it
//! into one component, then either save the result or show it.

use std::path::PathBuf;

use serde_json::Value;

use crate::core::document::{Coordinate, Document};
use crate::core::errors::PatchError;
use crate::core::locate::locate;
use crate::core::patch::{patch, PatchTarget};
use crate::core::resolve::{resolve, OrgHandle, ValueInputs};
use crate::store::DocumentStore;
use crate::ui::output::{self, Verbosity};

/// A single property update.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    /// Document to edit.
    pub path: PathBuf,
    /// Identifier of the component to edit.
    pub component_id: String,
    /// Property (and optional embedded key) to write.
    pub target: PatchTarget,
    /// Raw value source options, validated before any I/O.
    pub inputs: ValueInputs,
    /// Save the result instead of previewing it.
    pub commit: bool,
}

/// Result of a successful update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// The mutated document.
    pub document: Document,
    /// Where the edited component sits.
    pub coordinate: Coordinate,
    /// String now stored in the targeted property.
    pub value: String,
    /// Whether the document was saved.
    pub committed: bool,
}

/// Apply `request` to the document it names.
///
/// On commit the document is saved through `store` and the stored value is
/// printed, decoded as JSON when it parses as JSON. On preview the whole
/// mutated document is printed and nothing is saved.
///
/// # Errors
///
/// Any failing step aborts the update and leaves the stored document as it
/// was. Input validation errors are reported before the store is read.
pub async fn update(
    request: UpdateRequest,
    store: &dyn DocumentStore,
    org: Option<OrgHandle<'_>>,
    verbosity: Verbosity,
) -> Result<UpdateOutcome, PatchError> {
    let mode = request.inputs.into_mode()?;
    output::debug(format!("resolution mode: {:?}", mode), verbosity);

    let mut document = store.load(&request.path)?;
    output::debug(
        format!(
            "loaded {} ({} regions)",
            request.path.display(),
            document.regions.len()
        ),
        verbosity,
    );

    let value = resolve(&mode, org).await?;
    output::debug(format!("resolved value: {}", value), verbosity);

    let coordinate = locate(&document, &request.component_id, verbosity)?;
    output::debug(
        format!("component '{}' at {}", request.component_id, coordinate),
        verbosity,
    );

    let component = document
        .component_mut(coordinate)
        .ok_or_else(|| PatchError::NotFound {
            id: request.component_id.clone(),
        })?;
    let attributes = component.attributes_mut();
    let stored = patch(attributes, &request.target, &value)?;
    output::debug(format!("{} = {}", request.target, stored), verbosity);
    output::debug_json("patched attributes", &*attributes, verbosity);

    if request.commit {
        store.save(&request.path, &document)?;
        output::print_json(&confirmation_value(&stored), verbosity);
    } else {
        output::print_json(&document, verbosity);
    }

    Ok(UpdateOutcome {
        document,
        coordinate,
        value: stored,
        committed: request.commit,
    })
}

/// Value shown after a commit: the stored string decoded as JSON, or the
/// string itself if it is not JSON.
pub fn confirmation_value(stored: &str) -> Value {
    serde_json::from_str(stored).unwrap_or_else(|_| Value::String(stored.to_string()))
}
