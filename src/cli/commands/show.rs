//! show command - Display the layout of a page or one component

use std::path::Path;

use crate::core::document::{Attributes, Document};
use crate::core::locate::locate;
use crate::engine::Context;
use crate::store::{DocumentStore, JsonFileStore};
use crate::ui::output;
use anyhow::{Context as _, Result};
use serde_json::Value;

/// Show regions and component ids, or the attributes of one component.
pub fn show(ctx: &Context, file: &Path, id: Option<&str>) -> Result<()> {
    let verbosity = ctx.verbosity();
    let document = JsonFileStore::new()
        .load(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    match id {
        None => output::print(render_layout(&document), verbosity),
        Some(id) => {
            let at = locate(&document, id, verbosity)?;
            output::debug(format!("component '{}' at {}", id, at), verbosity);
            if let Some(component) = document.component(at) {
                let attributes = component
                    .attributes()
                    .map(decoded_attributes)
                    .unwrap_or_default();
                output::print_json(&attributes, verbosity);
            }
        }
    }

    Ok(())
}

/// One line per region followed by its component ids.
fn render_layout(document: &Document) -> String {
    let mut lines = Vec::new();
    for (index, region) in document.regions.iter().enumerate() {
        match region.region_name.as_deref() {
            Some(name) => lines.push(format!("{} ({} components)", name, region.components().len())),
            None => lines.push(format!(
                "regions[{}] ({} components)",
                index,
                region.components().len()
            )),
        }
        let ids = region.component_ids();
        if !ids.is_empty() {
            lines.push(output::format_list(&ids, "  - "));
        }
    }
    lines.join("\n")
}

/// Attributes with string values holding JSON objects or arrays decoded.
fn decoded_attributes(attributes: &Attributes) -> Attributes {
    attributes
        .iter()
        .map(|(key, value)| {
            let shown = match value {
                Value::String(text) => match serde_json::from_str::<Value>(text) {
                    Ok(decoded @ (Value::Object(_) | Value::Array(_))) => decoded,
                    _ => value.clone(),
                },
                _ => value.clone(),
            };
            (key.clone(), shown)
        })
        .collect()
}
