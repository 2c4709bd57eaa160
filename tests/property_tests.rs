//! Property-based tests for the locator, resolver and patcher.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use flexipatch::core::resolve::{apply_truncate, SHORT_ID_LEN};
use flexipatch::core::{locate, patch, resolve, Document, PatchError, PatchTarget, ResolutionMode};
use flexipatch::ui::output::Verbosity;

/// Strategy for component ids drawn from a small alphabet, so collisions
/// between regions are common.
fn component_id() -> impl Strategy<Value = String> {
    "[a-c]{1,2}"
}

/// Strategy for a layout: regions of component ids.
fn layout() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(component_id(), 0..4), 0..4)
}

fn document_from(layout: &[Vec<String>]) -> Document {
    let regions: Vec<Value> = layout
        .iter()
        .enumerate()
        .map(|(r, ids)| {
            let components: Vec<Value> = ids
                .iter()
                .map(|id| json!({ "id": id, "componentAttributes": {} }))
                .collect();
            json!({ "regionName": format!("r{}", r), "components": components })
        })
        .collect();
    serde_json::from_value(json!({ "regions": regions })).unwrap()
}

proptest! {
    #[test]
    fn locate_returns_first_match_in_document_order(layout in layout(), id in component_id()) {
        let document = document_from(&layout);
        let expected = layout
            .iter()
            .enumerate()
            .find_map(|(r, ids)| ids.iter().position(|c| *c == id).map(|c| (r, c)));

        match (locate(&document, &id, Verbosity::Quiet), expected) {
            (Ok(at), Some((r, c))) => {
                prop_assert_eq!(at.region, r);
                prop_assert_eq!(at.component, c);
            }
            (Err(PatchError::NotFound { id: missing }), None) => {
                prop_assert_eq!(missing, id);
            }
            (got, want) => {
                prop_assert!(false, "got {:?}, expected {:?}", got, want);
            }
        }
    }

    #[test]
    fn truncate_keeps_a_prefix_of_at_most_fifteen_chars(value in "\\PC{0,40}") {
        let out = apply_truncate(value.clone(), true);
        prop_assert!(value.starts_with(&out));
        prop_assert_eq!(out.chars().count(), value.chars().count().min(SHORT_ID_LEN));
        prop_assert_eq!(apply_truncate(value.clone(), false), value);
    }

    #[test]
    fn literal_resolves_to_itself(value in "\\PC{0,40}") {
        let mode = ResolutionMode::Literal { value: value.clone() };
        let resolved = tokio_test::block_on(resolve(&mode, None)).unwrap();
        prop_assert_eq!(resolved, value);
    }

    #[test]
    fn whole_property_patch_stores_value_verbatim(property in "[a-zA-Z]{1,12}", value in "\\PC{0,40}") {
        let mut attributes = Map::new();
        attributes.insert("other".to_string(), json!(7));

        let stored = patch(&mut attributes, &PatchTarget::property(property.clone()), &value).unwrap();

        prop_assert_eq!(&stored, &value);
        prop_assert_eq!(attributes.get(&property), Some(&Value::String(value)));
        if property != "other" {
            prop_assert_eq!(attributes.get("other"), Some(&json!(7)));
        }
    }

    #[test]
    fn subproperty_patch_is_idempotent(
        existing in prop::collection::btree_map("[a-z]{1,6}", "\\PC{0,10}", 0..5),
        key in "[a-z]{1,6}",
        value in "\\PC{0,20}",
    ) {
        let embedded = serde_json::to_string(&existing).unwrap();
        let mut attributes = Map::new();
        attributes.insert("config".to_string(), Value::String(embedded));
        let target = PatchTarget::subproperty("config", key.clone());

        let first = patch(&mut attributes, &target, &value).unwrap();
        let second = patch(&mut attributes, &target, &value).unwrap();

        let first: Value = serde_json::from_str(&first).unwrap();
        let second: Value = serde_json::from_str(&second).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first[key.as_str()], &Value::String(value));
        for (k, v) in &existing {
            if *k != key {
                prop_assert_eq!(&first[k.as_str()], &Value::String(v.clone()));
            }
        }
    }
}
