//! core::patch
//!
//! Apply a resolved value to a component's attributes.
//!
//! A plain target replaces the property wholesale. A sub-property target
//! treats the property as a JSON-encoded object: it is decoded, the key is
//! set, and the object is encoded back into the string. The value is never
//! spliced into the text directly.

use serde_json::{Map, Value};

use super::document::Attributes;
use super::errors::PatchError;

/// The property (and optional embedded key) to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTarget {
    /// Attribute name.
    pub property: String,
    /// Key inside the JSON object encoded in the attribute.
    pub subproperty: Option<String>,
}

impl PatchTarget {
    /// Target a whole property.
    pub fn property(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            subproperty: None,
        }
    }

    /// Target a key of the JSON object stored in a property.
    pub fn subproperty(property: impl Into<String>, subproperty: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            subproperty: Some(subproperty.into()),
        }
    }
}

impl std::fmt::Display for PatchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subproperty {
            Some(sub) => write!(f, "{}.{}", self.property, sub),
            None => f.write_str(&self.property),
        }
    }
}

/// Write `new_value` at `target` and return the string now stored in the property.
///
/// # Errors
///
/// Returns [`PatchError::MalformedEmbeddedJson`] for a sub-property target
/// when the property is absent, not a string, not valid JSON, or not a JSON
/// object. The attributes are left untouched in that case.
pub fn patch(
    attributes: &mut Attributes,
    target: &PatchTarget,
    new_value: &str,
) -> Result<String, PatchError> {
    let stored = match &target.subproperty {
        None => new_value.to_string(),
        Some(sub) => {
            let mut object = decode_embedded(attributes, &target.property)?;
            object.insert(sub.clone(), Value::String(new_value.to_string()));
            serde_json::to_string(&object).map_err(|e| PatchError::MalformedEmbeddedJson {
                property: target.property.clone(),
                reason: e.to_string(),
            })?
        }
    };

    attributes.insert(target.property.clone(), Value::String(stored.clone()));
    Ok(stored)
}

/// Decode the JSON object encoded in a string attribute.
fn decode_embedded(
    attributes: &Attributes,
    property: &str,
) -> Result<Map<String, Value>, PatchError> {
    let malformed = |reason: String| PatchError::MalformedEmbeddedJson {
        property: property.to_string(),
        reason,
    };

    let text = match attributes.get(property) {
        Some(Value::String(text)) => text,
        Some(other) => {
            return Err(malformed(format!(
                "expected a JSON string, found {}",
                kind(other)
            )))
        }
        None => return Err(malformed("property is not set".to_string())),
    };

    match serde_json::from_str::<Value>(text).map_err(|e| malformed(e.to_string()))? {
        Value::Object(object) => Ok(object),
        other => Err(malformed(format!(
            "expected a JSON object, found {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => panic!("attributes must be an object"),
        }
    }

    #[test]
    fn replaces_whole_property() {
        let mut a = attrs(json!({ "title": "Old", "other": 1 }));
        let stored = patch(&mut a, &PatchTarget::property("title"), "New").unwrap();
        assert_eq!(stored, "New");
        assert_eq!(a["title"], "New");
        assert_eq!(a["other"], 1);
    }

    #[test]
    fn replaces_non_string_and_absent_values() {
        let mut a = attrs(json!({ "count": 3 }));
        patch(&mut a, &PatchTarget::property("count"), "4").unwrap();
        patch(&mut a, &PatchTarget::property("fresh"), "yes").unwrap();
        assert_eq!(a["count"], "4");
        assert_eq!(a["fresh"], "yes");
    }

    #[test]
    fn sets_embedded_subproperty() {
        let mut a = attrs(json!({ "title": "{\"label\":\"Old\",\"size\":2}" }));
        let stored = patch(&mut a, &PatchTarget::subproperty("title", "label"), "New").unwrap();

        let decoded: Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(decoded, json!({ "label": "New", "size": 2 }));
        assert_eq!(a["title"], Value::String(stored));
    }

    #[test]
    fn adds_missing_subproperty() {
        let mut a = attrs(json!({ "config": "{}" }));
        let stored = patch(&mut a, &PatchTarget::subproperty("config", "recordId"), "001").unwrap();
        assert_eq!(stored, "{\"recordId\":\"001\"}");
    }

    #[test]
    fn quotes_in_value_are_encoded() {
        let mut a = attrs(json!({ "config": "{}" }));
        let stored =
            patch(&mut a, &PatchTarget::subproperty("config", "label"), "say \"hi\"").unwrap();
        let decoded: Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(decoded["label"], "say \"hi\"");
    }

    #[test]
    fn subproperty_patch_is_idempotent() {
        let mut a = attrs(json!({ "title": "{\"label\":\"Old\"}" }));
        let target = PatchTarget::subproperty("title", "label");
        let first = patch(&mut a, &target, "New").unwrap();
        let second = patch(&mut a, &target, "New").unwrap();

        let first: Value = serde_json::from_str(&first).unwrap();
        let second: Value = serde_json::from_str(&second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_embedded_json_is_malformed() {
        let mut a = attrs(json!({ "title": "not json" }));
        let err = patch(&mut a, &PatchTarget::subproperty("title", "label"), "New").unwrap_err();
        assert!(matches!(err, PatchError::MalformedEmbeddedJson { .. }));
        assert_eq!(a["title"], "not json");
    }

    #[test]
    fn non_object_embedded_json_is_malformed() {
        let mut a = attrs(json!({ "list": "[1,2]", "num": 5 }));
        let err = patch(&mut a, &PatchTarget::subproperty("list", "x"), "y").unwrap_err();
        match err {
            PatchError::MalformedEmbeddedJson { reason, .. } => assert!(reason.contains("array")),
            other => panic!("expected MalformedEmbeddedJson, got {:?}", other),
        }

        let err = patch(&mut a, &PatchTarget::subproperty("num", "x"), "y").unwrap_err();
        assert!(matches!(err, PatchError::MalformedEmbeddedJson { .. }));
    }

    #[test]
    fn absent_property_with_subproperty_is_malformed() {
        let mut a = Attributes::new();
        let err = patch(&mut a, &PatchTarget::subproperty("title", "label"), "New").unwrap_err();
        assert!(matches!(err, PatchError::MalformedEmbeddedJson { .. }));
        assert!(a.is_empty());
    }

    #[test]
    fn target_display() {
        assert_eq!(PatchTarget::property("title").to_string(), "title");
        assert_eq!(
            PatchTarget::subproperty("title", "label").to_string(),
            "title.label"
        );
    }
}
