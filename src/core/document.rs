//! core::document
//!
//! Page layout document schema.
//!
//! # Shape
//!
//! ```json
//! {
//!   "regions": [
//!     {
//!       "regionName": "header",
//!       "components": [
//!         { "id": "abc", "componentAttributes": { "title": "Old" } }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Only the keys needed to locate and patch components are modeled. Every
//! other key is captured in a flattened `extra` map and written back
//! unchanged, so a round trip through load and save never drops data.
//! Modeled keys the input omits stay omitted: `components` and
//! `componentAttributes` are optional, and an absent list or map is not
//! written back as an empty one.
//!
//! A document without `regions` fails to deserialize. That is a
//! precondition violation of the input file, not something to recover from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property bag of a component.
pub type Attributes = Map<String, Value>;

/// Root of a page layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Ordered regions of the page.
    pub regions: Vec<Region>,

    /// Keys not modeled here, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named section of the page holding an ordered list of components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Region name, used for diagnostics only.
    #[serde(rename = "regionName", default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,

    /// Components in display order, `None` if the key is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single UI component instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Component identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Property name to value, `None` if the key is absent.
    #[serde(
        rename = "componentAttributes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub component_attributes: Option<Attributes>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Position of a component inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Index into [`Document::regions`].
    pub region: usize,
    /// Index into [`Region::components`].
    pub component: usize,
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "regions[{}].components[{}]", self.region, self.component)
    }
}

impl Document {
    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Borrow the component at a coordinate.
    pub fn component(&self, at: Coordinate) -> Option<&Component> {
        self.regions.get(at.region)?.components().get(at.component)
    }

    /// Mutably borrow the component at a coordinate.
    pub fn component_mut(&mut self, at: Coordinate) -> Option<&mut Component> {
        self.regions
            .get_mut(at.region)?
            .components
            .as_mut()?
            .get_mut(at.component)
    }
}

impl Region {
    /// Region name, or an empty string if the region has none.
    pub fn name(&self) -> &str {
        self.region_name.as_deref().unwrap_or("")
    }

    /// Components in display order; empty if the region has none.
    pub fn components(&self) -> &[Component] {
        self.components.as_deref().unwrap_or(&[])
    }

    /// Identifiers of this region's components, in order.
    pub fn component_ids(&self) -> Vec<&str> {
        self.components().iter().map(Component::id).collect()
    }
}

impl Component {
    /// Component id, or an empty string if the component has none.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// Whether this component carries the given id.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// Attributes, if the component has a `componentAttributes` key.
    pub fn attributes(&self) -> Option<&Attributes> {
        self.component_attributes.as_ref()
    }

    /// Attributes for writing, creating an empty map if the key is absent.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        self.component_attributes.get_or_insert_with(Attributes::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "masterLabel": "Account Page",
        "regions": [
            {
                "regionName": "header",
                "components": [
                    { "id": "abc", "componentAttributes": { "title": "Old" }, "componentName": "flexipage:richText" }
                ]
            },
            { "regionName": "empty" }
        ]
    }"#;

    #[test]
    fn parses_known_fields() {
        let doc = Document::from_json(SAMPLE).unwrap();
        assert_eq!(doc.regions.len(), 2);
        assert_eq!(doc.regions[0].name(), "header");
        assert_eq!(doc.regions[0].components()[0].id(), "abc");
        assert_eq!(
            doc.regions[0].components()[0].attributes().unwrap()["title"],
            "Old"
        );
        assert!(doc.regions[1].components.is_none());
        assert!(doc.regions[1].components().is_empty());
    }

    #[test]
    fn preserves_unknown_fields() {
        let doc = Document::from_json(SAMPLE).unwrap();
        let out = serde_json::to_value(&doc).unwrap();
        assert_eq!(out["masterLabel"], "Account Page");
        assert_eq!(
            out["regions"][0]["components"][0]["componentName"],
            "flexipage:richText"
        );
    }

    #[test]
    fn missing_regions_is_rejected() {
        assert!(Document::from_json(r#"{ "masterLabel": "x" }"#).is_err());
    }

    #[test]
    fn component_accessors() {
        let mut doc = Document::from_json(SAMPLE).unwrap();
        let at = Coordinate {
            region: 0,
            component: 0,
        };
        assert_eq!(doc.component(at).unwrap().id(), "abc");
        doc.component_mut(at).unwrap().id = Some("xyz".to_string());
        assert!(doc.regions[0].components()[0].has_id("xyz"));

        let missing = Coordinate {
            region: 1,
            component: 0,
        };
        assert!(doc.component(missing).is_none());
    }

    #[test]
    fn absent_optional_keys_are_not_written() {
        let text = r#"{"regions":[{"regionName":"empty"},{"components":[{"componentName":"c"}]}]}"#;
        let doc = Document::from_json(text).unwrap();
        assert_eq!(serde_json::to_string(&doc).unwrap(), text);
    }

    #[test]
    fn explicit_empty_collections_are_kept() {
        let text = r#"{"regions":[{"components":[{"componentAttributes":{}}]},{"components":[]}]}"#;
        let doc = Document::from_json(text).unwrap();
        assert_eq!(serde_json::to_string(&doc).unwrap(), text);
    }

    #[test]
    fn attributes_mut_creates_missing_map() {
        let mut doc = Document::from_json(r#"{"regions":[{"components":[{"id":"x"}]}]}"#).unwrap();
        let at = Coordinate {
            region: 0,
            component: 0,
        };
        let component = doc.component_mut(at).unwrap();
        assert!(component.attributes().is_none());

        component
            .attributes_mut()
            .insert("title".to_string(), Value::from("New"));

        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"regions":[{"components":[{"id":"x","componentAttributes":{"title":"New"}}]}]}"#
        );
    }

    #[test]
    fn coordinate_display() {
        let at = Coordinate {
            region: 2,
            component: 5,
        };
        assert_eq!(at.to_string(), "regions[2].components[5]");
    }
}
