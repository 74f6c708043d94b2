//! Simplified design output types.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::style::{CanonicalStyle, Point, StyleCategory, StyleId};

/// The engine's single output value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedDesign {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub nodes: Vec<SimplifiedNode>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, ComponentMeta>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub component_sets: BTreeMap<String, ComponentMeta>,
    pub global_vars: GlobalVars,
}

impl SimplifiedDesign {
    /// All nodes in pre-order, roots first.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &SimplifiedNode> {
        let mut stack: Vec<&SimplifiedNode> = self.nodes.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// Deduplicated styles keyed by id, in first-interned order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalVars {
    entries: Vec<(StyleId, CanonicalStyle)>,
    /// Position of each id in `entries`.
    index: HashMap<StyleId, usize>,
}

impl GlobalVars {
    pub(crate) fn from_entries(entries: Vec<(StyleId, CanonicalStyle)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(slot, (id, _))| (id.clone(), slot))
            .collect();
        Self { entries, index }
    }

    pub fn get(&self, id: &StyleId) -> Option<&CanonicalStyle> {
        self.index.get(id).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains(&self, id: &StyleId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StyleId, &CanonicalStyle)> {
        self.entries.iter().map(|(id, style)| (id, style))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_category(&self, category: StyleCategory) -> usize {
        self.entries
            .iter()
            .filter(|(_, style)| style.category() == category)
            .count()
    }
}

impl Serialize for GlobalVars {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, style) in &self.entries {
            map.serialize_entry(id, style)?;
        }
        map.end()
    }
}

/// One node of the simplified tree. Owns its children.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedNode {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_position: Option<Point>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<StyleCategory, StyleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text_segments: Vec<TextSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SimplifiedNode>,
}

impl SimplifiedNode {
    pub fn style(&self, category: StyleCategory) -> Option<&StyleId> {
        self.styles.get(&category)
    }

    /// Every style id this node references directly (not its children).
    pub fn style_refs(&self) -> impl Iterator<Item = &StyleId> {
        self.styles.values().chain(
            self.text_segments
                .iter()
                .flat_map(|seg| seg.style.iter().chain(seg.fills.iter())),
        )
    }
}

/// A run of text sharing one resolved style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSegment {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fills: Option<StyleId>,
}

/// Absolute bounds as supplied by the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Component or component-set metadata carried from the response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMeta {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_set_id: Option<String>,
}
