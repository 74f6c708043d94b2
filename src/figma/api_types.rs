//! Figma API response types for parsing JSON from the Figma REST API.
//!
//! Every style-bearing field is optional. A JSON `null` is accepted wherever
//! a list or map is expected and treated as empty, so partially populated
//! payloads still deserialize.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn opaque() -> f64 {
    1.0
}

/// A Figma file response from the files endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFile {
    #[serde(default)]
    pub name: String,
    pub last_modified: Option<String>,
    pub version: Option<String>,
    pub thumbnail_url: Option<String>,
    pub document: FigmaNode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: HashMap<String, FigmaComponent>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub component_sets: HashMap<String, FigmaComponentSet>,
}

/// Response from the nodes endpoint.
///
/// Ids the API could not resolve come back as `null` entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaNodesResponse {
    #[serde(default)]
    pub name: String,
    pub last_modified: Option<String>,
    pub version: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: HashMap<String, Option<FigmaNodeWrapper>>,
}

/// Wrapper containing the document for a node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaNodeWrapper {
    pub document: FigmaNode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: HashMap<String, FigmaComponent>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub component_sets: HashMap<String, FigmaComponentSet>,
}

/// Component metadata from the file or node envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaComponent {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub component_set_id: Option<String>,
}

/// Component set metadata from the file or node envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaComponentSet {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Raw Figma node data from the API.
///
/// The `type` tag is kept as an opaque string; unknown node types are carried
/// through unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    pub visible: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<FigmaNode>,
    pub absolute_bounding_box: Option<FigmaBoundingBox>,

    // Text
    pub characters: Option<String>,
    pub style: Option<FigmaTypeStyle>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub character_style_overrides: Vec<usize>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub style_override_table: HashMap<String, FigmaTypeStyle>,

    // Paint
    #[serde(default, deserialize_with = "null_as_default")]
    pub fills: Vec<FigmaPaint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strokes: Vec<FigmaPaint>,
    pub stroke_weight: Option<f64>,
    pub individual_stroke_weights: Option<FigmaStrokeWeights>,
    pub stroke_align: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stroke_dashes: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub effects: Vec<FigmaEffect>,
    pub opacity: Option<f64>,
    pub corner_radius: Option<f64>,
    pub rectangle_corner_radii: Option<Vec<f64>>,

    // Auto layout
    pub layout_mode: Option<String>,
    pub layout_wrap: Option<String>,
    pub primary_axis_align_items: Option<String>,
    pub counter_axis_align_items: Option<String>,
    pub item_spacing: Option<f64>,
    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub layout_sizing_horizontal: Option<String>,
    pub layout_sizing_vertical: Option<String>,
    pub layout_positioning: Option<String>,
    pub layout_align: Option<String>,
    pub layout_grow: Option<f64>,

    pub component_id: Option<String>,
}

impl FigmaNode {
    /// Hidden in the editor. Absent means visible.
    pub fn is_hidden(&self) -> bool {
        self.visible == Some(false)
    }
}

/// Bounding box coordinates from Figma.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaBoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Per-side stroke weights.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaStrokeWeights {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
}

/// Typography style from Figma.
///
/// Entries of `styleOverrideTable` use the same shape with only the
/// overridden fields set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaTypeStyle {
    pub font_family: Option<String>,
    pub font_weight: Option<f64>,
    pub font_size: Option<f64>,
    pub line_height_px: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub text_case: Option<String>,
    pub text_decoration: Option<String>,
    pub text_align_horizontal: Option<String>,
    pub italic: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fills: Vec<FigmaPaint>,
}

impl FigmaTypeStyle {
    /// Field-wise merge: values set on `over` win, everything else comes from `self`.
    ///
    /// Fills are not inherited; a run only carries fills its override sets.
    pub fn merged_with(&self, over: &FigmaTypeStyle) -> FigmaTypeStyle {
        FigmaTypeStyle {
            font_family: over.font_family.clone().or_else(|| self.font_family.clone()),
            font_weight: over.font_weight.or(self.font_weight),
            font_size: over.font_size.or(self.font_size),
            line_height_px: over.line_height_px.or(self.line_height_px),
            letter_spacing: over.letter_spacing.or(self.letter_spacing),
            text_case: over.text_case.clone().or_else(|| self.text_case.clone()),
            text_decoration: over
                .text_decoration
                .clone()
                .or_else(|| self.text_decoration.clone()),
            text_align_horizontal: over
                .text_align_horizontal
                .clone()
                .or_else(|| self.text_align_horizontal.clone()),
            italic: over.italic.or(self.italic),
            fills: over.fills.clone(),
        }
    }
}

/// Paint/fill data from Figma.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaPaint {
    #[serde(rename = "type", default)]
    pub paint_type: String,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub color: Option<FigmaColor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gradient_handle_positions: Vec<FigmaVector>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gradient_stops: Vec<FigmaColorStop>,
    pub image_ref: Option<String>,
    pub scale_mode: Option<String>,
}

/// Visual effect (shadow or blur) from Figma.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaEffect {
    #[serde(rename = "type", default)]
    pub effect_type: String,
    pub visible: Option<bool>,
    pub radius: Option<f64>,
    pub spread: Option<f64>,
    pub color: Option<FigmaColor>,
    pub offset: Option<FigmaVector>,
}

/// RGBA color from Figma (0.0-1.0 range).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

/// A 2D vector, used for gradient handles and shadow offsets.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FigmaVector {
    pub x: f64,
    pub y: f64,
}

/// A gradient color stop.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FigmaColorStop {
    pub position: f64,
    pub color: FigmaColor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_lists_deserialize_as_empty() {
        let node: FigmaNode = serde_json::from_value(json!({
            "id": "1:1",
            "type": "FRAME",
            "children": null,
            "fills": null,
            "effects": null
        }))
        .expect("node");

        assert!(node.children.is_empty());
        assert!(node.fills.is_empty());
        assert!(node.effects.is_empty());
    }

    #[test]
    fn unknown_type_and_fields_pass_through() {
        let node: FigmaNode = serde_json::from_value(json!({
            "id": "9:9",
            "type": "SOMETHING_NEW",
            "exoticField": {"nested": true}
        }))
        .expect("node");

        assert_eq!(node.node_type, "SOMETHING_NEW");
        assert!(!node.is_hidden());
    }

    #[test]
    fn color_alpha_defaults_to_opaque() {
        let color: FigmaColor = serde_json::from_value(json!({"r": 1, "g": 0, "b": 0})).unwrap();
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn nodes_response_keeps_null_entries() {
        let resp: FigmaNodesResponse = serde_json::from_value(json!({
            "name": "File",
            "nodes": {"1:2": null}
        }))
        .unwrap();

        assert!(resp.nodes.get("1:2").expect("entry").is_none());
    }

    #[test]
    fn override_merge_prefers_override_fields() {
        let base = FigmaTypeStyle {
            font_family: Some("Inter".into()),
            font_size: Some(14.0),
            font_weight: Some(400.0),
            ..Default::default()
        };
        let over = FigmaTypeStyle {
            font_weight: Some(700.0),
            ..Default::default()
        };

        let merged = base.merged_with(&over);
        assert_eq!(merged.font_family.as_deref(), Some("Inter"));
        assert_eq!(merged.font_size, Some(14.0));
        assert_eq!(merged.font_weight, Some(700.0));
    }
}
