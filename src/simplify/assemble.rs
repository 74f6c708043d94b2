//! Building simplified nodes from walker visits.

use std::collections::BTreeMap;

use crate::figma::api_types::{FigmaNode, FigmaTypeStyle};
use crate::types::{BoundingBox, Point, SimplifiedNode, TextSegment};

use super::extract::{extract_fill, extract_styles, extract_typography, round2};
use super::vars::GlobalVarTable;
use super::walker::NodeContext;
use super::SimplifyError;

/// Assemble the visits of a pre-order walk back into trees.
///
/// Visits must arrive in pre-order with depth 0 marking a new root, which is
/// what [`super::walker::NodeWalker`] yields.
pub fn assemble_tree<'a, I>(
    visits: I,
    table: &mut GlobalVarTable,
) -> Result<Vec<SimplifiedNode>, SimplifyError>
where
    I: IntoIterator<Item = NodeContext<'a>>,
{
    let mut roots = Vec::new();
    let mut open: Vec<(usize, SimplifiedNode)> = Vec::new();

    for ctx in visits {
        while open.last().is_some_and(|(depth, _)| *depth >= ctx.depth) {
            close_last(&mut open, &mut roots);
        }
        open.push((ctx.depth, assemble_node(&ctx, table)?));
    }
    while !open.is_empty() {
        close_last(&mut open, &mut roots);
    }

    Ok(roots)
}

fn close_last(open: &mut Vec<(usize, SimplifiedNode)>, roots: &mut Vec<SimplifiedNode>) {
    if let Some((_, node)) = open.pop() {
        match open.last_mut() {
            Some((_, parent)) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// Build one node without its children, interning its styles into `table`.
pub fn assemble_node(
    ctx: &NodeContext<'_>,
    table: &mut GlobalVarTable,
) -> Result<SimplifiedNode, SimplifyError> {
    let node = ctx.node;

    let mut styles = BTreeMap::new();
    for style in extract_styles(node) {
        let category = style.category();
        styles.insert(category, table.intern(style)?);
    }

    let text_segments = match node.characters.as_deref() {
        Some(characters) if !characters.is_empty() => text_segments(node, characters, table)?,
        _ => Vec::new(),
    };

    let bounding_box = node.absolute_bounding_box.map(|bb| BoundingBox {
        x: bb.x,
        y: bb.y,
        width: bb.width,
        height: bb.height,
    });
    let relative_position = match (node.absolute_bounding_box, ctx.parent_box) {
        (Some(own), Some(parent)) => Some(Point {
            x: round2(own.x - parent.x),
            y: round2(own.y - parent.y),
        }),
        _ => None,
    };

    Ok(SimplifiedNode {
        id: node.id.clone(),
        name: node.name.clone(),
        node_type: node.node_type.clone(),
        bounding_box,
        relative_position,
        styles,
        text: node.characters.clone(),
        text_segments,
        opacity: node.opacity.map(round2).filter(|o| *o != 1.0),
        border_radius: border_radius(node),
        component_id: node.component_id.clone(),
        visible: node.is_hidden().then_some(false),
        children: Vec::new(),
    })
}

/// CSS-like radius: one value when uniform, four (tl tr br bl) otherwise.
pub fn border_radius(node: &FigmaNode) -> Option<String> {
    if let Some(radii) = node.rectangle_corner_radii.as_deref() {
        if radii.len() == 4 && radii.iter().any(|r| *r != radii[0]) {
            let parts: Vec<String> = radii.iter().map(|r| format!("{}px", round2(*r))).collect();
            return Some(parts.join(" "));
        }
    }
    node.corner_radius
        .map(round2)
        .filter(|r| *r > 0.0)
        .map(|r| format!("{r}px"))
}

/// A maximal run of characters sharing one override key.
#[derive(Debug, PartialEq)]
pub(crate) struct TextRun {
    pub text: String,
    pub key: usize,
}

/// Split `characters` wherever the override key changes.
///
/// Override indices address UTF-16 code units; positions past the end of
/// `overrides` use the base style (key 0).
pub(crate) fn split_runs(characters: &str, overrides: &[usize]) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut offset = 0;

    for ch in characters.chars() {
        let key = overrides.get(offset).copied().unwrap_or(0);
        offset += ch.len_utf16();
        match runs.last_mut() {
            Some(run) if run.key == key => run.text.push(ch),
            _ => runs.push(TextRun {
                text: ch.to_string(),
                key,
            }),
        }
    }
    runs
}

fn text_segments(
    node: &FigmaNode,
    characters: &str,
    table: &mut GlobalVarTable,
) -> Result<Vec<TextSegment>, SimplifyError> {
    let base = node.style.clone().unwrap_or_default();
    let mut segments: Vec<TextSegment> = Vec::new();

    for run in split_runs(characters, &node.character_style_overrides) {
        let resolved: FigmaTypeStyle = match node.style_override_table.get(&run.key.to_string()) {
            Some(over) if run.key != 0 => base.merged_with(over),
            _ => FigmaTypeStyle {
                fills: Vec::new(),
                ..base.clone()
            },
        };

        let style = extract_typography(&resolved)
            .map(|s| table.intern(s))
            .transpose()?;
        let fills = extract_fill(&resolved.fills)
            .map(|s| table.intern(s))
            .transpose()?;

        match segments.last_mut() {
            Some(last) if last.style == style && last.fills == fills => {
                last.text.push_str(&run.text)
            }
            _ => segments.push(TextSegment {
                text: run.text,
                style,
                fills,
            }),
        }
    }

    if segments.iter().all(|s| s.style.is_none() && s.fills.is_none()) {
        return Ok(Vec::new());
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplify::walker::NodeWalker;
    use crate::simplify::SimplifyOptions;
    use crate::types::StyleCategory;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> FigmaNode {
        serde_json::from_value(value).expect("valid node")
    }

    fn ctx(node: &FigmaNode) -> NodeContext<'_> {
        NodeContext {
            node,
            depth: 0,
            parent_box: None,
        }
    }

    #[test]
    fn split_runs_breaks_on_override_changes() {
        let runs = split_runs("Hello world", &[0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
        assert_eq!(
            runs,
            vec![
                TextRun {
                    text: "Hello ".into(),
                    key: 0
                },
                TextRun {
                    text: "world".into(),
                    key: 1
                },
            ]
        );
    }

    #[test]
    fn split_runs_treats_short_override_list_as_base_style() {
        let runs = split_runs("abcd", &[2, 2]);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "ab");
        assert_eq!(runs[1].text, "cd");
        assert_eq!(runs[1].key, 0);
    }

    #[test]
    fn split_runs_counts_utf16_units() {
        // The emoji occupies two UTF-16 code units.
        let runs = split_runs("\u{1F600}ab", &[1, 1, 0, 2]);
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["\u{1F600}", "a", "b"]);
    }

    #[test]
    fn mixed_style_text_keeps_per_run_styles() {
        let node = raw(json!({
            "id": "5:1", "type": "TEXT",
            "characters": "Buy now",
            "style": {"fontFamily": "Inter", "fontSize": 14, "fontWeight": 400},
            "characterStyleOverrides": [0, 0, 0, 0, 1, 1, 1],
            "styleOverrideTable": {
                "1": {"fontWeight": 700, "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0, "a": 1}}]}
            }
        }));
        let mut table = GlobalVarTable::new();
        let out = assemble_node(&ctx(&node), &mut table).unwrap();

        assert_eq!(out.text_segments.len(), 2);
        assert_eq!(out.text_segments[0].text, "Buy ");
        assert_eq!(out.text_segments[1].text, "now");
        assert_eq!(
            out.text_segments[0].style.as_ref(),
            out.style(StyleCategory::Typography)
        );
        assert_ne!(out.text_segments[0].style, out.text_segments[1].style);
        assert!(out.text_segments[0].fills.is_none());
        assert!(out.text_segments[1].fills.is_some());
    }

    #[test]
    fn unknown_override_key_falls_back_to_base_style() {
        let node = raw(json!({
            "id": "5:2", "type": "TEXT",
            "characters": "ab",
            "style": {"fontFamily": "Inter"},
            "characterStyleOverrides": [0, 9]
        }));
        let mut table = GlobalVarTable::new();
        let out = assemble_node(&ctx(&node), &mut table).unwrap();

        assert_eq!(out.text_segments.len(), 1);
        assert_eq!(out.text_segments[0].text, "ab");
    }

    #[test]
    fn unstyled_text_has_no_segments() {
        let node = raw(json!({"id": "5:3", "type": "TEXT", "characters": "plain"}));
        let mut table = GlobalVarTable::new();
        let out = assemble_node(&ctx(&node), &mut table).unwrap();

        assert_eq!(out.text.as_deref(), Some("plain"));
        assert!(out.text_segments.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn border_radius_uniform_and_mixed() {
        let uniform = raw(json!({"id": "1", "type": "RECTANGLE", "cornerRadius": 8}));
        assert_eq!(border_radius(&uniform).as_deref(), Some("8px"));

        let mixed = raw(json!({
            "id": "2", "type": "RECTANGLE", "cornerRadius": 4,
            "rectangleCornerRadii": [4, 4, 0, 0]
        }));
        assert_eq!(border_radius(&mixed).as_deref(), Some("4px 4px 0px 0px"));

        let square = raw(json!({"id": "3", "type": "RECTANGLE", "cornerRadius": 0}));
        assert!(border_radius(&square).is_none());
    }

    #[test]
    fn relative_position_uses_supplied_absolute_boxes() {
        let root = raw(json!({
            "id": "1", "type": "FRAME",
            "absoluteBoundingBox": {"x": 100.5, "y": 200, "width": 50, "height": 50},
            "children": [{
                "id": "2", "type": "RECTANGLE",
                "absoluteBoundingBox": {"x": 110.75, "y": 230, "width": 10, "height": 10}
            }]
        }));
        let options = SimplifyOptions::default();
        let mut table = GlobalVarTable::new();
        let roots = assemble_tree(NodeWalker::new(&[&root], &options), &mut table).unwrap();

        let child = &roots[0].children[0];
        assert_eq!(child.relative_position, Some(Point { x: 10.25, y: 30.0 }));
        assert_eq!(child.bounding_box.map(|bb| bb.x), Some(110.75));
        assert!(roots[0].relative_position.is_none());
    }

    #[test]
    fn assemble_tree_restores_shape() {
        let root = raw(json!({
            "id": "a", "type": "FRAME",
            "children": [
                {"id": "b", "type": "GROUP", "children": [{"id": "c", "type": "VECTOR"}]},
                {"id": "d", "type": "TEXT"}
            ]
        }));
        let other = raw(json!({"id": "e", "type": "FRAME"}));
        let options = SimplifyOptions::default();
        let mut table = GlobalVarTable::new();

        let roots =
            assemble_tree(NodeWalker::new(&[&root, &other], &options), &mut table).unwrap();

        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].children.len(), 2);
        assert_eq!(roots[0].children[0].id, "b");
        assert_eq!(roots[0].children[0].children[0].id, "c");
        assert_eq!(roots[0].children[1].id, "d");
        assert_eq!(roots[1].id, "e");
        assert!(roots[1].children.is_empty());
    }

    #[test]
    fn hidden_node_is_marked_when_kept() {
        let node = raw(json!({"id": "1", "type": "FRAME", "visible": false, "opacity": 0.5}));
        let mut table = GlobalVarTable::new();
        let out = assemble_node(&ctx(&node), &mut table).unwrap();

        assert_eq!(out.visible, Some(false));
        assert_eq!(out.opacity, Some(0.5));
    }
}
