use std::collections::{HashMap, HashSet};
use std::path::Path;

use fctx_lib::figma::api_types::FigmaNode;
use fctx_lib::{
    simplify_file, simplify_file_nodes, simplify_nodes, verify_integrity, FigmaFile,
    FigmaNodesResponse, SimplifiedDesign, SimplifyError, SimplifyOptions, StyleCategory,
};
use serde_json::json;

fn load_file() -> FigmaFile {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_assets/simple_file.json");
    let raw = std::fs::read_to_string(path).expect("read fixture");
    serde_json::from_str(&raw).expect("parse fixture")
}

fn load_nodes() -> FigmaNodesResponse {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_assets/nodes_response.json");
    let raw = std::fs::read_to_string(path).expect("read fixture");
    serde_json::from_str(&raw).expect("parse fixture")
}

fn ids(design: &SimplifiedDesign) -> Vec<&str> {
    design.iter_nodes().map(|n| n.id.as_str()).collect()
}

fn raw_preorder(root: &FigmaNode) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node.id.clone());
        stack.extend(node.children.iter().rev());
    }
    out
}

#[test]
fn equal_fills_share_one_entry() {
    let response: FigmaNodesResponse = serde_json::from_value(json!({
        "name": "Example",
        "nodes": {
            "1:1": {"document": {
                "id": "1:1",
                "type": "FRAME",
                "children": [
                    {"id": "1:2", "type": "RECTANGLE",
                     "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0, "a": 1}}]},
                    {"id": "1:3", "type": "RECTANGLE",
                     "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0, "a": 1}}]},
                    {"id": "1:4", "type": "RECTANGLE",
                     "fills": [{"type": "SOLID", "color": {"r": 0, "g": 1, "b": 0, "a": 1}}]}
                ]
            }}
        }
    }))
    .unwrap();

    let design = simplify_nodes(&response, &["1:1"], &SimplifyOptions::default()).unwrap();

    assert_eq!(design.global_vars.count_category(StyleCategory::Fill), 2);
    let children = &design.nodes[0].children;
    let fill = |i: usize| children[i].style(StyleCategory::Fill).unwrap();
    assert_eq!(fill(0), fill(1));
    assert_ne!(fill(0), fill(2));
}

#[test]
fn missing_node_is_not_found() {
    let response = load_nodes();
    let err = simplify_nodes(&response, &["404:1"], &SimplifyOptions::default()).unwrap_err();
    assert!(matches!(err, SimplifyError::NodeNotFound(id) if id == "404:1"));

    // The source answered `null` for this id.
    let err = simplify_nodes(&response, &["9:9"], &SimplifyOptions::default()).unwrap_err();
    assert!(matches!(err, SimplifyError::NodeNotFound(id) if id == "9:9"));

    let file = load_file();
    let err = simplify_file_nodes(&file, &["404:1"], &SimplifyOptions::default()).unwrap_err();
    assert!(matches!(err, SimplifyError::NodeNotFound(_)));
}

#[test]
fn conversion_is_deterministic() {
    let file = load_file();
    let first = simplify_file(&file, &SimplifyOptions::default()).unwrap();
    let second = simplify_file(&file, &SimplifyOptions::default()).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn styles_are_deduplicated_across_pages() {
    let file = load_file();
    let design = simplify_file(&file, &SimplifyOptions::default()).unwrap();

    let by_id: HashMap<&str, _> = design.iter_nodes().map(|n| (n.id.as_str(), n)).collect();
    let red_a = by_id["1:3"].style(StyleCategory::Fill).unwrap();
    let red_b = by_id["1:4"].style(StyleCategory::Fill).unwrap();
    let red_page_two = by_id["2:2"].style(StyleCategory::Fill).unwrap();
    assert_eq!(red_a, red_b, "field order in the source must not matter");
    assert_eq!(red_a, red_page_two);
    assert_eq!(
        serde_json::to_value(design.global_vars.get(red_a).unwrap()).unwrap(),
        json!(["#FF0000"])
    );

    // Every canonical value appears once per category.
    for category in StyleCategory::ALL {
        let values: Vec<String> = design
            .global_vars
            .iter()
            .filter(|(_, s)| s.category() == category)
            .map(|(_, s)| serde_json::to_string(s).unwrap())
            .collect();
        let unique: HashSet<&String> = values.iter().collect();
        assert_eq!(values.len(), unique.len(), "duplicate {category} entries");
    }
}

#[test]
fn every_reference_resolves_and_every_style_is_used() {
    let file = load_file();
    let design = simplify_file(&file, &SimplifyOptions::default()).unwrap();
    verify_integrity(&design).unwrap();

    let mut referenced = HashSet::new();
    for node in design.iter_nodes() {
        for id in node.style_refs() {
            assert!(design.global_vars.contains(id), "dangling {id}");
            referenced.insert(id.as_str().to_string());
        }
    }
    for (id, _) in design.global_vars.iter() {
        assert!(referenced.contains(id.as_str()), "orphaned {id}");
    }
}

#[test]
fn output_order_matches_source_preorder() {
    let file = load_file();
    let design = simplify_file_nodes(&file, &["1:2"], &SimplifyOptions::default()).unwrap();

    let card = fctx_lib::simplify::find_node(&file.document, "1:2").unwrap();
    let expected = raw_preorder(card);
    assert_eq!(ids(&design), expected);
}

#[test]
fn sibling_pages_are_excluded_from_a_requested_subtree() {
    let file = load_file();
    let design = simplify_file_nodes(&file, &["2:1"], &SimplifyOptions::default()).unwrap();

    assert_eq!(ids(&design), vec!["2:1", "2:2"]);
    assert_eq!(design.global_vars.len(), 1);
}

#[test]
fn leaf_root_yields_single_node() {
    let file = load_file();
    let design = simplify_file_nodes(&file, &["1:7"], &SimplifyOptions::default()).unwrap();

    assert_eq!(design.nodes.len(), 1);
    assert!(design.nodes[0].children.is_empty());
    assert_eq!(design.nodes[0].component_id.as_deref(), Some("10:1"));
    assert!(design.global_vars.is_empty());
}

#[test]
fn requested_roots_keep_request_order() {
    let response = load_nodes();
    let file = load_file();

    let design = simplify_file_nodes(&file, &["2:2", "1:3"], &SimplifyOptions::default()).unwrap();
    let roots: Vec<&str> = design.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(roots, vec!["2:2", "1:3"]);
    assert_eq!(design.global_vars.len(), 1);

    let design = simplify_nodes(&response, &["1:1"], &SimplifyOptions::default()).unwrap();
    assert_eq!(design.name, "Storefront");
    assert_eq!(ids(&design), vec!["1:1", "1:2", "1:3", "1:4"]);
}

#[test]
fn max_depth_limits_descent() {
    let file = load_file();
    let options = SimplifyOptions {
        max_depth: Some(1),
        ..Default::default()
    };
    let design = simplify_file(&file, &options).unwrap();

    assert_eq!(ids(&design), vec!["1:1", "1:2", "1:7", "2:1", "2:2"]);
    let card = &design.nodes[0].children[0];
    assert!(card.children.is_empty());
    verify_integrity(&design).unwrap();
}

#[test]
fn hidden_nodes_are_kept_unless_skipped() {
    let file = load_file();

    let kept = simplify_file_nodes(&file, &["1:2"], &SimplifyOptions::default()).unwrap();
    let hidden = kept.iter_nodes().find(|n| n.id == "1:6").unwrap();
    assert_eq!(hidden.visible, Some(false));

    let options = SimplifyOptions {
        skip_invisible: true,
        ..Default::default()
    };
    let skipped = simplify_file_nodes(&file, &["1:2"], &options).unwrap();
    assert!(skipped.iter_nodes().all(|n| n.id != "1:6"));
    // The blue fill only lived on the hidden node.
    assert_eq!(
        skipped.global_vars.count_category(StyleCategory::Fill) + 1,
        kept.global_vars.count_category(StyleCategory::Fill)
    );
    verify_integrity(&skipped).unwrap();
}

#[test]
fn node_details_are_carried_through() {
    let file = load_file();
    let design = simplify_file(&file, &SimplifyOptions::default()).unwrap();
    let value = serde_json::to_value(&design).unwrap();

    assert_eq!(value["name"], "Storefront");
    assert_eq!(value["lastModified"], "2024-05-01T12:00:00Z");
    assert_eq!(value["components"]["10:1"]["name"], "Button");

    let card = &value["nodes"][0]["children"][0];
    assert_eq!(card["type"], "FRAME");
    assert_eq!(card["borderRadius"], "8px");
    let layout_id = card["styles"]["layout"].as_str().unwrap();
    assert_eq!(value["globalVars"][layout_id]["mode"], "column");
    assert_eq!(value["globalVars"][layout_id]["gap"], 8.0);

    let swatch = &card["children"][0];
    assert_eq!(swatch["relativePosition"], json!({"x": 16.0, "y": 16.0}));

    let title = &card["children"][2];
    assert_eq!(title["text"], "Hello");
    let typography_id = title["styles"]["typography"].as_str().unwrap();
    let typography = &value["globalVars"][typography_id];
    assert_eq!(typography["fontFamily"], "Inter");
    assert!(typography.get("textAlignHorizontal").is_none());
}

#[test]
fn hidden_requested_root_is_kept_when_skipping_invisible() {
    let response: FigmaNodesResponse = serde_json::from_value(json!({
        "name": "Example",
        "nodes": {
            "1:2": {"document": {
                "id": "1:2",
                "type": "FRAME",
                "visible": false,
                "children": [
                    {"id": "1:3", "type": "RECTANGLE"},
                    {"id": "1:4", "type": "RECTANGLE", "visible": false}
                ]
            }}
        }
    }))
    .unwrap();
    let options = SimplifyOptions {
        skip_invisible: true,
        ..Default::default()
    };

    let design = simplify_nodes(&response, &["1:2"], &options).unwrap();

    assert_eq!(design.nodes.len(), 1);
    assert_eq!(design.nodes[0].visible, Some(false));
    assert_eq!(ids(&design), vec!["1:2", "1:3"]);
}
