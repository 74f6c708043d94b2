//! Pre-order traversal of raw node trees.
//!
//! The walker uses an explicit stack, so very deep trees do not recurse.
//! Each visit yields a [`NodeContext`]: the raw node, its depth below the
//! requested root, and its parent's absolute bounds as supplied by the source.

use crate::figma::api_types::{FigmaBoundingBox, FigmaNode};

use super::SimplifyOptions;

/// One visit of the walker.
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    pub node: &'a FigmaNode,
    /// 0 for a requested root.
    pub depth: usize,
    pub parent_box: Option<&'a FigmaBoundingBox>,
}

/// Pre-order iterator over one or more root subtrees.
#[derive(Debug)]
pub struct NodeWalker<'a> {
    stack: Vec<NodeContext<'a>>,
    options: &'a SimplifyOptions,
}

impl<'a> NodeWalker<'a> {
    pub fn new(roots: &[&'a FigmaNode], options: &'a SimplifyOptions) -> Self {
        let stack = roots
            .iter()
            .rev()
            .map(|&node| NodeContext {
                node,
                depth: 0,
                parent_box: None,
            })
            .collect();
        Self { stack, options }
    }

    fn is_skipped(&self, node: &FigmaNode) -> bool {
        if self.options.skip_invisible && (node.is_hidden() || node.opacity == Some(0.0)) {
            return true;
        }
        if self.options.skip_zero_size {
            if let Some(bb) = &node.absolute_bounding_box {
                return bb.width == 0.0 && bb.height == 0.0;
            }
        }
        false
    }
}

impl<'a> Iterator for NodeWalker<'a> {
    type Item = NodeContext<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ctx = self.stack.pop()?;
            // Skip rules never drop a requested root.
            if ctx.depth > 0 && self.is_skipped(ctx.node) {
                continue;
            }

            let descend = self
                .options
                .max_depth
                .map_or(true, |max| ctx.depth < max);
            if descend {
                let parent_box = ctx.node.absolute_bounding_box.as_ref();
                self.stack
                    .extend(ctx.node.children.iter().rev().map(|child| NodeContext {
                        node: child,
                        depth: ctx.depth + 1,
                        parent_box,
                    }));
            }
            return Some(ctx);
        }
    }
}

/// Depth-first search for a node by id, including `root` itself.
pub fn find_node<'a>(root: &'a FigmaNode, id: &str) -> Option<&'a FigmaNode> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> FigmaNode {
        serde_json::from_value(json!({
            "id": "0", "type": "FRAME",
            "absoluteBoundingBox": {"x": 10, "y": 20, "width": 100, "height": 100},
            "children": [
                {"id": "1", "type": "FRAME", "children": [
                    {"id": "1.1", "type": "TEXT"},
                    {"id": "1.2", "type": "RECTANGLE", "visible": false}
                ]},
                {"id": "2", "type": "RECTANGLE", "opacity": 0,
                 "absoluteBoundingBox": {"x": 0, "y": 0, "width": 0, "height": 0}}
            ]
        }))
        .expect("tree")
    }

    fn ids(walker: NodeWalker<'_>) -> Vec<String> {
        walker.map(|ctx| ctx.node.id.clone()).collect()
    }

    #[test]
    fn visits_in_pre_order() {
        let root = tree();
        let options = SimplifyOptions::default();
        assert_eq!(
            ids(NodeWalker::new(&[&root], &options)),
            vec!["0", "1", "1.1", "1.2", "2"]
        );
    }

    #[test]
    fn depth_and_parent_box_are_tracked() {
        let root = tree();
        let options = SimplifyOptions::default();
        let visits: Vec<_> = NodeWalker::new(&[&root], &options).collect();

        assert_eq!(visits[0].depth, 0);
        assert!(visits[0].parent_box.is_none());
        assert_eq!(visits[1].depth, 1);
        assert_eq!(visits[1].parent_box.map(|bb| bb.x), Some(10.0));
        assert_eq!(visits[2].depth, 2);
        assert!(visits[2].parent_box.is_none());
    }

    #[test]
    fn max_depth_stops_descent() {
        let root = tree();
        let options = SimplifyOptions {
            max_depth: Some(1),
            ..Default::default()
        };
        assert_eq!(ids(NodeWalker::new(&[&root], &options)), vec!["0", "1", "2"]);
    }

    #[test]
    fn skip_invisible_drops_hidden_and_transparent_subtrees() {
        let root = tree();
        let options = SimplifyOptions {
            skip_invisible: true,
            ..Default::default()
        };
        assert_eq!(ids(NodeWalker::new(&[&root], &options)), vec!["0", "1", "1.1"]);
    }

    #[test]
    fn skip_zero_size_only_drops_nodes_with_known_empty_bounds() {
        let root = tree();
        let options = SimplifyOptions {
            skip_zero_size: true,
            ..Default::default()
        };
        assert_eq!(
            ids(NodeWalker::new(&[&root], &options)),
            vec!["0", "1", "1.1", "1.2"]
        );
    }

    #[test]
    fn requested_roots_survive_skip_rules() {
        let root = tree();
        let transparent = find_node(&root, "2").unwrap();
        let hidden = find_node(&root, "1.2").unwrap();
        let options = SimplifyOptions {
            skip_invisible: true,
            skip_zero_size: true,
            ..Default::default()
        };
        assert_eq!(
            ids(NodeWalker::new(&[transparent, hidden], &options)),
            vec!["2", "1.2"]
        );
    }

    #[test]
    fn multiple_roots_keep_request_order() {
        let root = tree();
        let a = find_node(&root, "2").unwrap();
        let b = find_node(&root, "1").unwrap();
        let options = SimplifyOptions::default();
        assert_eq!(
            ids(NodeWalker::new(&[a, b], &options)),
            vec!["2", "1", "1.1", "1.2"]
        );
    }

    #[test]
    fn find_node_returns_none_for_unknown_id() {
        let root = tree();
        assert!(find_node(&root, "404").is_none());
        assert_eq!(find_node(&root, "1.2").map(|n| n.node_type.as_str()), Some("RECTANGLE"));
    }
}
