//! Tree simplification and style deduplication.
//!
//! A conversion walks the requested raw subtrees in pre-order
//! ([`walker`]), extracts canonical styles from each node ([`extract`]),
//! interns them into a per-call table ([`vars`]), assembles the simplified
//! nodes ([`assemble`]) and wraps everything into a [`SimplifiedDesign`]
//! ([`envelope`]).
//!
//! Conversions are synchronous and share nothing: each call owns its own
//! [`GlobalVarTable`], so style ids are only meaningful within the design
//! they were returned in.

pub mod assemble;
pub mod envelope;
pub mod extract;
pub mod vars;
pub mod walker;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::figma::api_types::{FigmaFile, FigmaNode, FigmaNodesResponse};
use crate::types::SimplifiedDesign;

pub use envelope::{verify_integrity, DesignEnvelope, DesignMetadata};
pub use vars::GlobalVarTable;
pub use walker::{find_node, NodeContext, NodeWalker};

#[derive(Debug, Error)]
pub enum SimplifyError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),
    #[error("globalVars integrity violated: {0}")]
    Integrity(String),
}

/// Traversal policy. The defaults keep every reachable node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyOptions {
    /// Deepest level visited below a requested root (root = 0).
    pub max_depth: Option<usize>,
    /// Drop `visible: false` and `opacity: 0` nodes with their subtrees.
    pub skip_invisible: bool,
    /// Drop nodes whose bounds are 0x0.
    pub skip_zero_size: bool,
}

fn convert(
    roots: &[&FigmaNode],
    envelope: DesignEnvelope,
    options: &SimplifyOptions,
) -> Result<SimplifiedDesign, SimplifyError> {
    let mut table = GlobalVarTable::new();
    let nodes = assemble::assemble_tree(NodeWalker::new(roots, options), &mut table)?;
    envelope.build(nodes, table)
}

/// Simplify a whole file. Roots are the document's top-level children.
pub fn simplify_file(
    file: &FigmaFile,
    options: &SimplifyOptions,
) -> Result<SimplifiedDesign, SimplifyError> {
    let roots: Vec<&FigmaNode> = file.document.children.iter().collect();
    convert(&roots, DesignEnvelope::from_file(file), options)
}

/// Simplify the requested subtrees of a whole-file tree, in request order.
pub fn simplify_file_nodes<S: AsRef<str>>(
    file: &FigmaFile,
    node_ids: &[S],
    options: &SimplifyOptions,
) -> Result<SimplifiedDesign, SimplifyError> {
    let roots = node_ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            find_node(&file.document, id).ok_or_else(|| SimplifyError::NodeNotFound(id.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    convert(&roots, DesignEnvelope::from_file(file), options)
}

/// Simplify the requested entries of a nodes response, in request order.
///
/// An id missing from the response, or returned as `null`, is an error.
pub fn simplify_nodes<S: AsRef<str>>(
    response: &FigmaNodesResponse,
    node_ids: &[S],
    options: &SimplifyOptions,
) -> Result<SimplifiedDesign, SimplifyError> {
    let wrappers = node_ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            response
                .nodes
                .get(id)
                .and_then(Option::as_ref)
                .ok_or_else(|| SimplifyError::NodeNotFound(id.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let roots: Vec<&FigmaNode> = wrappers.iter().map(|w| &w.document).collect();
    convert(&roots, DesignEnvelope::from_nodes(response, &wrappers), options)
}
