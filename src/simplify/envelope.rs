//! Wrapping assembled roots, metadata and the style table into a design.

use std::collections::{BTreeMap, HashSet};

use crate::figma::api_types::{
    FigmaComponent, FigmaComponentSet, FigmaFile, FigmaNodeWrapper, FigmaNodesResponse,
};
use crate::types::{ComponentMeta, SimplifiedDesign, SimplifiedNode, StyleCategory, StyleId};

use super::vars::GlobalVarTable;
use super::SimplifyError;

/// File-level metadata copied into the design.
#[derive(Debug, Clone, Default)]
pub struct DesignMetadata {
    pub name: String,
    pub last_modified: Option<String>,
    pub version: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Everything a design carries besides its nodes and styles.
#[derive(Debug, Clone, Default)]
pub struct DesignEnvelope {
    pub metadata: DesignMetadata,
    pub components: BTreeMap<String, ComponentMeta>,
    pub component_sets: BTreeMap<String, ComponentMeta>,
}

fn component_meta(id: &str, c: &FigmaComponent) -> ComponentMeta {
    ComponentMeta {
        id: id.to_string(),
        key: c.key.clone(),
        name: c.name.clone(),
        description: c.description.clone(),
        component_set_id: c.component_set_id.clone(),
    }
}

fn component_set_meta(id: &str, c: &FigmaComponentSet) -> ComponentMeta {
    ComponentMeta {
        id: id.to_string(),
        key: c.key.clone(),
        name: c.name.clone(),
        description: c.description.clone(),
        component_set_id: None,
    }
}

impl DesignEnvelope {
    pub fn from_file(file: &FigmaFile) -> Self {
        Self {
            metadata: DesignMetadata {
                name: file.name.clone(),
                last_modified: file.last_modified.clone(),
                version: file.version.clone(),
                thumbnail_url: file.thumbnail_url.clone(),
            },
            components: file
                .components
                .iter()
                .map(|(id, c)| (id.clone(), component_meta(id, c)))
                .collect(),
            component_sets: file
                .component_sets
                .iter()
                .map(|(id, c)| (id.clone(), component_set_meta(id, c)))
                .collect(),
        }
    }

    /// Metadata from a nodes response; components are merged across the
    /// requested entries only.
    pub fn from_nodes(response: &FigmaNodesResponse, requested: &[&FigmaNodeWrapper]) -> Self {
        let mut envelope = Self {
            metadata: DesignMetadata {
                name: response.name.clone(),
                last_modified: response.last_modified.clone(),
                version: response.version.clone(),
                thumbnail_url: response.thumbnail_url.clone(),
            },
            ..Default::default()
        };
        for wrapper in requested {
            for (id, c) in &wrapper.components {
                envelope
                    .components
                    .insert(id.clone(), component_meta(id, c));
            }
            for (id, c) in &wrapper.component_sets {
                envelope
                    .component_sets
                    .insert(id.clone(), component_set_meta(id, c));
            }
        }
        envelope
    }

    /// Produce the final design. The table is taken as-is; the result is
    /// verified before it is returned.
    pub fn build(
        self,
        nodes: Vec<SimplifiedNode>,
        table: GlobalVarTable,
    ) -> Result<SimplifiedDesign, SimplifyError> {
        let design = SimplifiedDesign {
            name: self.metadata.name,
            last_modified: self.metadata.last_modified,
            version: self.metadata.version,
            thumbnail_url: self.metadata.thumbnail_url,
            nodes,
            components: self.components,
            component_sets: self.component_sets,
            global_vars: table.into_global_vars(),
        };

        verify_integrity(&design)?;

        if log::log_enabled!(log::Level::Debug) {
            let per_category: Vec<String> = StyleCategory::ALL
                .iter()
                .map(|c| format!("{c}={}", design.global_vars.count_category(*c)))
                .collect();
            log::debug!(
                "simplified '{}': {} nodes, {} styles ({})",
                design.name,
                design.iter_nodes().count(),
                design.global_vars.len(),
                per_category.join(", ")
            );
        }
        Ok(design)
    }
}

/// Check that every referenced style exists, every style is referenced, and
/// no two styles of a category are equal.
pub fn verify_integrity(design: &SimplifiedDesign) -> Result<(), SimplifyError> {
    let refs: Vec<&StyleId> = design
        .iter_nodes()
        .flat_map(SimplifiedNode::style_refs)
        .collect();

    for id in &refs {
        if !design.global_vars.contains(id) {
            return Err(SimplifyError::Integrity(format!(
                "node references unknown style {id}"
            )));
        }
    }

    let referenced: HashSet<&str> = refs.iter().map(|id| id.as_str()).collect();
    let mut seen = HashSet::new();
    for (id, style) in design.global_vars.iter() {
        if !referenced.contains(id.as_str()) {
            return Err(SimplifyError::Integrity(format!(
                "style {id} is not referenced by any node"
            )));
        }
        let key = (style.category(), GlobalVarTable::fingerprint(style)?);
        if !seen.insert(key) {
            return Err(SimplifyError::Integrity(format!(
                "style {id} duplicates an earlier entry"
            )));
        }
    }
    Ok(())
}
