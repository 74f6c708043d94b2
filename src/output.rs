//! Serializing a [`SimplifiedDesign`] for downstream consumers.

use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorPayload, FctxError, Result};
use crate::types::{ComponentMeta, SimplifiedDesign};

/// Schema version for error payloads.
pub const FCTX_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact JSON, emitted piece by piece.
    #[default]
    Json,
    /// Indented JSON.
    Pretty,
    Yaml,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    pub error: ErrorPayload,
}

impl ErrorOutput {
    pub fn new(error: ErrorPayload) -> Self {
        Self {
            version: FCTX_OUTPUT_VERSION.to_string(),
            error,
        }
    }
}

/// Everything in a design except its nodes and styles.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DesignHeader<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    components: &'a BTreeMap<String, ComponentMeta>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    component_sets: &'a BTreeMap<String, ComponentMeta>,
}

impl<'a> From<&'a SimplifiedDesign> for DesignHeader<'a> {
    fn from(design: &'a SimplifiedDesign) -> Self {
        Self {
            name: &design.name,
            last_modified: design.last_modified.as_deref(),
            version: design.version.as_deref(),
            thumbnail_url: design.thumbnail_url.as_deref(),
            components: &design.components,
            component_sets: &design.component_sets,
        }
    }
}

pub fn write_design<W: Write>(
    design: &SimplifiedDesign,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json_pieces(design, writer)?,
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut *writer, design)?;
            writeln!(writer)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *writer, design)?,
    }
    writer.flush()?;
    Ok(())
}

/// Compact JSON where the header, each root node and the style map are
/// serialized independently, so no single string holds the whole document.
fn write_json_pieces<W: Write>(design: &SimplifiedDesign, writer: &mut W) -> Result<()> {
    let header = serde_json::to_string(&DesignHeader::from(design))?;
    let open = header
        .strip_suffix('}')
        .ok_or_else(|| FctxError::Config("design header did not serialize to an object".into()))?;

    writer.write_all(open.as_bytes())?;
    writer.write_all(b",\"nodes\":[")?;
    for (i, node) in design.nodes.iter().enumerate() {
        if i > 0 {
            writer.write_all(b",")?;
        }
        serde_json::to_writer(&mut *writer, node)?;
    }
    writer.write_all(b"],\"globalVars\":")?;
    serde_json::to_writer(&mut *writer, &design.global_vars)?;
    writer.write_all(b"}\n")?;
    Ok(())
}
