//! Figma context simplifier (fctx) library.
//!
//! Reduces a fetched Figma file or node subset into a compact design where
//! repeated fills, strokes, effects, typography and layout are stored once in
//! `globalVars` and referenced from nodes by id.
//!
//! # Module Overview
//!
//! - [`simplify`] - the tree simplification and style deduplication engine
//! - [`types`] - simplified output model and canonical styles
//! - [`figma`] - Figma REST types and HTTP client
//! - [`config`] - configuration file support
//! - [`resource`] - input parsing (Figma URL or local JSON)
//! - [`output`] - JSON/YAML serialization
//!
//! # Example
//!
//! ```no_run
//! use fctx_lib::{simplify_nodes, FigmaAuth, FigmaClient, SimplifyOptions};
//!
//! # async fn example() -> fctx_lib::Result<()> {
//! let auth = FigmaAuth::from_env().expect("FIGMA_TOKEN set");
//! let client = FigmaClient::new(auth)?;
//! let ids = vec!["1:2".to_string()];
//! let response = client.fetch_nodes("FILE_KEY", &ids, None).await?;
//!
//! let design = simplify_nodes(&response, &ids, &SimplifyOptions::default())?;
//! println!("{} shared styles", design.global_vars.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod figma;
pub mod output;
pub mod resource;
pub mod simplify;
pub mod types;

pub use config::Config;
pub use error::{ErrorCategory, ErrorPayload, FctxError, Result};
pub use figma::{FigmaAuth, FigmaClient, FigmaFile, FigmaNodesResponse};
pub use output::{write_design, ErrorOutput, OutputFormat, FCTX_OUTPUT_VERSION};
pub use resource::{parse_resource, FigmaInfo, ParsedResource, ResourceKind};
pub use simplify::{
    simplify_file, simplify_file_nodes, simplify_nodes, verify_integrity, SimplifyError,
    SimplifyOptions,
};
pub use types::{
    CanonicalStyle, GlobalVars, SimplifiedDesign, SimplifiedNode, StyleCategory, StyleId,
    TextSegment,
};
