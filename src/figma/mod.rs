//! Figma REST integration.
//!
//! - [`api_types`] - serde models of the file and nodes responses
//! - [`FigmaClient`] - HTTP client for the Figma REST API

pub mod api_types;
pub mod client;

pub use api_types::{
    FigmaBoundingBox, FigmaColor, FigmaEffect, FigmaFile, FigmaNode, FigmaNodeWrapper,
    FigmaNodesResponse, FigmaPaint, FigmaTypeStyle,
};
pub use client::{FigmaAuth, FigmaClient};
