//! Output data model.
//!
//! - [`SimplifiedDesign`] - the single value a conversion returns
//! - [`SimplifiedNode`] - one node of the reduced tree
//! - [`CanonicalStyle`] - normalized style objects stored in [`GlobalVars`]
//! - [`StyleId`] - references from nodes into [`GlobalVars`]

pub mod design;
pub mod style;

pub use design::{
    BoundingBox, ComponentMeta, GlobalVars, SimplifiedDesign, SimplifiedNode, TextSegment,
};
pub use style::{
    CanonicalEffect, CanonicalPaint, CanonicalStyle, GradientPaint, GradientStop, ImagePaint,
    LayoutSizing, LayoutStyle, Point, Sides, StrokeStyle, StyleCategory, StyleId,
    TypographyStyle,
};
