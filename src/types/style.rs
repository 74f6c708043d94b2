//! Canonical style objects and style references.
//!
//! A canonical style is the normalized, value-comparable form of one style
//! category. Its serde serialization is the canonical serialization: field
//! order is fixed by the struct definitions and every number has already
//! been rounded, so two equal styles always serialize to the same bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Style category a canonical style belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleCategory {
    Fill,
    Stroke,
    Effect,
    Typography,
    Layout,
}

impl StyleCategory {
    pub const ALL: [StyleCategory; 5] = [
        StyleCategory::Fill,
        StyleCategory::Stroke,
        StyleCategory::Effect,
        StyleCategory::Typography,
        StyleCategory::Layout,
    ];

    /// Prefix used when allocating ids for this category.
    pub fn prefix(&self) -> &'static str {
        match self {
            StyleCategory::Fill => "fill",
            StyleCategory::Stroke => "stroke",
            StyleCategory::Effect => "effect",
            StyleCategory::Typography => "typography",
            StyleCategory::Layout => "layout",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            StyleCategory::Fill => 0,
            StyleCategory::Stroke => 1,
            StyleCategory::Effect => 2,
            StyleCategory::Typography => 3,
            StyleCategory::Layout => 4,
        }
    }
}

impl fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Reference to an interned style, e.g. `fill_0`.
///
/// Only meaningful within the design it was allocated for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleId(String);

impl StyleId {
    pub(crate) fn new(category: StyleCategory, n: usize) -> Self {
        StyleId(format!("{}_{}", category.prefix(), n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for StyleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A normalized style object of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalStyle {
    Fill(Vec<CanonicalPaint>),
    Stroke(StrokeStyle),
    Effect(Vec<CanonicalEffect>),
    Typography(TypographyStyle),
    Layout(LayoutStyle),
}

impl CanonicalStyle {
    pub fn category(&self) -> StyleCategory {
        match self {
            CanonicalStyle::Fill(_) => StyleCategory::Fill,
            CanonicalStyle::Stroke(_) => StyleCategory::Stroke,
            CanonicalStyle::Effect(_) => StyleCategory::Effect,
            CanonicalStyle::Typography(_) => StyleCategory::Typography,
            CanonicalStyle::Layout(_) => StyleCategory::Layout,
        }
    }
}

/// One paint layer.
///
/// Solid paints collapse to a color string (`#RRGGBB` or `rgba(...)`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalPaint {
    Solid(String),
    Gradient(GradientPaint),
    Image(ImagePaint),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gradient_handle_positions: Vec<Point>,
    pub gradient_stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    pub position: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaint {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_mode: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Stroke paints together with their geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub colors: Vec<CanonicalPaint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Sides>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dashes: Vec<f64>,
}

/// Top/right/bottom/left values, in CSS order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sides {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Sides {
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalEffect {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Point>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Line height in px.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
}

impl TypographyStyle {
    pub fn is_empty(&self) -> bool {
        *self == TypographyStyle::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStyle {
    /// `row` or `column` for auto-layout containers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Sides>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub wrap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizing: Option<LayoutSizing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_self: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl LayoutStyle {
    pub fn is_empty(&self) -> bool {
        *self == LayoutStyle::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSizing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<String>,
}
