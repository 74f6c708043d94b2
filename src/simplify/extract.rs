//! Style extraction: raw node fields to canonical style objects.
//!
//! Extraction is pure. Every number passes through [`round2`] and every
//! color through [`color_string`] before it lands in a canonical object, so
//! structurally equal inputs produce equal (and equally serialized) output.

use palette::Srgb;

use crate::figma::api_types::{
    FigmaColor, FigmaEffect, FigmaNode, FigmaPaint, FigmaTypeStyle, FigmaVector,
};
use crate::types::{
    CanonicalEffect, CanonicalPaint, CanonicalStyle, GradientPaint, GradientStop, ImagePaint,
    LayoutSizing, LayoutStyle, Point, Sides, StrokeStyle, TypographyStyle,
};

/// Round to two decimals; negative zero becomes zero.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a color as `#RRGGBB` when fully opaque, `rgba(R, G, B, A)` otherwise.
///
/// `opacity` is the paint-level opacity and multiplies the color's own alpha.
pub fn color_string(color: &FigmaColor, opacity: f64) -> String {
    let rgb: Srgb<u8> = Srgb::new(
        color.r.clamp(0.0, 1.0) as f32,
        color.g.clamp(0.0, 1.0) as f32,
        color.b.clamp(0.0, 1.0) as f32,
    )
    .into_format();
    let alpha = round2((color.a * opacity).clamp(0.0, 1.0));

    if alpha >= 1.0 {
        format!("#{:02X}{:02X}{:02X}", rgb.red, rgb.green, rgb.blue)
    } else {
        format!("rgba({}, {}, {}, {})", rgb.red, rgb.green, rgb.blue, alpha)
    }
}

fn point(v: &FigmaVector) -> Point {
    Point {
        x: round2(v.x),
        y: round2(v.y),
    }
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.map(round2).filter(|v| *v != 0.0)
}

fn unless_default(value: Option<&String>, default: &str) -> Option<String> {
    value.filter(|v| v.as_str() != default).cloned()
}

/// All styles present on a node, in category order.
pub fn extract_styles(node: &FigmaNode) -> Vec<CanonicalStyle> {
    [
        extract_fill(&node.fills),
        extract_stroke(node),
        extract_effects(&node.effects),
        node.style.as_ref().and_then(extract_typography),
        extract_layout(node),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn canonical_paint(paint: &FigmaPaint) -> Option<CanonicalPaint> {
    if paint.visible == Some(false) {
        return None;
    }
    let opacity = paint.opacity.unwrap_or(1.0);

    match paint.paint_type.as_str() {
        "SOLID" => paint
            .color
            .as_ref()
            .map(|c| CanonicalPaint::Solid(color_string(c, opacity))),
        "IMAGE" => Some(CanonicalPaint::Image(ImagePaint {
            kind: "IMAGE".to_string(),
            image_ref: paint.image_ref.clone(),
            scale_mode: paint.scale_mode.clone(),
        })),
        kind if kind.starts_with("GRADIENT_") => Some(CanonicalPaint::Gradient(GradientPaint {
            kind: kind.to_string(),
            gradient_handle_positions: paint.gradient_handle_positions.iter().map(point).collect(),
            gradient_stops: paint
                .gradient_stops
                .iter()
                .map(|stop| GradientStop {
                    position: round2(stop.position),
                    color: color_string(&stop.color, opacity),
                })
                .collect(),
        })),
        _ => None,
    }
}

fn canonical_paints(paints: &[FigmaPaint]) -> Vec<CanonicalPaint> {
    paints.iter().filter_map(canonical_paint).collect()
}

pub fn extract_fill(paints: &[FigmaPaint]) -> Option<CanonicalStyle> {
    let paints = canonical_paints(paints);
    (!paints.is_empty()).then_some(CanonicalStyle::Fill(paints))
}

pub fn extract_stroke(node: &FigmaNode) -> Option<CanonicalStyle> {
    let colors = canonical_paints(&node.strokes);
    if colors.is_empty() {
        return None;
    }

    Some(CanonicalStyle::Stroke(StrokeStyle {
        colors,
        weight: node.stroke_weight.map(round2),
        weights: node.individual_stroke_weights.map(|w| Sides {
            top: round2(w.top),
            right: round2(w.right),
            bottom: round2(w.bottom),
            left: round2(w.left),
        }),
        align: node.stroke_align.clone(),
        dashes: node.stroke_dashes.iter().copied().map(round2).collect(),
    }))
}

pub fn extract_effects(effects: &[FigmaEffect]) -> Option<CanonicalStyle> {
    let effects: Vec<CanonicalEffect> = effects
        .iter()
        .filter(|e| e.visible != Some(false))
        .map(|e| CanonicalEffect {
            kind: e.effect_type.clone(),
            radius: e.radius.map(round2),
            spread: non_zero(e.spread),
            color: e.color.as_ref().map(|c| color_string(c, 1.0)),
            offset: e.offset.as_ref().map(point),
        })
        .collect();

    (!effects.is_empty()).then_some(CanonicalStyle::Effect(effects))
}

pub fn extract_typography(style: &FigmaTypeStyle) -> Option<CanonicalStyle> {
    let typography = TypographyStyle {
        font_family: style.font_family.clone(),
        font_weight: style.font_weight.map(round2),
        font_size: style.font_size.map(round2),
        line_height: style.line_height_px.map(round2),
        letter_spacing: non_zero(style.letter_spacing),
        text_case: unless_default(style.text_case.as_ref(), "ORIGINAL"),
        text_decoration: unless_default(style.text_decoration.as_ref(), "NONE"),
        text_align_horizontal: unless_default(style.text_align_horizontal.as_ref(), "LEFT"),
        italic: style.italic.unwrap_or(false),
    };

    (!typography.is_empty()).then_some(CanonicalStyle::Typography(typography))
}

fn justify(value: Option<&String>) -> Option<String> {
    match value.map(String::as_str) {
        Some("CENTER") => Some("center".to_string()),
        Some("MAX") => Some("flex-end".to_string()),
        Some("SPACE_BETWEEN") => Some("space-between".to_string()),
        Some("BASELINE") => Some("baseline".to_string()),
        _ => None,
    }
}

fn lowercase(value: Option<&String>) -> Option<String> {
    value.map(|v| v.to_ascii_lowercase())
}

pub fn extract_layout(node: &FigmaNode) -> Option<CanonicalStyle> {
    let mode = match node.layout_mode.as_deref() {
        Some("HORIZONTAL") => Some("row".to_string()),
        Some("VERTICAL") => Some("column".to_string()),
        _ => None,
    };

    let mut layout = LayoutStyle::default();
    if mode.is_some() {
        let padding = Sides {
            top: round2(node.padding_top.unwrap_or(0.0)),
            right: round2(node.padding_right.unwrap_or(0.0)),
            bottom: round2(node.padding_bottom.unwrap_or(0.0)),
            left: round2(node.padding_left.unwrap_or(0.0)),
        };
        layout.gap = non_zero(node.item_spacing);
        layout.padding = (!padding.is_zero()).then_some(padding);
        layout.justify_content = justify(node.primary_axis_align_items.as_ref());
        layout.align_items = justify(node.counter_axis_align_items.as_ref());
        layout.wrap = node.layout_wrap.as_deref() == Some("WRAP");
        layout.mode = mode;
    }

    let horizontal = lowercase(node.layout_sizing_horizontal.as_ref());
    let vertical = lowercase(node.layout_sizing_vertical.as_ref());
    if horizontal.is_some() || vertical.is_some() {
        layout.sizing = Some(LayoutSizing {
            horizontal,
            vertical,
        });
    }
    layout.align_self = node
        .layout_align
        .as_ref()
        .filter(|a| a.as_str() != "INHERIT")
        .map(|a| a.to_ascii_lowercase());
    layout.grow = non_zero(node.layout_grow);
    layout.position = (node.layout_positioning.as_deref() == Some("ABSOLUTE"))
        .then(|| "absolute".to_string());

    (!layout.is_empty()).then_some(CanonicalStyle::Layout(layout))
}
