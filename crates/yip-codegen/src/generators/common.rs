//! Expression building shared by both generators.
//!
//! Layout code runs with three locals in scope: `isLandscape`, and the
//! `horzScale`/`vertScale` factors between the device size and the
//! layout's nominal size. Every dimension becomes an expression over them.

use yip_core::{Alignment, FloatPair, Image, ScaleMode};
use yip_layout::{Layout, Reference, TextProps, TextSource, Widget, WidgetBase, WidgetId};

use super::templates::to_pascal_case;
use super::Scope;
use crate::error::{CodegenError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    ObjC,
    Java,
}

/// A float literal valid in both Objective-C and Java.
pub(crate) fn float_literal(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}f", value)
    } else {
        format!("{}f", value)
    }
}

/// The factor a value along `axis` is multiplied with.
pub(crate) fn scale_factor(mode: ScaleMode, axis: Axis, dialect: Dialect) -> &'static str {
    match (mode, dialect) {
        (ScaleMode::None, _) => "1.0f",
        (ScaleMode::Default, _) if axis == Axis::Horizontal => "horzScale",
        (ScaleMode::Default, _) => "vertScale",
        (ScaleMode::Horizontal, _) => "horzScale",
        (ScaleMode::Vertical, _) => "vertScale",
        (ScaleMode::Average, _) => "((horzScale + vertScale) * 0.5f)",
        (ScaleMode::Minimum, Dialect::ObjC) => "MIN(horzScale, vertScale)",
        (ScaleMode::Minimum, Dialect::Java) => "Math.min(horzScale, vertScale)",
        (ScaleMode::Maximum, Dialect::ObjC) => "MAX(horzScale, vertScale)",
        (ScaleMode::Maximum, Dialect::Java) => "Math.max(horzScale, vertScale)",
    }
}

/// Pick between two expressions by orientation, collapsing equal ones.
pub(crate) fn oriented(portrait: String, landscape: String) -> String {
    if portrait == landscape {
        portrait
    } else {
        format!("(isLandscape ? {} : {})", landscape, portrait)
    }
}

pub(crate) fn scaled(value: f32, factor: &str) -> String {
    if value == 0.0 || factor == "1.0f" {
        float_literal(value)
    } else {
        format!("{} * {}", float_literal(value), factor)
    }
}

/// Position and size expressions of a widget. A missing size means the
/// widget is measured at layout time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Geometry {
    pub x: String,
    pub y: String,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl Geometry {
    pub fn of(base: &WidgetBase, dialect: Dialect) -> Self {
        let expr = |pair: &FloatPair, first: bool, mode: ScaleMode, axis: Axis| {
            let pick = |(a, b): (f32, f32)| if first { a } else { b };
            let factor = scale_factor(mode, axis, dialect);
            oriented(scaled(pick(pair.portrait), factor), scaled(pick(pair.landscape), factor))
        };
        Self {
            x: expr(&base.position, true, base.x_scale, Axis::Horizontal),
            y: expr(&base.position, false, base.y_scale, Axis::Vertical),
            width: base
                .size
                .as_ref()
                .map(|size| expr(size, true, base.width_scale, Axis::Horizontal)),
            height: base
                .size
                .as_ref()
                .map(|size| expr(size, false, base.height_scale, Axis::Vertical)),
        }
    }
}

/// Offset a coordinate according to one alignment component.
pub(crate) fn aligned(alignment: Alignment, offset: &str, size: &str, parent: &str) -> String {
    match alignment {
        Alignment::RIGHT | Alignment::BOTTOM => format!("{} - {} - {}", parent, size, offset),
        Alignment::HCENTER | Alignment::VCENTER => format!("({} - {}) * 0.5f + {}", parent, size, offset),
        _ => offset.to_string(),
    }
}

/// Font size factor of a text-bearing widget.
pub(crate) fn font_scale(text: &TextProps, dialect: Dialect) -> String {
    oriented(
        scale_factor(text.font_scale.portrait, Axis::Vertical, dialect).to_string(),
        scale_factor(text.font_scale.landscape, Axis::Vertical, dialect).to_string(),
    )
}

/// Text after resolving `@string` references.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedText<'a> {
    /// Localization key: `<layout>_<widget><suffix>` for literals,
    /// `<declaring layout>_<string>` for references.
    pub key: String,
    pub text: &'a str,
    pub is_reference: bool,
}

pub(crate) fn resolve_text<'a>(
    scope: &Scope<'a>,
    widget: &Widget,
    source: &'a TextSource,
    suffix: &str,
) -> Result<ResolvedText<'a>> {
    match source {
        TextSource::Literal(text) => Ok(ResolvedText {
            key: format!("{}_{}{}", scope.layout().name(), widget.id(), suffix),
            text,
            is_reference: false,
        }),
        TextSource::String(reference) => {
            let (owner, string) = scope
                .compilation
                .find_string(scope.layout, &reference.id)
                .ok_or_else(|| CodegenError::missing("string", &reference.id, scope.layout().name()))?;
            Ok(ResolvedText {
                key: format!("{}_{}", scope.compilation.layout(owner).name(), reference.id),
                text: &string.text,
                is_reference: true,
            })
        }
    }
}

pub(crate) fn resolve_image<'a>(scope: &Scope<'a>, reference: &Reference) -> Result<&'a Image> {
    scope
        .compilation
        .find_image(scope.layout, &reference.id)
        .map(|(_, resource)| &resource.image)
        .ok_or_else(|| CodegenError::missing("image", &reference.id, scope.layout().name()))
}

/// A double-quoted string literal body with C-style escapes.
pub(crate) fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Class name for a layout: prefix, the layout name in PascalCase, suffix.
pub(crate) fn class_name(prefix: &str, layout: &str, suffix: &str) -> String {
    let name = format!("{}{}{}", prefix, to_pascal_case(layout), suffix);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}

/// `horzScale` and `vertScale` initializers: the actual size divided by
/// the layout's nominal size. A layout without a size does not scale.
pub(crate) fn scale_factors(size: &FloatPair, width: &str, height: &str) -> (String, String) {
    let factor = |actual: &str, portrait: f32, landscape: f32| {
        if portrait > 0.0 && landscape > 0.0 {
            format!("{} / {}", actual, oriented(float_literal(portrait), float_literal(landscape)))
        } else {
            "1.0f".to_string()
        }
    };
    (
        factor(width, size.portrait.0, size.landscape.0),
        factor(height, size.portrait.1, size.landscape.1),
    )
}

/// Widgets of a layout in pre-order: each group before its children.
pub(crate) fn pre_order(layout: &Layout) -> Vec<WidgetId> {
    let mut order = Vec::with_capacity(layout.widget_count());
    let mut stack: Vec<WidgetId> = layout.top_level().iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        order.push(id);
        stack.extend(layout.widget(id).children().iter().rev());
    }
    order
}
