//! Attributes common to every widget.

use std::sync::OnceLock;

use regex::Regex;
use yip_core::{
    parse_alignment, parse_bool, parse_color, parse_float_pair, parse_scale_mode, Alignment,
    AttributeError, Color, ErrorKind, FloatPair, ScaleMode,
};

use super::{Reference, WidgetId};
use crate::layout::LayoutId;
use crate::xml::XmlAttribute;

/// Whether `name` can be used as a generated variable or resource name.
pub fn is_identifier(name: &str) -> bool {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"))
        .is_match(name)
}

/// Names a widget id cannot take: keywords of the generated languages and
/// members the generated UIKit classes inherit.
const RESERVED_IDENTIFIERS: &[&str] = &[
    // Java
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
    // C and Objective-C
    "auto", "extern", "inline", "register", "restrict", "signed", "sizeof", "struct", "typedef",
    "union", "unsigned", "id", "self", "nil", "Nil", "YES", "NO", "BOOL", "SEL", "IMP", "Class",
    "in", "out", "inout", "bycopy", "byref", "oneway",
    // UIKit members
    "view", "contentView", "title", "frame", "bounds", "center", "tag", "hidden", "alpha",
    "backgroundColor", "superview", "subviews", "window", "layer", "transform", "opaque",
    "textLabel", "detailTextLabel", "imageView", "accessoryView", "backgroundView",
    "selectedBackgroundView", "reuseIdentifier", "selected", "highlighted", "editing",
    "navigationItem", "navigationController", "tabBarItem", "tabBarController",
    "parentViewController", "presentedViewController", "presentingViewController",
    "storyboard", "nibName", "nibBundle", "description", "hash", "superclass",
];

/// Whether `name` would clash with the generated code when used as a widget id.
pub fn is_reserved_identifier(name: &str) -> bool {
    RESERVED_IDENTIFIERS.contains(&name)
}

/// Fields and attributes shared by every widget variant.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetBase {
    /// Widget id. Empty until the layout allocates one, unless explicit.
    pub id: String,
    pub explicit_id: bool,
    /// Owning layout (back-reference).
    pub layout: LayoutId,
    /// Enclosing group, `None` for top-level widgets (back-reference).
    pub parent: Option<WidgetId>,
    /// Line of the element that declared the widget.
    pub line: u32,
    /// Line of the `id` attribute, or of the element if there is none.
    pub id_line: u32,
    pub alignment: Alignment,
    pub position: FloatPair,
    pub size: Option<FloatPair>,
    pub x_scale: ScaleMode,
    pub y_scale: ScaleMode,
    pub width_scale: ScaleMode,
    pub height_scale: ScaleMode,
    pub visible: bool,
    pub background: Option<Color>,
    /// Sibling the widget is positioned under.
    pub below: Option<Reference>,
    pub ios_class: Option<String>,
    pub android_class: Option<String>,
}

impl WidgetBase {
    pub fn new(layout: LayoutId, parent: Option<WidgetId>, line: u32) -> Self {
        Self {
            id: String::new(),
            explicit_id: false,
            layout,
            parent,
            line,
            id_line: line,
            alignment: Alignment::UNSPECIFIED,
            position: FloatPair::default(),
            size: None,
            x_scale: ScaleMode::Default,
            y_scale: ScaleMode::Default,
            width_scale: ScaleMode::Default,
            height_scale: ScaleMode::Default,
            visible: true,
            background: None,
            below: None,
            ios_class: None,
            android_class: None,
        }
    }

    /// Last layer of every attribute chain.
    pub fn parse_attribute(&mut self, attr: &XmlAttribute) -> Result<bool, ErrorKind> {
        let (name, value) = (attr.name.as_str(), attr.value.as_str());
        match name {
            "id" => {
                let id = value.trim();
                if !is_identifier(id) {
                    return Err(ErrorKind::InvalidIdentifier(id.to_string()));
                }
                if is_reserved_identifier(id) {
                    return Err(ErrorKind::ReservedIdentifier(id.to_string()));
                }
                self.id = id.to_string();
                self.explicit_id = true;
                self.id_line = attr.line;
            }
            "align" => self.alignment = parse_alignment(name, value)?,
            "pos" => self.position = parse_float_pair(name, value)?,
            "size" => self.size = Some(parse_float_pair(name, value)?),
            "xscale" => self.x_scale = parse_scale_mode(name, value)?,
            "yscale" => self.y_scale = parse_scale_mode(name, value)?,
            "wscale" => self.width_scale = parse_scale_mode(name, value)?,
            "hscale" => self.height_scale = parse_scale_mode(name, value)?,
            "posScale" => {
                self.x_scale = parse_scale_mode(name, value)?;
                self.y_scale = self.x_scale;
            }
            "sizeScale" => {
                self.width_scale = parse_scale_mode(name, value)?;
                self.height_scale = self.width_scale;
            }
            "visible" => self.visible = parse_bool(name, value)?,
            "bgcolor" => self.background = Some(parse_color(name, value)?),
            "below" => self.below = Some(Reference::from_attr(attr)?),
            "iosClass" => self.ios_class = Some(class_name(name, value)?),
            "androidClass" => self.android_class = Some(class_name(name, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn after_parse_attributes(&self) -> Result<(), ErrorKind> {
        Ok(())
    }
}

fn class_name(name: &str, value: &str) -> Result<String, AttributeError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AttributeError::Empty { name: name.to_string() });
    }
    if !value.split('.').all(is_identifier) {
        return Err(AttributeError::invalid(name, value, "a class name"));
    }
    Ok(value.to_string())
}
