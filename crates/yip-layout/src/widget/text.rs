//! The capability shared by widgets that display text.

use yip_core::{parse_color, parse_font, parse_scale_pair, Color, ErrorKind, Font, ScalePair};

use super::{Reference, WidgetBase};
use crate::xml::XmlAttribute;

/// Where a piece of displayed text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSource {
    /// Text written directly in the attribute.
    Literal(String),
    /// `@id`: a `string` declared in the layout or one of its ancestors.
    String(Reference),
}

impl TextSource {
    /// Parse an attribute value. `@id` references a string, `@@` escapes a
    /// literal leading `@`.
    pub fn from_attr(attr: &XmlAttribute) -> Result<Self, ErrorKind> {
        let value = attr.value.as_str();
        if let Some(escaped) = value.strip_prefix("@@") {
            return Ok(Self::Literal(format!("@{}", escaped)));
        }
        match value.strip_prefix('@') {
            Some(id) => {
                let id = id.trim();
                if !super::is_identifier(id) {
                    return Err(ErrorKind::InvalidIdentifier(id.to_string()));
                }
                Ok(Self::String(Reference {
                    id: id.to_string(),
                    line: attr.line,
                }))
            }
            None => Ok(Self::Literal(value.to_string())),
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::String(reference) => Some(reference),
            Self::Literal(_) => None,
        }
    }
}

/// Text, color and font settings of a text-bearing widget.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    pub text: Option<TextSource>,
    pub text_color: Color,
    pub font: Option<Font>,
    pub font_scale: ScalePair,
    pub has_font_scale: bool,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: None,
            text_color: Color::WHITE,
            font: None,
            font_scale: ScalePair::default(),
            has_font_scale: false,
        }
    }
}

impl TextProps {
    pub fn parse_attribute(&mut self, base: &mut WidgetBase, attr: &XmlAttribute) -> Result<bool, ErrorKind> {
        let (name, value) = (attr.name.as_str(), attr.value.as_str());
        match name {
            "text" => self.text = Some(TextSource::from_attr(attr)?),
            "textColor" => self.text_color = parse_color(name, value)?,
            "font" => self.font = Some(parse_font(name, value)?),
            "fontScale" => {
                self.font_scale = parse_scale_pair(name, value)?;
                self.has_font_scale = true;
            }
            _ => return base.parse_attribute(attr),
        }
        Ok(true)
    }

    pub fn after_parse_attributes(&self, base: &WidgetBase) -> Result<(), ErrorKind> {
        if self.font.is_none() && self.has_font_scale {
            return Err(ErrorKind::FontScaleWithoutFont);
        }
        base.after_parse_attributes()
    }
}
