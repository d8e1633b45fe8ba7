//! The widget type system.
//!
//! A [`Widget`] is a [`WidgetBase`] (attributes every widget shares) plus a
//! [`WidgetKind`], the closed set of widget variants. Each variant implements
//! [`WidgetType`]; attribute parsing goes from the most specific layer down
//! to the base, and the first layer that recognizes the name claims it:
//!
//! ```text
//! Button ──► TextProps ──► WidgetBase
//! Image  ──────────────► WidgetBase
//! ```

mod base;
mod button;
mod group;
mod image;
mod label;
mod table_view;
mod text;
mod text_field;

pub use base::{is_identifier, is_reserved_identifier, WidgetBase};
pub use button::Button;
pub use group::Group;
pub use image::ImageView;
pub use label::Label;
pub use table_view::TableView;
pub use text::{TextProps, TextSource};
pub use text_field::TextField;

use crate::layout::LayoutId;
use crate::xml::XmlAttribute;
use yip_core::ErrorKind;

/// Index of a widget inside its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub usize);

/// A by-name reference to a resource or widget, kept with the line of the
/// attribute that made it so resolution errors can point back at it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub id: String,
    pub line: u32,
}

impl Reference {
    pub(crate) fn from_attr(attr: &XmlAttribute) -> Result<Self, ErrorKind> {
        let id = attr.value.trim();
        if id.is_empty() {
            return Err(yip_core::AttributeError::Empty { name: attr.name.clone() }.into());
        }
        Ok(Self {
            id: id.to_string(),
            line: attr.line,
        })
    }
}

/// The per-variant operations shared by every widget kind.
pub trait WidgetType {
    /// Try to handle one attribute. Variants handle their own attributes and
    /// delegate everything else to the next layer; `Ok(false)` means no layer
    /// recognized the name.
    fn parse_attribute(&mut self, base: &mut WidgetBase, attr: &XmlAttribute) -> Result<bool, ErrorKind>;

    /// Cross-attribute validation, run once after all attributes were seen.
    fn after_parse_attributes(&self, base: &WidgetBase) -> Result<(), ErrorKind> {
        base.after_parse_attributes()
    }
}

/// The closed set of widget variants.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Group(Group),
    Button(Button),
    Image(ImageView),
    Label(Label),
    TextField(TextField),
    TableView(TableView),
}

impl WidgetKind {
    /// Construct the variant for an element tag.
    pub fn for_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "group" => Self::Group(Group::default()),
            "button" => Self::Button(Button::default()),
            "image" => Self::Image(ImageView::default()),
            "label" => Self::Label(Label::default()),
            "textField" => Self::TextField(TextField::default()),
            "tableView" => Self::TableView(TableView::default()),
            _ => return None,
        };
        Some(kind)
    }

    /// The element tag of this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Group(_) => "group",
            Self::Button(_) => "button",
            Self::Image(_) => "image",
            Self::Label(_) => "label",
            Self::TextField(_) => "textField",
            Self::TableView(_) => "tableView",
        }
    }

    /// Text properties, for the variants that carry text.
    pub fn text(&self) -> Option<&TextProps> {
        match self {
            Self::Button(button) => Some(&button.text),
            Self::Label(label) => Some(&label.text),
            Self::TextField(field) => Some(&field.text),
            Self::Group(_) | Self::Image(_) | Self::TableView(_) => None,
        }
    }

    fn widget_type(&self) -> &dyn WidgetType {
        match self {
            Self::Group(w) => w,
            Self::Button(w) => w,
            Self::Image(w) => w,
            Self::Label(w) => w,
            Self::TextField(w) => w,
            Self::TableView(w) => w,
        }
    }

    fn widget_type_mut(&mut self) -> &mut dyn WidgetType {
        match self {
            Self::Group(w) => w,
            Self::Button(w) => w,
            Self::Image(w) => w,
            Self::Label(w) => w,
            Self::TextField(w) => w,
            Self::TableView(w) => w,
        }
    }
}

/// One node of the presentation tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub base: WidgetBase,
    pub kind: WidgetKind,
}

impl Widget {
    pub fn new(kind: WidgetKind, layout: LayoutId, parent: Option<WidgetId>, line: u32) -> Self {
        Self {
            base: WidgetBase::new(layout, parent, line),
            kind,
        }
    }

    /// The widget id, explicit or allocated when its layout was closed.
    pub fn id(&self) -> &str {
        &self.base.id
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// Same shape as the element description used in error context trails.
    pub fn describe(&self) -> String {
        if self.base.explicit_id {
            format!("<{} id=\"{}\"> at line {}", self.tag(), self.base.id, self.base.line)
        } else {
            format!("<{}> at line {}", self.tag(), self.base.line)
        }
    }

    pub fn parse_attribute(&mut self, attr: &XmlAttribute) -> Result<bool, ErrorKind> {
        self.kind.widget_type_mut().parse_attribute(&mut self.base, attr)
    }

    pub fn after_parse_attributes(&self) -> Result<(), ErrorKind> {
        self.kind.widget_type().after_parse_attributes(&self.base)
    }

    /// Child widgets, for groups.
    pub fn children(&self) -> &[WidgetId] {
        match &self.kind {
            WidgetKind::Group(group) => &group.children,
            _ => &[],
        }
    }

    /// Every resource reference this widget makes, for resolution.
    pub fn image_refs(&self) -> Vec<&Reference> {
        match &self.kind {
            WidgetKind::Button(button) => button.image.iter().chain(&button.background_image).collect(),
            WidgetKind::Image(image) => image.image.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Every `@string` reference this widget makes, for resolution.
    pub fn string_refs(&self) -> Vec<&Reference> {
        let mut refs: Vec<&Reference> = self
            .kind
            .text()
            .and_then(|text| text.text.as_ref())
            .and_then(TextSource::as_reference)
            .into_iter()
            .collect();
        if let WidgetKind::TextField(field) = &self.kind {
            refs.extend(field.placeholder.as_ref().and_then(TextSource::as_reference));
        }
        refs
    }
}
