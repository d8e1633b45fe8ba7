use yip_core::{parse_bool, ErrorKind};

use super::{Reference, TextProps, WidgetBase, WidgetType};
use crate::xml::XmlAttribute;

/// A push button with optional title, foreground image and background image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Button {
    pub text: TextProps,
    pub image: Option<Reference>,
    pub background_image: Option<Reference>,
    /// Place the foreground image to the right of the title.
    pub image_on_right: bool,
}

impl WidgetType for Button {
    fn parse_attribute(&mut self, base: &mut WidgetBase, attr: &XmlAttribute) -> Result<bool, ErrorKind> {
        match attr.name.as_str() {
            "image" => self.image = Some(Reference::from_attr(attr)?),
            "backgroundImage" => self.background_image = Some(Reference::from_attr(attr)?),
            "imageOnRight" => self.image_on_right = parse_bool(&attr.name, &attr.value)?,
            _ => return self.text.parse_attribute(base, attr),
        }
        Ok(true)
    }

    fn after_parse_attributes(&self, base: &WidgetBase) -> Result<(), ErrorKind> {
        self.text.after_parse_attributes(base)
    }
}
