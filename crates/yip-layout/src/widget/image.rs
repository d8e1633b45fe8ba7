use yip_core::ErrorKind;

use super::{Reference, WidgetBase, WidgetType};
use crate::xml::XmlAttribute;

/// Displays a `rawImage` resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageView {
    pub image: Option<Reference>,
}

impl WidgetType for ImageView {
    fn parse_attribute(&mut self, base: &mut WidgetBase, attr: &XmlAttribute) -> Result<bool, ErrorKind> {
        match attr.name.as_str() {
            "image" => {
                self.image = Some(Reference::from_attr(attr)?);
                Ok(true)
            }
            _ => base.parse_attribute(attr),
        }
    }
}
