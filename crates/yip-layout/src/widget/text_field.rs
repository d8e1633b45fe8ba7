use yip_core::{parse_bool, ErrorKind};

use super::{TextProps, TextSource, WidgetBase, WidgetType};
use crate::xml::XmlAttribute;

/// An editable single-line text input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    pub text: TextProps,
    pub placeholder: Option<TextSource>,
    /// Obscure the entered text.
    pub secure: bool,
}

impl WidgetType for TextField {
    fn parse_attribute(&mut self, base: &mut WidgetBase, attr: &XmlAttribute) -> Result<bool, ErrorKind> {
        match attr.name.as_str() {
            "placeholder" => self.placeholder = Some(TextSource::from_attr(attr)?),
            "secure" => self.secure = parse_bool(&attr.name, &attr.value)?,
            _ => return self.text.parse_attribute(base, attr),
        }
        Ok(true)
    }

    fn after_parse_attributes(&self, base: &WidgetBase) -> Result<(), ErrorKind> {
        self.text.after_parse_attributes(base)
    }
}
