//! Error types for the yip layout compiler.

use smallvec::SmallVec;
use thiserror::Error;

/// Errors produced while resolving a single attribute value.
///
/// These carry no location; the caller attaches the file and line of the
/// attribute when converting into a [`LayoutError`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    #[error("invalid value '{value}' for attribute '{name}': expected {expected}")]
    InvalidValue {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("attribute '{name}' must not be empty")]
    Empty { name: String },

    #[error("attribute '{name}' sets the {axis} scale, which was already specified")]
    ContradictoryScale { name: String, axis: &'static str },
}

impl AttributeError {
    /// Shorthand for [`AttributeError::InvalidValue`].
    pub fn invalid(name: &str, value: &str, expected: &'static str) -> Self {
        Self::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}

/// What went wrong while compiling a layout document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    // Structural errors
    #[error("malformed XML: {0}")]
    Xml(String),

    #[error("expected root element '{expected}', found '{found}'")]
    UnexpectedRoot { expected: String, found: String },

    #[error("unknown element '{0}'")]
    UnknownElement(String),

    #[error("element '{name}' is not allowed {context}")]
    MisplacedElement { name: String, context: &'static str },

    #[error("unexpected text content")]
    UnexpectedText,

    // Attribute errors
    #[error("unexpected attribute '{0}'")]
    UnexpectedAttribute(String),

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("widget id '{0}' clashes with a name used by the generated code")]
    ReservedIdentifier(String),

    #[error("duplicate string id '{0}'")]
    DuplicateStringId(String),

    #[error("duplicate image id '{0}'")]
    DuplicateImageId(String),

    #[error("duplicate widget id '{0}'")]
    DuplicateWidgetId(String),

    #[error("reference to unknown string '{0}'")]
    UnknownString(String),

    #[error("reference to unknown image '{0}'")]
    UnknownImage(String),

    #[error("reference to unknown widget '{0}'")]
    UnknownWidget(String),

    #[error("widget '{0}' must be declared before it is referenced")]
    ForwardReference(String),

    #[error("widget '{0}' is not a sibling of the referencing widget")]
    NotASibling(String),

    // Cross-field errors
    #[error("font scale mode is useless without specifying a font")]
    FontScaleWithoutFont,

    #[error("neither portrait, nor landscape orientation were enabled")]
    NoOrientation,

    #[error("neither portrait, nor landscape orientation were enabled for tablets")]
    NoTabletOrientation,
}

/// A compile failure located in a source file.
///
/// `context` lists the enclosing elements, innermost first, as the error
/// propagates outwards through the element tree.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{file}({line}): {kind}{}", render_context(.context))]
pub struct LayoutError {
    pub file: String,
    pub line: u32,
    pub kind: ErrorKind,
    pub context: SmallVec<[String; 4]>,
}

impl LayoutError {
    /// Create an error at the given 1-based line.
    pub fn new(file: impl Into<String>, line: u32, kind: impl Into<ErrorKind>) -> Self {
        Self {
            file: file.into(),
            line,
            kind: kind.into(),
            context: SmallVec::new(),
        }
    }

    /// Record an enclosing element the error propagated through.
    pub fn within(mut self, element: impl Into<String>) -> Self {
        self.context.push(element.into());
        self
    }
}

fn render_context(context: &[String]) -> String {
    context
        .iter()
        .map(|element| format!("\n    in {}", element))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let err = LayoutError::new("main.xml", 7, ErrorKind::UnknownElement("foo".into()));
        assert_eq!(err.to_string(), "main.xml(7): unknown element 'foo'");
    }

    #[test]
    fn test_display_includes_context_trail() {
        let err = LayoutError::new("main.xml", 7, ErrorKind::UnexpectedAttribute("bar".into()))
            .within("<button> at line 7")
            .within("<group id=\"root\"> at line 3");
        let text = err.to_string();
        assert!(text.starts_with("main.xml(7): unexpected attribute 'bar'"));
        assert!(text.contains("\n    in <button> at line 7\n    in <group id=\"root\"> at line 3"));
    }

    #[test]
    fn test_attribute_error_converts_into_kind() {
        let kind: ErrorKind = AttributeError::invalid("size", "abc", "a number").into();
        assert_eq!(
            kind.to_string(),
            "invalid value 'abc' for attribute 'size': expected a number"
        );
    }
}
