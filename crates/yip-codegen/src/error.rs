//! Error types for code generation.

use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
///
/// Generation runs on a tree that already passed validation, so apart from
/// configuration and IO problems these indicate a bug in the compiler.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// A resource the validated tree refers to could not be found.
    #[error("missing {kind} '{id}' in layout '{layout}'")]
    MissingResource {
        kind: &'static str,
        id: String,
        layout: String,
    },

    /// Two different texts map to the same Android string resource.
    #[error("string resource '{key}' for {element} in layout '{layout}' already holds a different text")]
    ConflictingStringKey {
        key: String,
        element: String,
        layout: String,
    },

    /// Two layouts would be generated into the same class.
    #[error("layout '{second}' generates class '{class}', which layout '{first}' already generates")]
    DuplicateClass {
        class: String,
        first: String,
        second: String,
    },

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// Project configuration could not be parsed.
    #[error("Invalid project configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Writing into a code buffer failed.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    pub(crate) fn missing(kind: &'static str, id: &str, layout: &str) -> Self {
        Self::MissingResource {
            kind,
            id: id.to_string(),
            layout: layout.to_string(),
        }
    }
}
