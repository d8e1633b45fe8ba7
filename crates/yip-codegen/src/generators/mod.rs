//! Code generators for the supported native UI toolkits.

mod android;
mod common;
mod ios;
mod templates;

pub use android::AndroidGenerator;
pub use ios::IosGenerator;
pub use templates::TemplateEngine;

use indexmap::IndexMap;
use serde::Serialize;
use yip_layout::{Compilation, Layout, LayoutId};

use crate::context::ProjectContext;
use crate::error::{CodegenError, Result};

/// Common trait for code generators.
pub trait CodeGenerator {
    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    /// Generate every source file for a set of compiled documents.
    fn generate_project(&self, compilations: &[Compilation], project: &ProjectContext) -> Result<GeneratedProject>;
}

/// Generated project output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedProject {
    /// Generated files, in generation order.
    pub files: Vec<GeneratedFile>,
}

/// A generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// File path relative to the output directory.
    pub path: String,
    /// File content.
    pub content: String,
}

/// What a generator sees while emitting code for one layout.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub compilation: &'a Compilation,
    pub layout: LayoutId,
    pub project: &'a ProjectContext,
    /// The root layout becomes a view controller, sub-layouts become cells.
    pub is_view_controller: bool,
}

impl<'a> Scope<'a> {
    pub fn new(compilation: &'a Compilation, layout: LayoutId, project: &'a ProjectContext) -> Self {
        Self {
            compilation,
            layout,
            project,
            is_view_controller: compilation.layout(layout).parent().is_none(),
        }
    }

    pub fn layout(&self) -> &'a Layout {
        self.compilation.layout(self.layout)
    }
}

/// A member variable holding one widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    #[serde(rename = "type")]
    pub class: String,
    pub name: String,
}

/// The code generated for all widgets of one layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSource {
    /// One field per widget, in document order.
    pub fields: Vec<Field>,
    pub init_code: String,
    pub layout_code: String,
}

/// Fail if two layouts across `compilations` map to the same class name,
/// e.g. documents with the same file stem in different directories.
pub(crate) fn check_unique_classes<F>(
    compilations: &[Compilation],
    project: &ProjectContext,
    class_of: F,
) -> Result<()>
where
    F: Fn(&Scope) -> String,
{
    let mut seen: IndexMap<String, String> = IndexMap::new();
    for compilation in compilations {
        for (id, layout) in compilation.layouts() {
            let class = class_of(&Scope::new(compilation, id, project));
            let origin = format!("{} in {}", layout.name(), compilation.file);
            if let Some(first) = seen.get(&class) {
                return Err(CodegenError::DuplicateClass {
                    class,
                    first: first.clone(),
                    second: origin,
                });
            }
            seen.insert(class, origin);
        }
    }
    Ok(())
}
