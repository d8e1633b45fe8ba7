//! XML layout front-end for the yip layout compiler.
//!
//! This crate turns a layout document into a validated [`Compilation`]:
//!
//! 1. **XML**: `quick-xml` events become an element tree with line numbers
//! 2. **Building**: elements are dispatched by tag to the widget type system,
//!    layout-level declarations (`string`, `rawImage`, `import`) are
//!    collected and table cells become nested layouts
//! 3. **Resolution**: `@string` text, image references and `below` siblings
//!    are checked against the finished tree
//!
//! # Example
//!
//! ```
//! let source = r#"<layout size="320,480" portrait="true"><button id="ok" text="OK"/></layout>"#;
//! let compilation = yip_layout::compile(source, "main.xml").unwrap();
//! assert_eq!(compilation.root().widget_for_id("ok").map(|w| w.tag()), Some("button"));
//! ```

mod builder;
mod layout;
mod resolve;
pub mod widget;
pub mod xml;

pub use layout::{Compilation, ImageResource, Layout, LayoutId, LocalizedString, Orientations};
pub use widget::{Reference, TextProps, TextSource, Widget, WidgetBase, WidgetId, WidgetKind};

use builder::Builder;
use yip_core::LayoutError;

/// Compile one layout document. `file` names the document in errors and
/// gives the root layout its name.
pub fn compile(source: &str, file: &str) -> Result<Compilation, LayoutError> {
    log::debug!("{}: parsing XML", file);
    let root = xml::parse(source, file)?;

    log::debug!("{}: building layouts", file);
    let mut builder = Builder::new(file);
    builder.parse_top_level(&root, &layout_name(file))?;
    let compilation = Compilation::new(file, builder.finish());

    log::debug!("{}: resolving references in {} layouts", file, compilation.len());
    resolve::resolve(&compilation)?;
    Ok(compilation)
}

/// Root layout name for a document path: the file stem with every
/// character that cannot appear in an identifier replaced by `_`.
pub fn layout_name(file: &str) -> String {
    let base = file.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(file);
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };
    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        name.insert(0, '_');
    }
    name
}
