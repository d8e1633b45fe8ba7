//! Native UI code generation for the yip layout compiler.
//!
//! Takes validated [`Compilation`](yip_layout::Compilation)s and emits source
//! that builds and positions the described widgets at runtime.
//!
//! # Targets
//!
//! - **UIKit**: one Objective-C view controller per document, plus a table
//!   cell class per `cell` sub-layout
//! - **Android**: one `FrameLayout` subclass per layout, plus a merged
//!   `strings.xml` holding every localized text
//!
//! # Example
//!
//! ```
//! use yip_codegen::{CodeGenerator, IosGenerator, ProjectContext};
//!
//! let source = r#"<layout size="320,480" portrait="true"><button id="ok" text="OK"/></layout>"#;
//! let compilation = yip_layout::compile(source, "main.xml").unwrap();
//! let project = IosGenerator::new()
//!     .unwrap()
//!     .generate_project(&[compilation], &ProjectContext::default())
//!     .unwrap();
//! assert_eq!(project.files[0].path, "ios/MainViewController.h");
//! ```

pub mod context;
pub mod error;
pub mod generators;

pub use context::ProjectContext;
pub use error::{CodegenError, Result};
pub use generators::{
    AndroidGenerator, CodeGenerator, GeneratedFile, GeneratedProject, IosGenerator, LayoutSource, Scope,
};

/// Generators for every supported target, keyed by command-line name.
pub fn generators() -> Result<Vec<(&'static str, Box<dyn CodeGenerator>)>> {
    Ok(vec![
        ("ios", Box::new(IosGenerator::new()?) as Box<dyn CodeGenerator>),
        ("android", Box::new(AndroidGenerator::new()?) as Box<dyn CodeGenerator>),
    ])
}
