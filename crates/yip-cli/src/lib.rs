//! Driver behind the `yip` binary: read documents, compile them, run the
//! selected generators and write their output.

pub mod cli;

use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use yip_codegen::{GeneratedProject, ProjectContext};
use yip_layout::Compilation;

pub use cli::{Cli, Platform};

pub fn run(args: &Cli) -> anyhow::Result<()> {
    let project = match &args.config {
        Some(path) => ProjectContext::load(path).with_context(|| format!("Loading {}", path.display()))?,
        None => ProjectContext::default(),
    };

    let compilations = compile_all(&args.inputs)?;
    log::info!("compiled {} documents", compilations.len());

    // Generate everything before writing anything.
    let mut outputs = Vec::new();
    for (name, generator) in yip_codegen::generators()? {
        if !args.platform.includes(name) {
            continue;
        }
        let generated = generator
            .generate_project(&compilations, &project)
            .with_context(|| format!("Generating {} sources", generator.framework_name()))?;
        outputs.push((generator.framework_name(), generated));
    }

    for (framework, generated) in &outputs {
        let written = write_project(generated, &args.out)?;
        log::info!("{}: wrote {} files", framework, written.len());
    }
    Ok(())
}

/// Compile every input in parallel. Results keep the order of `inputs`;
/// the first failing document in that order is reported.
pub fn compile_all(inputs: &[PathBuf]) -> anyhow::Result<Vec<Compilation>> {
    inputs
        .par_iter()
        .map(|path| -> anyhow::Result<Compilation> {
            let source =
                std::fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
            let compilation = yip_layout::compile(&source, &path.display().to_string())?;
            log::debug!("{}: {} layouts", path.display(), compilation.len());
            Ok(compilation)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

/// Write generated files below `out`, creating directories as needed.
pub fn write_project(project: &GeneratedProject, out: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(project.files.len());
    for file in &project.files {
        let path = out.join(&file.path);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).with_context(|| format!("Creating {}", dir.display()))?;
        }
        std::fs::write(&path, &file.content).with_context(|| format!("Writing {}", path.display()))?;
        log::trace!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
