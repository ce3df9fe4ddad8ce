use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse to write `output` over one of the files it was built from, or into
/// an existing directory.
pub fn ensure_output_not_same(output: &Path, inputs: &[&Path]) -> Result<()> {
    if output.is_dir() {
        bail!("manifest output {} is a directory", output.display());
    }

    let target = comparable_path(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;
    for input in inputs {
        let source = comparable_path(input)
            .with_context(|| format!("failed to resolve input path {}", input.display()))?;
        if target == source {
            bail!(
                "refusing to overwrite input file {} with manifest output",
                input.display()
            );
        }
    }
    Ok(())
}

fn comparable_path(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    // Not on disk yet: anchor to the cwd without resolving `..`.
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir().context("current_dir")?.join(path))
    }
}
