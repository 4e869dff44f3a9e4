//! Frame sinks and the output helpers they share.

pub mod ffmpeg;
pub mod png;
pub mod sink;

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::ScatterResult;

/// Create the parent directory of an output file. A bare file name needs nothing.
pub fn ensure_parent_dir(path: &Path) -> ScatterResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
