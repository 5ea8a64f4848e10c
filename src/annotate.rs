//! Provenance Annotator
//!
//! Stamps a `/// File: <basename>` header at the top of a file. The
//! rewrite goes through a temp file in the same directory followed by a
//! rename, so later pipeline steps never observe a half-written artifact.
//!
//! Stamping is not idempotent — a second call prepends a second header.
//! The orchestrator stamps each generated artifact exactly once; the
//! tree-stamping mode is meant for a fresh checkout of hand-authored
//! sources.

use std::io::Write;
use std::path::Path;

use walkdir::WalkDir;

use crate::errors::Result;
use crate::naming;

/// File extensions eligible for tree stamping.
const STAMPED_EXTENSIONS: &[&str] = &["h", "hlsl", "glsl"];

/// Prepend the provenance header to `path`, atomically.
///
/// A nonexistent path is a no-op, not an error — a failed compilation
/// leaves no artifact to stamp.
pub fn stamp_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Ok(());
    }

    let contents = std::fs::read_to_string(path)?;
    let header = naming::provenance_header(path);

    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(header.as_bytes())?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Walk `root` and stamp every hand-authored shader/include file
/// (`.h`, `.hlsl`, `.glsl`), unconditionally and without compilation.
pub fn stamp_tree(root: &Path) -> Result<usize> {
    let mut stamped = 0;
    for entry in WalkDir::new(root)
        .contents_first(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let eligible = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| STAMPED_EXTENSIONS.contains(&ext));
        if eligible {
            log::info!("*** stamping file {}", path.display());
            stamp_file(path)?;
            stamped += 1;
        }
    }
    Ok(stamped)
}
