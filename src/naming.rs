//! Artifact Naming
//!
//! Derives output file paths and provenance headers from a catalog source
//! name. Generated artifacts keep the source's full name with a `.glsl`
//! suffix (`shadowmap_point.vert` → `shadowmap_point.vert.glsl`); the
//! animated variant of a vertex shader gets an `animated_` prefix.

use std::path::{Path, PathBuf};

/// Prefix applied to the animated variant's artifact name.
pub const ANIMATED_PREFIX: &str = "animated_";

/// Absolute path of the HLSL input for a catalog source name.
#[must_use]
pub fn hlsl_input_path(hlsl_dir: &Path, source: &str) -> PathBuf {
    hlsl_dir.join(format!("{source}.hlsl"))
}

/// Artifact path for the base (non-animated) job of a source.
#[must_use]
pub fn artifact_path(generated_dir: &Path, source: &str) -> PathBuf {
    generated_dir.join(format!("{source}.glsl"))
}

/// Artifact path for the animated variant of a source.
#[must_use]
pub fn animated_artifact_path(generated_dir: &Path, source: &str) -> PathBuf {
    generated_dir.join(format!("{ANIMATED_PREFIX}{source}.glsl"))
}

/// The provenance line stamped at the top of a file: `/// File: <basename>`.
#[must_use]
pub fn provenance_header(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    format!("/// File: {file_name}\n")
}
