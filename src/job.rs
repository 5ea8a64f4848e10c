//! Compilation Job Builder
//!
//! Expands one [`ShaderDescriptor`] into the ordered sequence of jobs the
//! driver executes for it: always the base job, plus an animated variant
//! when the descriptor is flagged. Expansion is pure — no process is
//! spawned and no file is touched here — so every configuration error
//! surfaces before the first external compiler runs.

use std::path::PathBuf;

use crate::catalog::{PipelineConfig, ShaderDescriptor, ShaderKind};
use crate::defines::ShaderDefines;
use crate::errors::{PipelineError, Result};
use crate::naming;

/// Language-mode defines applied to every job.
const BASE_DEFINES: &[(&str, &str)] = &[("HLSL_LANG", "1"), ("HLSL_LANG_D3D11", "1")];

/// The define enabling skeletal-animation code paths in vertex shaders.
const ANIMATION_DEFINE: &str = "HAS_ANIMATION";

/// Entry point name handed to the stage-1 compiler.
pub const ENTRY_POINT: &str = "main";

/// One unit of work for the two-stage driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationJob {
    /// Absolute path of the HLSL input.
    pub source_path: PathBuf,
    /// DXC target-profile identifier (`vs_6_0` / `ps_6_0` / `cs_6_0`).
    pub target_profile: &'static str,
    /// Shader entry point, always `main`.
    pub entry_point: &'static str,
    /// Preprocessor defines for stage 1.
    pub defines: ShaderDefines,
    /// Final GLSL artifact path.
    pub artifact_path: PathBuf,
}

/// Expand a descriptor into its job sequence: base job first, animated
/// variant second when present.
///
/// # Errors
///
/// - [`PipelineError::UnknownShaderKind`] when the source name carries no
///   recognized kind marker.
/// - [`PipelineError::AnimatedNonVertex`] when a descriptor is flagged
///   `animated` but is not a vertex shader.
pub fn expand_jobs(
    descriptor: &ShaderDescriptor,
    config: &PipelineConfig,
) -> Result<Vec<CompilationJob>> {
    let kind = descriptor.kind()?;
    let source_path = naming::hlsl_input_path(&config.hlsl_dir, &descriptor.source);
    let defines = ShaderDefines::from(BASE_DEFINES);

    let base = CompilationJob {
        source_path: source_path.clone(),
        target_profile: kind.target_profile(),
        entry_point: ENTRY_POINT,
        defines: defines.clone(),
        artifact_path: naming::artifact_path(&config.generated_dir, &descriptor.source),
    };
    let mut jobs = vec![base];

    if descriptor.animated {
        if kind != ShaderKind::Vertex {
            return Err(PipelineError::AnimatedNonVertex(source_path));
        }
        let mut animated_defines = defines;
        animated_defines.set(ANIMATION_DEFINE, "1");
        jobs.push(CompilationJob {
            source_path,
            target_profile: kind.target_profile(),
            entry_point: ENTRY_POINT,
            defines: animated_defines,
            artifact_path: naming::animated_artifact_path(
                &config.generated_dir,
                &descriptor.source,
            ),
        });
        log::debug!(
            "{}: expanded animated variant",
            descriptor.source
        );
    }

    Ok(jobs)
}
