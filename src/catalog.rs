//! Shader Catalog & Pipeline Configuration
//!
//! The catalog is the static, ordered list of shader source units the
//! pipeline regenerates on every run. Each entry names an HLSL source
//! relative to the HLSL root (without the `.hlsl` suffix); the trailing
//! marker of the name encodes the shader kind.
//!
//! All paths and the catalog itself live in an explicit [`PipelineConfig`]
//! value passed into the orchestrator at construction, so multiple
//! pipeline runs (e.g. in tests) do not interfere through shared state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PipelineError, Result};

/// Shader stage kind, derived from a source name's trailing marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Vertex,
    Pixel,
    Compute,
}

impl ShaderKind {
    /// Derive the kind from a catalog source name.
    ///
    /// Exactly three markers are recognized: `.vert`, `.pixel`, `.comp`.
    /// Anything else is a configuration error naming the offending path;
    /// the pipeline never guesses a default.
    pub fn from_source_name(source: &str) -> Result<Self> {
        if source.ends_with(".vert") {
            Ok(Self::Vertex)
        } else if source.ends_with(".pixel") {
            Ok(Self::Pixel)
        } else if source.ends_with(".comp") {
            Ok(Self::Compute)
        } else {
            Err(PipelineError::UnknownShaderKind(PathBuf::from(source)))
        }
    }

    /// The DXC target-profile identifier for this stage.
    #[inline]
    #[must_use]
    pub fn target_profile(self) -> &'static str {
        match self {
            Self::Vertex => "vs_6_0",
            Self::Pixel => "ps_6_0",
            Self::Compute => "cs_6_0",
        }
    }
}

/// One catalog entry: an HLSL source unit and its expansion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderDescriptor {
    /// Source name relative to the HLSL root, without the `.hlsl` suffix
    /// (e.g. `shadowmap_point.vert` for `hlsl/shadowmap_point.vert.hlsl`).
    pub source: String,
    /// Compile a second variant with skeletal-animation code paths enabled.
    #[serde(default)]
    pub animated: bool,
}

impl ShaderDescriptor {
    #[must_use]
    pub fn new(source: impl Into<String>, animated: bool) -> Self {
        Self {
            source: source.into(),
            animated,
        }
    }

    /// Shader kind for this entry.
    pub fn kind(&self) -> Result<ShaderKind> {
        ShaderKind::from_source_name(&self.source)
    }
}

/// Explicit configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Stage-1 compiler (HLSL → SPIR-V).
    pub dxc_path: PathBuf,
    /// Stage-2 cross-compiler (SPIR-V → GLSL).
    pub spirv_cross_path: PathBuf,
    /// Root of the hand-authored HLSL sources.
    pub hlsl_dir: PathBuf,
    /// Include search path handed to stage 1.
    pub include_dir: PathBuf,
    /// Output directory, deleted and recreated on every run.
    pub generated_dir: PathBuf,
    /// The single transient `.spv` scratch path shared by every job of a
    /// run. Deleted unconditionally at run end.
    pub intermediate_path: PathBuf,
    /// Ordered shader catalog.
    pub catalog: Vec<ShaderDescriptor>,
}

impl PipelineConfig {
    /// Configuration mirroring the engine's project layout: tools under
    /// `bin/`, sources under `source/shader/`, artifacts under
    /// `source/shader/glsl_generated/`.
    #[must_use]
    pub fn for_project(project_dir: impl AsRef<Path>) -> Self {
        let project_dir = project_dir.as_ref();
        let shader_dir = project_dir.join("source/shader");
        Self {
            dxc_path: project_dir.join("bin/dxc"),
            spirv_cross_path: project_dir.join("bin/spirv-cross"),
            hlsl_dir: shader_dir.join("hlsl"),
            include_dir: shader_dir.clone(),
            generated_dir: shader_dir.join("glsl_generated"),
            intermediate_path: PathBuf::from("tmp.spv"),
            catalog: Self::default_catalog(),
        }
    }

    /// The built-in nine-entry catalog.
    #[must_use]
    pub fn default_catalog() -> Vec<ShaderDescriptor> {
        [
            ("shadowmap_point.vert", true),
            ("shadowmap_point.pixel", false),
            ("bloom_setup.comp", false),
            ("bloom_downsample.comp", false),
            ("bloom_upsample.comp", false),
            ("particle_initialization.comp", false),
            ("particle_kickoff.comp", false),
            ("particle_emission.comp", false),
            ("particle_simulation.comp", false),
        ]
        .into_iter()
        .map(|(source, animated)| ShaderDescriptor::new(source, animated))
        .collect()
    }

    /// Load catalog and tool-path overrides from a TOML manifest.
    ///
    /// Manifest paths are resolved relative to the project directory.
    /// Absent keys keep the [`Self::for_project`] defaults.
    pub fn from_manifest(project_dir: impl AsRef<Path>, manifest_path: &Path) -> Result<Self> {
        let project_dir = project_dir.as_ref();
        let text = std::fs::read_to_string(manifest_path)?;
        let manifest: Manifest = toml::from_str(&text)?;

        let mut config = Self::for_project(project_dir);
        if let Some(dxc) = manifest.dxc {
            config.dxc_path = project_dir.join(dxc);
        }
        if let Some(spirv_cross) = manifest.spirv_cross {
            config.spirv_cross_path = project_dir.join(spirv_cross);
        }
        if let Some(shaders) = manifest.shaders {
            config.catalog = shaders;
        }
        log::debug!(
            "loaded manifest {} ({} catalog entries)",
            manifest_path.display(),
            config.catalog.len()
        );
        Ok(config)
    }
}

/// On-disk manifest schema.
#[derive(Debug, Deserialize)]
struct Manifest {
    dxc: Option<PathBuf>,
    #[serde(rename = "spirv-cross")]
    spirv_cross: Option<PathBuf>,
    shaders: Option<Vec<ShaderDescriptor>>,
}
