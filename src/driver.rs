//! Two-Stage Compiler Driver
//!
//! Runs one [`CompilationJob`] to completion: DXC first (HLSL → SPIR-V
//! into the shared intermediate path), then SPIRV-Cross (SPIR-V → GLSL at
//! the job's artifact path). Stage 2 only runs when stage 1 exited zero.
//!
//! Both stages write through the single shared intermediate file, so jobs
//! of one run must execute strictly sequentially — the driver blocks on
//! each child process before returning.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::catalog::PipelineConfig;
use crate::errors::{PipelineError, Result};
use crate::job::CompilationJob;

/// GLSL version handed to SPIRV-Cross.
const GLSL_VERSION: &str = "450";

/// Drives the two external compiler stages for each job.
pub struct CompilerDriver {
    dxc_path: PathBuf,
    spirv_cross_path: PathBuf,
    include_dir: PathBuf,
    intermediate_path: PathBuf,
}

impl CompilerDriver {
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            dxc_path: config.dxc_path.clone(),
            spirv_cross_path: config.spirv_cross_path.clone(),
            include_dir: config.include_dir.clone(),
            intermediate_path: config.intermediate_path.clone(),
        }
    }

    /// Run both stages for one job.
    ///
    /// On success exactly one GLSL artifact exists at the job's artifact
    /// path. On failure the error carries the attempted command line and
    /// the artifact name; the artifact must not be treated as valid.
    pub fn compile(&self, job: &CompilationJob) -> Result<()> {
        let mut stage1 = Command::new(&self.dxc_path);
        stage1
            .arg(&job.source_path)
            .arg("-T")
            .arg(job.target_profile)
            .arg("-E")
            .arg(job.entry_point)
            .arg("-Fo")
            .arg(&self.intermediate_path)
            .arg("-spirv")
            .arg("-I")
            .arg(&self.include_dir)
            .args(job.defines.to_flags());
        run_stage(&mut stage1, &self.dxc_path, &job.artifact_path)?;

        let mut stage2 = Command::new(&self.spirv_cross_path);
        stage2
            .arg(&self.intermediate_path)
            .arg("--version")
            .arg(GLSL_VERSION)
            .arg("--output")
            .arg(&job.artifact_path);
        run_stage(&mut stage2, &self.spirv_cross_path, &job.artifact_path)?;

        log::info!("file \"{}\" generated", job.artifact_path.display());
        Ok(())
    }

}

fn run_stage(command: &mut Command, tool: &Path, artifact: &Path) -> Result<()> {
    let rendered = render_command(command);
    log::debug!("running: {rendered}");

    let status = command.status().map_err(|source| PipelineError::ToolSpawn {
        tool: tool.to_path_buf(),
        source,
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(PipelineError::Compilation {
            command: rendered,
            artifact: artifact
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })
    }
}

/// Render a command as a reproducible one-liner for logs and errors.
fn render_command(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
