//! Pipeline Orchestrator
//!
//! Drives a full regeneration pass: wipe and recreate the output
//! directory, expand and compile every catalog entry in order, stamp each
//! artifact, and fail fast on the first error. The shared intermediate
//! `.spv` is removed on every exit path by a drop guard, so a failed run
//! never leaves scratch state behind.
//!
//! There is no incremental mode. A run either regenerates the whole
//! catalog or aborts; already-completed artifacts of an aborted run stay
//! on disk, only the intermediate file is cleaned up.

use std::path::{Path, PathBuf};

use crate::annotate;
use crate::catalog::PipelineConfig;
use crate::driver::CompilerDriver;
use crate::errors::Result;
use crate::job::expand_jobs;

/// Outcome of a successful regeneration pass.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Generated artifacts, in catalog order (base job before its
    /// animated sibling).
    pub artifacts: Vec<PathBuf>,
}

/// Owns one regeneration pass over a catalog.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Regenerate the full catalog.
    ///
    /// Fail-fast: the first configuration or compilation error aborts the
    /// remaining catalog. The intermediate file is deleted regardless of
    /// outcome before this returns.
    pub fn run(&self) -> Result<RunReport> {
        let _guard = IntermediateGuard {
            path: &self.config.intermediate_path,
        };
        self.generate()
    }

    fn generate(&self) -> Result<RunReport> {
        reset_dir(&self.config.generated_dir)?;

        let driver = CompilerDriver::new(&self.config);
        let mut report = RunReport::default();
        for descriptor in &self.config.catalog {
            // Jobs for one entry run back to back; every job contends for
            // the single intermediate path, so nothing may interleave.
            for job in expand_jobs(descriptor, &self.config)? {
                driver.compile(&job)?;
                annotate::stamp_file(&job.artifact_path)?;
                report.artifacts.push(job.artifact_path);
            }
        }

        log::info!("generated {} artifacts", report.artifacts.len());
        Ok(report)
    }

    /// Secondary mode: stamp every hand-authored shader/include file under
    /// the shader source tree, without compiling anything.
    pub fn stamp_sources(&self) -> Result<usize> {
        annotate::stamp_tree(&self.config.include_dir)
    }
}

/// Removes the shared intermediate artifact when dropped, on success and
/// failure alike.
struct IntermediateGuard<'a> {
    path: &'a Path,
}

impl Drop for IntermediateGuard<'_> {
    fn drop(&mut self) {
        if self.path.is_file() {
            if let Err(e) = std::fs::remove_file(self.path) {
                log::warn!(
                    "failed to remove intermediate file {}: {e}",
                    self.path.display()
                );
            }
        }
    }
}

/// Delete the directory tree if present, then recreate it empty.
fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        log::info!("cleaning folder {}", dir.display());
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}
