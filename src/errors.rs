//! Error Types
//!
//! This module defines the error types used throughout the pipeline.
//!
//! # Overview
//!
//! The main error type [`PipelineError`] covers all failure modes including:
//! - Catalog configuration errors (unknown shader kind, invalid animated flag)
//! - External compiler failures (DXC or SPIRV-Cross exiting non-zero)
//! - Manifest and filesystem errors
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, PipelineError>`.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the shader pipeline.
///
/// Configuration variants are raised before any external process is
/// spawned; compilation variants carry the attempted command line so a
/// failed invocation can be reproduced by hand.
#[derive(Error, Debug)]
pub enum PipelineError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// The source path's trailing marker is not a recognized shader kind.
    #[error("Unknown shader type \"{0}\"")]
    UnknownShaderKind(PathBuf),

    /// A descriptor was flagged `animated` but is not a vertex shader.
    #[error("\"{0}\" is not vertex shader")]
    AnimatedNonVertex(PathBuf),

    /// The catalog manifest could not be parsed.
    #[error("Manifest parse error: {0}")]
    ManifestParse(#[from] toml::de::Error),

    // ========================================================================
    // Compilation Errors
    // ========================================================================
    /// An external compiler stage exited non-zero.
    #[error("Failed to generate \"{artifact}\" (running: {command})")]
    Compilation {
        /// The rendered command line that was attempted.
        command: String,
        /// The artifact the failed job was supposed to produce.
        artifact: String,
    },

    /// An external compiler binary could not be spawned at all.
    #[error("Failed to spawn \"{tool}\": {source}")]
    ToolSpawn {
        /// Path of the tool that failed to launch.
        tool: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, PipelineError>`.
pub type Result<T> = std::result::Result<T, PipelineError>;
