#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod annotate;
pub mod catalog;
pub mod defines;
pub mod driver;
pub mod errors;
pub mod job;
pub mod naming;
pub mod pipeline;

pub use catalog::{PipelineConfig, ShaderDescriptor, ShaderKind};
pub use defines::ShaderDefines;
pub use driver::CompilerDriver;
pub use errors::{PipelineError, Result};
pub use job::{CompilationJob, expand_jobs};
pub use pipeline::{Pipeline, RunReport};
