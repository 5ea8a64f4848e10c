//! CLI entry point.
//!
//! `shadergen [generate] [PROJECT_DIR] [--manifest FILE]` regenerates the
//! GLSL catalog; `shadergen stamp [PROJECT_DIR]` stamps provenance headers
//! onto the hand-authored shader sources instead.

use std::path::PathBuf;

use anyhow::{Context, bail};

use shadergen::{Pipeline, PipelineConfig};

enum Mode {
    Generate,
    Stamp,
}

struct Args {
    mode: Mode,
    project_dir: PathBuf,
    manifest: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut mode = Mode::Generate;
    let mut project_dir = None;
    let mut manifest = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "generate" => mode = Mode::Generate,
            "stamp" => mode = Mode::Stamp,
            "--manifest" => {
                let value = args.next().context("--manifest requires a file path")?;
                manifest = Some(PathBuf::from(value));
            }
            "-h" | "--help" => {
                println!("usage: shadergen [generate|stamp] [PROJECT_DIR] [--manifest FILE]");
                std::process::exit(0);
            }
            other if !other.starts_with('-') && project_dir.is_none() => {
                project_dir = Some(PathBuf::from(other));
            }
            other => bail!("unrecognized argument: {other}"),
        }
    }

    let project_dir = match project_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    Ok(Args {
        mode,
        project_dir,
        manifest,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let config = match &args.manifest {
        Some(manifest) => PipelineConfig::from_manifest(&args.project_dir, manifest)?,
        None => PipelineConfig::for_project(&args.project_dir),
    };
    let pipeline = Pipeline::new(config);

    match args.mode {
        Mode::Generate => {
            let report = pipeline.run()?;
            for artifact in &report.artifacts {
                println!("file \"{}\" generated", artifact.display());
            }
        }
        Mode::Stamp => {
            let stamped = pipeline.stamp_sources()?;
            println!("stamped {stamped} files");
        }
    }
    Ok(())
}
