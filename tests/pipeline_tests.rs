//! Pipeline Integration Tests
//!
//! Runs the full orchestrator against stub `dxc` / `spirv-cross` shell
//! scripts placed in a temp project directory. Covers:
//! - Full successful regeneration: artifact count, stamping, cleanup
//! - Fail-fast on a mid-catalog stage-1 failure (stage 2 never invoked)
//! - Stage-2 failure reporting
//! - Destructive regeneration over stale output
//! - Animated-non-vertex rejection before any process spawn
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use shadergen::{Pipeline, PipelineConfig, PipelineError, ShaderDescriptor};

/// Stub stage-1 compiler: writes a fake SPIR-V blob to the `-Fo` target.
const DXC_OK: &str = r#"#!/bin/sh
out=
prev=
for a in "$@"; do
  if [ "$prev" = "-Fo" ]; then out="$a"; fi
  prev="$a"
done
printf 'SPV' > "$out"
"#;

/// Stub stage-2 cross-compiler: copies the intermediate to `--output`.
const CROSS_OK: &str = r#"#!/bin/sh
in="$1"
out=
prev=
for a in "$@"; do
  if [ "$prev" = "--output" ]; then out="$a"; fi
  prev="$a"
done
cp "$in" "$out"
"#;

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

/// Lay out a project dir with stub tools and return its config.
fn setup(
    dir: &Path,
    dxc_body: &str,
    cross_body: &str,
    catalog: Vec<ShaderDescriptor>,
) -> PipelineConfig {
    fs::create_dir_all(dir.join("bin")).unwrap();
    fs::create_dir_all(dir.join("source/shader/hlsl")).unwrap();
    write_script(&dir.join("bin/dxc"), dxc_body);
    write_script(&dir.join("bin/spirv-cross"), cross_body);

    let mut config = PipelineConfig::for_project(dir);
    config.intermediate_path = dir.join("tmp.spv");
    config.catalog = catalog;
    config
}

/// A stub that appends its full argv to `log` before running `body`.
fn logging_stub(log: &Path, body: &str) -> String {
    let rest = body.trim_start_matches("#!/bin/sh\n");
    format!("#!/bin/sh\necho \"$@\" >> \"{}\"\n{rest}", log.display())
}

fn header_of(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .next()
        .unwrap()
        .to_string()
}

// ============================================================================
// Successful runs
// ============================================================================

#[test]
fn full_run_generates_and_stamps_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(
        dir.path(),
        DXC_OK,
        CROSS_OK,
        vec![
            ShaderDescriptor::new("bloom_setup.comp", false),
            ShaderDescriptor::new("shadowmap_point.vert", true),
        ],
    );
    let generated_dir = config.generated_dir.clone();
    let intermediate = config.intermediate_path.clone();

    let report = Pipeline::new(config).run().unwrap();

    // One plain entry + one animated vertex = 3 artifacts, base before variant.
    let names: Vec<_> = report
        .artifacts
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "bloom_setup.comp.glsl",
            "shadowmap_point.vert.glsl",
            "animated_shadowmap_point.vert.glsl",
        ]
    );

    for artifact in &report.artifacts {
        assert!(artifact.starts_with(&generated_dir));
        assert!(artifact.is_file());
        let expected = format!(
            "/// File: {}",
            artifact.file_name().unwrap().to_string_lossy()
        );
        assert_eq!(header_of(artifact), expected);
    }

    assert!(
        !intermediate.exists(),
        "Shared intermediate must be removed after a successful run"
    );
}

#[test]
fn animated_variant_gets_extra_define() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("dxc.log");
    let dxc = logging_stub(&log, DXC_OK);
    let config = setup(
        dir.path(),
        &dxc,
        CROSS_OK,
        vec![ShaderDescriptor::new("shadowmap_point.vert", true)],
    );

    Pipeline::new(config).run().unwrap();

    let invocations = fs::read_to_string(&log).unwrap();
    let lines: Vec<_> = invocations.lines().collect();
    assert_eq!(lines.len(), 2, "Base job then animated variant");
    assert!(!lines[0].contains("HAS_ANIMATION=1"));
    assert!(lines[1].contains("HAS_ANIMATION=1"));
    for line in &lines {
        assert!(line.contains("HLSL_LANG=1"));
        assert!(line.contains("HLSL_LANG_D3D11=1"));
        assert!(line.contains("-T vs_6_0"));
        assert!(line.contains("-E main"));
    }
}

#[test]
fn regeneration_removes_stale_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(
        dir.path(),
        DXC_OK,
        CROSS_OK,
        vec![ShaderDescriptor::new("bloom_setup.comp", false)],
    );
    let generated_dir = config.generated_dir.clone();

    fs::create_dir_all(&generated_dir).unwrap();
    let stale = generated_dir.join("stale.glsl");
    fs::write(&stale, "left over\n").unwrap();

    Pipeline::new(config).run().unwrap();

    assert!(!stale.exists(), "Stale output must not survive a run");
    assert!(generated_dir.join("bloom_setup.comp.glsl").is_file());
}

// ============================================================================
// Failure paths
// ============================================================================

#[test]
fn stage1_failure_aborts_catalog_and_skips_stage2() {
    let dir = tempfile::tempdir().unwrap();
    let cross_log = dir.path().join("cross.log");

    // Stage 1 fails only for the second catalog entry.
    let dxc_body = format!(
        "#!/bin/sh\ncase \"$1\" in *broken*) exit 1 ;; esac\n{}",
        DXC_OK.trim_start_matches("#!/bin/sh\n")
    );
    let cross_body = logging_stub(&cross_log, CROSS_OK);
    let config = setup(
        dir.path(),
        &dxc_body,
        &cross_body,
        vec![
            ShaderDescriptor::new("bloom_setup.comp", false),
            ShaderDescriptor::new("broken.comp", false),
            ShaderDescriptor::new("particle_kickoff.comp", false),
        ],
    );
    let generated_dir = config.generated_dir.clone();
    let intermediate = config.intermediate_path.clone();

    let err = Pipeline::new(config).run().unwrap_err();
    match err {
        PipelineError::Compilation { artifact, command } => {
            assert_eq!(artifact, "broken.comp.glsl");
            assert!(command.contains("broken.comp.hlsl"));
        }
        other => panic!("Expected compilation error, got {other:?}"),
    }

    // First entry completed and was stamped.
    let first = generated_dir.join("bloom_setup.comp.glsl");
    assert!(first.is_file());
    assert_eq!(header_of(&first), "/// File: bloom_setup.comp.glsl");

    // Failed and unreached entries produced nothing.
    assert!(!generated_dir.join("broken.comp.glsl").exists());
    assert!(!generated_dir.join("particle_kickoff.comp.glsl").exists());

    // Stage 2 ran exactly once (for the first entry only).
    let cross_invocations = fs::read_to_string(&cross_log).unwrap();
    assert_eq!(cross_invocations.lines().count(), 1);

    assert!(
        !intermediate.exists(),
        "Shared intermediate must be removed after a failed run"
    );
}

#[test]
fn stage2_failure_reports_command_and_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(
        dir.path(),
        DXC_OK,
        "#!/bin/sh\nexit 1\n",
        vec![ShaderDescriptor::new("bloom_setup.comp", false)],
    );
    let generated_dir = config.generated_dir.clone();
    let intermediate = config.intermediate_path.clone();

    let err = Pipeline::new(config).run().unwrap_err();
    match err {
        PipelineError::Compilation { artifact, command } => {
            assert_eq!(artifact, "bloom_setup.comp.glsl");
            assert!(command.contains("--version 450"));
        }
        other => panic!("Expected compilation error, got {other:?}"),
    }

    assert!(!generated_dir.join("bloom_setup.comp.glsl").exists());
    assert!(!intermediate.exists());
}

#[test]
fn animated_non_vertex_spawns_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let dxc_log = dir.path().join("dxc.log");
    let dxc_body = logging_stub(&dxc_log, DXC_OK);
    let config = setup(
        dir.path(),
        &dxc_body,
        CROSS_OK,
        vec![ShaderDescriptor::new("bloom_setup.comp", true)],
    );

    let err = Pipeline::new(config).run().unwrap_err();
    assert!(matches!(err, PipelineError::AnimatedNonVertex(_)));
    assert!(
        !dxc_log.exists(),
        "No compiler may be spawned for a misconfigured entry"
    );
}

#[test]
fn unknown_kind_marker_spawns_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let dxc_log = dir.path().join("dxc.log");
    let dxc_body = logging_stub(&dxc_log, DXC_OK);
    let config = setup(
        dir.path(),
        &dxc_body,
        CROSS_OK,
        vec![ShaderDescriptor::new("sky.frag", false)],
    );

    let err = Pipeline::new(config).run().unwrap_err();
    assert!(matches!(err, PipelineError::UnknownShaderKind(_)));
    assert!(!dxc_log.exists());
}

// ============================================================================
// Source stamping mode
// ============================================================================

#[test]
fn stamp_sources_walks_shader_tree() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), DXC_OK, CROSS_OK, Vec::new());
    let shader_dir = config.include_dir.clone();

    fs::write(shader_dir.join("hlsl").join("common.hlsl"), "cbuffer {}\n").unwrap();
    fs::write(shader_dir.join("cbuffer.h"), "#pragma once\n").unwrap();
    fs::write(shader_dir.join("README.md"), "docs\n").unwrap();

    let stamped = Pipeline::new(config).stamp_sources().unwrap();
    assert_eq!(stamped, 2);

    assert_eq!(
        header_of(&shader_dir.join("hlsl").join("common.hlsl")),
        "/// File: common.hlsl"
    );
    assert_eq!(
        header_of(&shader_dir.join("cbuffer.h")),
        "/// File: cbuffer.h"
    );
    assert_eq!(
        fs::read_to_string(shader_dir.join("README.md")).unwrap(),
        "docs\n"
    );
}

// ============================================================================
// Default catalog sanity
// ============================================================================

#[test]
fn default_catalog_expands_to_ten_jobs() {
    let config = PipelineConfig::for_project("/proj");
    let jobs: Vec<_> = config
        .catalog
        .iter()
        .map(|d| shadergen::expand_jobs(d, &config).unwrap())
        .collect();

    let total: usize = jobs.iter().map(Vec::len).sum();
    assert_eq!(total, 10, "Nine entries, one of them animated");

    // Only the shadow-map vertex shader doubles up.
    assert_eq!(jobs[0].len(), 2);
    assert!(jobs[1..].iter().all(|j| j.len() == 1));

    let animated_artifact: PathBuf = jobs[0][1].artifact_path.clone();
    assert_eq!(
        animated_artifact.file_name().unwrap(),
        "animated_shadowmap_point.vert.glsl"
    );
}
