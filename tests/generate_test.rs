//! End-to-end generation runs against the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use opgen::generate::{run, GenSummary};
use opgen::{GenConfig, GenError};

/// Fresh scratch directory for one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("opgen-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wabt_opcode.def")
}

#[test]
fn test_run_writes_output() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = scratch_dir("writes");
    let output = dir.join("opcode.rs");
    fs::write(&output, "stale contents").unwrap();

    let config = GenConfig::default().with_input(fixture()).with_output(&output);
    let summary = run(&config).unwrap();
    assert_eq!(
        summary,
        GenSummary {
            rows: 48,
            retained: 43,
            dropped_vector: 2,
            dropped_prefixed: 3,
        }
    );

    let source = fs::read_to_string(&output).unwrap();
    assert!(source.starts_with("// GENERATED CODE - DO NOT EDIT"));
    assert!(source.contains("pub const I32_ADD "));
    assert!(source.contains("pub fn from_opcode(opc: u8) -> Option<&'static Op>"));
    assert!(!source.contains("stale contents"));
    assert!(!dir.join("opcode.rs.tmp").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_failed_run_leaves_output_untouched() {
    let dir = scratch_dir("untouched");
    let input = dir.join("dup.def");
    let output = dir.join("opcode.rs");
    fs::write(
        &input,
        "WABT_OPCODE(___, ___, ___, ___, 0, 0, 0x01, \"nop\")\n\
         WABT_OPCODE(___, ___, ___, ___, 0, 0, 0x01, \"nop2\")\n",
    )
    .unwrap();
    fs::write(&output, "previous table").unwrap();

    let config = GenConfig::default().with_input(&input).with_output(&output);
    assert!(matches!(run(&config), Err(GenError::DuplicateOpcode { code: 0x01, .. })));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous table");
    assert!(!dir.join("opcode.rs.tmp").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_input_is_resource_error() {
    let dir = scratch_dir("missing");
    let config = GenConfig::default()
        .with_input(dir.join("nope.def"))
        .with_output(dir.join("opcode.rs"));

    match run(&config) {
        Err(GenError::Resource { path, .. }) => assert_eq!(path, dir.join("nope.def")),
        other => panic!("expected resource error, got {other:?}"),
    }
    assert!(!dir.join("opcode.rs").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_unwritable_output_is_resource_error() {
    let dir = scratch_dir("unwritable");
    let config = GenConfig::default()
        .with_input(fixture())
        .with_output(dir.join("no/such/dir/opcode.rs"));

    assert!(matches!(run(&config), Err(GenError::Resource { .. })));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_check_only_does_not_write() {
    let dir = scratch_dir("check");
    let output = dir.join("opcode.rs");
    let config = GenConfig::default()
        .with_input(fixture())
        .with_output(&output)
        .check_only(true);

    assert_eq!(run(&config).unwrap().retained, 43);
    assert!(!output.exists());

    let _ = fs::remove_dir_all(&dir);
}
