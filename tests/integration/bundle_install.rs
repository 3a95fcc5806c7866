use std::fs;

use debugpy_launch::bundle::{
    install_plan, sha256_hex, DispatchLayout, InstallPlan, PackageIndex, PythonVersion,
};
use debugpy_launch::config::DebugpySection;
use tempfile::tempdir;

use crate::common::{fixture, run_cli, stdout_of, wheel_bytes};

const CURRENT_WHEEL: &str = "debugpy-1.6.7-cp310-cp310-manylinux_2_17_x86_64.manylinux2014_x86_64.whl";
const LEGACY_WHEEL: &str = "debugpy-1.5.1-cp39-cp39-manylinux_2_5_x86_64.manylinux1_x86_64.manylinux_2_12_x86_64.manylinux2010_x86_64.whl";

fn write_wheels(dir: &std::path::Path) {
    fs::create_dir_all(dir).expect("can create wheels directory");
    fs::write(
        dir.join(CURRENT_WHEEL),
        wheel_bytes(&[
            ("debugpy/__init__.py", "current"),
            ("debugpy-1.6.7.dist-info/RECORD", "record"),
        ]),
    )
    .expect("can write current wheel");
    fs::write(
        dir.join(LEGACY_WHEEL),
        wheel_bytes(&[("debugpy/__init__.py", "legacy")]),
    )
    .expect("can write legacy wheel");
}

#[test]
fn default_plan_installs_both_library_directories() {
    let temp = tempdir().expect("can create temp directory");
    let root = temp.path().join("ext");
    let wheels = temp.path().join("wheels");
    write_wheels(&wheels);

    let index = PackageIndex::load(&fixture("tests/fixtures/pypi_debugpy.json"))
        .expect("fixture index loads");
    let layout = DispatchLayout::new(&root);
    let plan = InstallPlan::build(&index, &layout, &DebugpySection::default())
        .expect("default plan builds");
    let installed = install_plan(&plan, &wheels).expect("install succeeds");

    assert_eq!(installed.len(), 2);
    let current = layout.library_dir(PythonVersion::new(3, 11)).join("debugpy/__init__.py");
    let legacy = layout.library_dir(PythonVersion::new(3, 6)).join("debugpy/__init__.py");
    assert_eq!(fs::read_to_string(current).expect("current installed"), "current");
    assert_eq!(fs::read_to_string(legacy).expect("legacy installed"), "legacy");
    assert!(!layout.current_lib_dir().join("debugpy-1.6.7.dist-info").exists());
}

#[test]
fn install_command_reports_installed_targets() {
    let temp = tempdir().expect("can create temp directory");
    let root = temp.path().join("ext");
    let wheels = temp.path().join("wheels");
    write_wheels(&wheels);
    let index = fixture("tests/fixtures/pypi_debugpy.json");

    let output = run_cli(
        &[
            "install",
            "--install-root",
            root.to_str().expect("utf-8 path"),
            "--index",
            index.to_str().expect("utf-8 path"),
            "--wheels",
            wheels.to_str().expect("utf-8 path"),
        ],
        temp.path(),
    )
    .expect("binary runs");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let payload: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("stdout is JSON");
    assert_eq!(payload["status"], "installed");
    assert_eq!(payload["wheels"], 2);
    assert_eq!(payload["targets"][1]["version"], "1.5.1");
}

#[test]
fn install_command_fails_when_wheel_is_missing() {
    let temp = tempdir().expect("can create temp directory");
    let wheels = temp.path().join("empty");
    fs::create_dir_all(&wheels).expect("can create wheels directory");
    let index = fixture("tests/fixtures/pypi_debugpy.json");

    let output = run_cli(
        &[
            "install",
            "--install-root",
            temp.path().to_str().expect("utf-8 path"),
            "--index",
            index.to_str().expect("utf-8 path"),
            "--wheels",
            wheels.to_str().expect("utf-8 path"),
        ],
        temp.path(),
    )
    .expect("binary runs");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains(CURRENT_WHEEL));
}

#[test]
fn digest_helper_matches_sha256() {
    assert_eq!(
        sha256_hex(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}
