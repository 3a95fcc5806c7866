use std::fs;

use tempfile::tempdir;

use crate::common::{fixture, run_cli, run_cli_with_env, stdout_of};

#[test]
fn args_command_prints_json_array() {
    let temp = tempdir().expect("can create temp directory");
    let output = run_cli(
        &[
            "args",
            "--install-root",
            "/opt/ext",
            "--host",
            "somehost",
            "--port",
            "12345",
        ],
        temp.path(),
    )
    .expect("binary runs");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let args: Vec<String> = serde_json::from_str(&stdout_of(&output)).expect("stdout is JSON");
    assert_eq!(
        args,
        vec![
            "/opt/ext/pythonFiles/dispatch_debugpy",
            "--listen",
            "somehost:12345",
        ]
    );
}

#[test]
fn args_command_without_config_uses_builtin_defaults() {
    let temp = tempdir().expect("can create temp directory");
    let output = run_cli(&["args", "--format", "lines", "--wait-for-client"], temp.path())
        .expect("binary runs");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with("pythonFiles/dispatch_debugpy"), "line: {}", lines[0]);
    assert_eq!(lines[1..], ["--listen", "127.0.0.1:5678", "--wait-for-client"]);
}

#[test]
fn path_command_reads_install_root_from_config() {
    let temp = tempdir().expect("can create temp directory");
    let config = fixture("tests/fixtures/config_valid.toml");
    let output = run_cli(
        &["path", "--config", config.to_str().expect("utf-8 path")],
        temp.path(),
    )
    .expect("binary runs");

    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "/opt/vscode-python/pythonFiles/dispatch_debugpy"
    );
}

#[test]
fn lib_dir_command_selects_legacy_directory() {
    let temp = tempdir().expect("can create temp directory");
    let output = run_cli(
        &["lib-dir", "--install-root", "/opt/ext", "--python-version", "3.6"],
        temp.path(),
    )
    .expect("binary runs");

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "/opt/ext/pythonFiles/lib/python36");
}

#[test]
fn invalid_config_exits_with_failure() {
    let temp = tempdir().expect("can create temp directory");
    let config = fixture("tests/fixtures/config_relative_root.toml");
    let output = run_cli(
        &["path", "--config", config.to_str().expect("utf-8 path")],
        temp.path(),
    )
    .expect("binary runs");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("install.root"), "stderr: {stderr}");
}

#[test]
fn config_command_prints_resolved_toml() {
    let temp = tempdir().expect("can create temp directory");
    let output = run_cli(&["config"], temp.path()).expect("binary runs");

    assert!(output.status.success());
    let rendered: toml::Value = toml::from_str(&stdout_of(&output)).expect("stdout is TOML");
    assert_eq!(rendered["debugger"]["port"].as_integer(), Some(5678));
    assert_eq!(rendered["debugpy"]["legacy_version"].as_str(), Some("1.5.1"));
}

#[test]
fn path_command_reads_config_from_working_directory() {
    let temp = tempdir().expect("can create temp directory");
    fs::write(
        temp.path().join("debugpy-launch.toml"),
        "[install]\nroot = \"/opt/from-cwd\"\n",
    )
    .expect("can write config");

    let output = run_cli(&["path"], temp.path()).expect("binary runs");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout_of(&output),
        "/opt/from-cwd/pythonFiles/dispatch_debugpy"
    );
}

#[test]
fn path_command_falls_back_to_install_root_env() {
    let temp = tempdir().expect("can create temp directory");
    let output = run_cli_with_env(
        &["path"],
        temp.path(),
        &[("DEBUGPY_LAUNCH_ROOT", "/opt/from-env")],
    )
    .expect("binary runs");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout_of(&output),
        "/opt/from-env/pythonFiles/dispatch_debugpy"
    );
}

#[test]
fn config_root_wins_over_install_root_env() {
    let temp = tempdir().expect("can create temp directory");
    let config = fixture("tests/fixtures/config_valid.toml");
    let output = run_cli_with_env(
        &["path", "--config", config.to_str().expect("utf-8 path")],
        temp.path(),
        &[("DEBUGPY_LAUNCH_ROOT", "/opt/from-env")],
    )
    .expect("binary runs");

    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "/opt/vscode-python/pythonFiles/dispatch_debugpy"
    );
}
