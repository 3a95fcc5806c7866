use std::{
    io::{Cursor, Write},
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use zip::{write::FileOptions, ZipWriter};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_debugpy-launch");

pub fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Run the binary with a clean configuration environment.
pub fn run_cli(args: &[&str], cwd: &Path) -> Result<Output> {
    run_cli_with_env(args, cwd, &[])
}

/// Run the binary with a clean configuration environment plus `envs`.
pub fn run_cli_with_env(args: &[&str], cwd: &Path, envs: &[(&str, &str)]) -> Result<Output> {
    let mut command = Command::new(BINARY_PATH);
    command
        .args(args)
        .current_dir(cwd)
        .env_remove("DEBUGPY_LAUNCH_CONFIG")
        .env_remove("DEBUGPY_LAUNCH_ROOT")
        .env("RUST_LOG", "warn");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().context("failed to run debugpy-launch")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

/// Build an in-memory wheel containing the given entries.
pub fn wheel_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, FileOptions::default())
            .expect("can start zip entry");
        writer
            .write_all(content.as_bytes())
            .expect("can write zip entry");
    }
    writer.finish().expect("can finish zip").into_inner()
}
