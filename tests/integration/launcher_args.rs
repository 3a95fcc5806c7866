use std::{path::Path, thread};

use debugpy_launch::{
    build_launcher_args, lib::quoting::file_to_command_argument, DebugpyLauncher,
    RemoteDebugOptions,
};

const DEBUGGER_HOST: &str = "somehost";
const DEBUGGER_PORT: u16 = 12345;

fn debugger_path() -> String {
    Path::new("/opt/vscode-python")
        .join("pythonFiles")
        .join("dispatch_debugpy")
        .to_string_lossy()
        .into_owned()
}

#[test]
fn debug_launcher_args_no_wait() {
    let launcher = DebugpyLauncher::new("/opt/vscode-python");
    let args = launcher.launcher_args(&RemoteDebugOptions::new(
        DEBUGGER_HOST,
        DEBUGGER_PORT,
        false,
    ));

    let expected = vec![
        file_to_command_argument(&debugger_path()),
        "--listen".to_string(),
        format!("{DEBUGGER_HOST}:{DEBUGGER_PORT}"),
    ];
    assert_eq!(args, expected);
}

#[test]
fn debug_launcher_args_wait() {
    let launcher = DebugpyLauncher::new("/opt/vscode-python");
    let args = launcher.launcher_args(&RemoteDebugOptions::new(
        DEBUGGER_HOST,
        DEBUGGER_PORT,
        true,
    ));

    let expected = vec![
        file_to_command_argument(&debugger_path()),
        "--listen".to_string(),
        format!("{DEBUGGER_HOST}:{DEBUGGER_PORT}"),
        "--wait-for-client".to_string(),
    ];
    assert_eq!(args, expected);
}

#[test]
fn debugger_package_path() {
    let launcher = DebugpyLauncher::new("/opt/vscode-python");
    assert_eq!(launcher.package_path(), Path::new(&debugger_path()));
}

#[test]
fn free_function_matches_launcher_default() {
    let launcher = DebugpyLauncher::new("/opt/vscode-python");
    let options = RemoteDebugOptions::new(DEBUGGER_HOST, DEBUGGER_PORT, true);
    assert_eq!(
        build_launcher_args(&options, &debugger_path()),
        launcher.launcher_args(&options)
    );
}

#[test]
fn launcher_is_shareable_across_threads() {
    let launcher = DebugpyLauncher::new("/opt/vscode-python");
    let options = RemoteDebugOptions::new(DEBUGGER_HOST, DEBUGGER_PORT, false);
    let expected = launcher.launcher_args(&options);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| launcher.launcher_args(&options)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread completes"), expected);
        }
    });
}
