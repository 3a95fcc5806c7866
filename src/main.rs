//! Entry point for debugpy-launch.
use std::process::ExitCode;

use clap::Parser;
use debugpy_launch::{
    cli::{execute_cli_command, LaunchArgs, RunExit},
    lib::telemetry,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

fn run() -> Result<(), RunExit> {
    telemetry::init_tracing().map_err(RunExit::from_error)?;
    let args = LaunchArgs::parse();
    let command = args.into_command().map_err(RunExit::from_error)?;
    let output = execute_cli_command(command).map_err(RunExit::from_error)?;
    println!("{output}");
    Ok(())
}
