//! Library crate root re-exporting the launcher, bundle, config and CLI modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod bundle;
pub mod cli;
pub mod config;
pub mod launcher;

pub use launcher::{build_launcher_args, DebugpyLauncher, RemoteDebugOptions};
