//! Shared library modules providing error types, path and quoting helpers, and telemetry initialization.

pub mod errors;
pub mod paths;
pub mod quoting;
pub mod telemetry;
