//! Telemetry initialization and bundle install logging helpers.

use std::{path::Path, time::Instant};

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` and format developer logs.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of a wheel install target.
pub struct InstallSpan {
    span: Span,
    started_at: Instant,
}

impl InstallSpan {
    /// Start a span for one install target.
    pub fn start(destination: &Path, version: &str) -> Self {
        let span = info_span!(
            target: "debugpy_launch::bundle",
            "install_target",
            destination = %destination.display(),
            version
        );
        Self {
            span,
            started_at: Instant::now(),
        }
    }

    /// Close the span while recording how many wheels and files were installed.
    pub fn finish(self, wheels: usize, files: usize) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "debugpy_launch::bundle",
            wheels = wheels,
            files = files,
            elapsed_ms = elapsed_ms,
            "Installed debugpy wheels"
        );
    }
}
