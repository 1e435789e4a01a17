//! GitLab pipeline retention utilities.
//!
//! This crate removes CI pipelines that have not been updated for a configurable
//! number of days from every project visible to a GitLab access token. It can be
//! used programmatically (see [`PipelineCleanup`]) or via the
//! `gitlab-pipeline-cleaner` binary.

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod errors;

pub use cleanup::{PipelineCleanup, SweepSummary};
pub use config::{ConfigResolver, RunConfig};
pub use errors::Error;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV_VAR: &str = "PIPELINE_CLEANER_LOG";

/// Initialize logging for cleanup runs.
///
/// Log records go to stderr so they never interleave with the progress report
/// on stdout. Only warnings and errors are shown unless `PIPELINE_CLEANER_LOG`
/// says otherwise.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
