//! Command-line surface of the cleaner.
//!
//! Flags are parsed without environment fallback; the fallback is handled by
//! [`crate::config::ConfigResolver`] so that every option follows the same
//! flag, environment, default ordering.

use clap::Parser;

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

/// Delete GitLab CI pipelines older than a number of days from every visible project
#[derive(Parser, Debug, Default)]
#[command(name = "gitlab-pipeline-cleaner", version)]
#[command(
    about = "Delete GitLab CI pipelines older than a number of days",
    long_about = "Delete GitLab CI pipelines older than a number of days from every project \
                  visible to the token.\n\nEvery option except --dry-run can also be supplied \
                  through its environment variable: GITLAB_URL, GITLAB_TOKEN, USER_AGENT and \
                  OLDER_THAN. Flags take precedence over the environment."
)]
pub struct Cli {
    /// GitLab URL to call [env: GITLAB_URL]
    #[arg(short = 'u', long = "gitlab-url", value_name = "URL")]
    pub gitlab_url: Option<String>,

    /// GitLab token to use [env: GITLAB_TOKEN]
    #[arg(short = 't', long = "gitlab-token", value_name = "TOKEN")]
    pub gitlab_token: Option<String>,

    /// User-Agent sent to GitLab [env: USER_AGENT] [default: gitlab-pipeline-cleaner]
    #[arg(long = "user-agent", value_name = "AGENT")]
    pub user_agent: Option<String>,

    /// Report what would be deleted without deleting anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Pipelines not updated for more than this many days are deleted [env: OLDER_THAN]
    #[arg(short = 'd', long = "days", value_name = "DAYS")]
    pub days: Option<String>,
}
