//! Delete CI pipelines older than a number of days from a GitLab instance.
//!
//! Usage:
//!   gitlab-pipeline-cleaner -u <url> -t <token> -d <days> [--dry-run] [--user-agent <agent>]
//!
//! Every option except `--dry-run` falls back to an environment variable:
//! GITLAB_URL, GITLAB_TOKEN, USER_AGENT and OLDER_THAN.

use std::io;

use clap::{CommandFactory, Parser};
use gitlab_client::GitLabClient;
use pipeline_cleaner::cli::Cli;
use pipeline_cleaner::errors::EXIT_SUCCESS;
use pipeline_cleaner::{ConfigResolver, Error, PipelineCleanup, SweepSummary};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    pipeline_cleaner::init_logging();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(summary) => {
            println!(
                "Done: scanned {} projects, found {} pipelines, deleted {}",
                summary.projects_scanned, summary.pipelines_found, summary.pipelines_deleted
            );
            std::process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_configuration() {
                eprintln!();
                eprintln!("{}", Cli::command().render_usage());
                eprintln!("For more information, try '--help'.");
            }
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: &Cli) -> Result<SweepSummary, Error> {
    // Resolve everything before any network activity.
    let config = ConfigResolver::standard(cli).resolve()?;

    let client = GitLabClient::new(&config.endpoint, &config.credential, &config.agent_label)
        .map_err(|e| Error::client("Failed to create GitLab client", e))?;

    let cleanup = PipelineCleanup::new(client, config);
    let mut stdout = io::stdout().lock();
    cleanup.sweep(&mut stdout).await
}
