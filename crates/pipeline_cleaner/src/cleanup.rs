//! Retention sweep over every project visible to the token.
//!
//! The sweep is strictly sequential: a project's pipelines are listed only
//! after the previous project is finished, and pipelines are deleted one at a
//! time in the order GitLab returned them. The first failed call to GitLab
//! ends the sweep.

use std::io::Write;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use gitlab_client::PipelineClient;
use tracing::{debug, error, info};

use crate::config::RunConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "cleanup_tests.rs"]
mod tests;

/// Totals gathered over one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Projects the sweep looked at
    pub projects_scanned: usize,
    /// Projects without any pipeline older than the cutoff
    pub projects_skipped: usize,
    /// Pipelines older than the cutoff, across all projects
    pub pipelines_found: usize,
    /// Pipelines actually deleted; always zero for a dry run
    pub pipelines_deleted: usize,
    /// Whether the sweep ran in report-only mode
    pub dry_run: bool,
}

/// Deletes pipelines older than the configured age from every visible project.
pub struct PipelineCleanup<C> {
    client: C,
    config: RunConfig,
}

impl<C: PipelineClient> PipelineCleanup<C> {
    /// Create a new cleanup instance.
    ///
    /// # Arguments
    ///
    /// * `client` - Authenticated GitLab client
    /// * `config` - Resolved run configuration
    pub fn new(client: C, config: RunConfig) -> Self {
        Self { client, config }
    }

    /// The client the sweep talks to.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The configuration the sweep runs with.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs the sweep with the cutoff measured from the current time.
    ///
    /// Progress lines are written to `out`.
    pub async fn sweep<W: Write>(&self, out: &mut W) -> Result<SweepSummary, Error> {
        self.sweep_at(Utc::now(), out).await
    }

    /// Runs the sweep with the cutoff measured from `now`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Client` for the first failed GitLab call and
    /// `Error::Output` if a progress line cannot be written. Projects after
    /// the failing one are not processed.
    pub async fn sweep_at<W: Write>(
        &self,
        now: DateTime<Utc>,
        out: &mut W,
    ) -> Result<SweepSummary, Error> {
        let cutoff = self.config.cutoff(now);
        let mut summary = SweepSummary {
            dry_run: self.config.dry_run,
            ..SweepSummary::default()
        };

        info!(
            endpoint = %self.config.endpoint,
            max_age_days = self.config.max_age_days,
            cutoff = %cutoff,
            dry_run = self.config.dry_run,
            "Starting pipeline cleanup"
        );

        let mut projects = self.client.list_projects();
        while let Some(project) = projects.next().await {
            let project = project.map_err(|e| {
                error!(error = %e, "Failed to list projects");
                Error::client("Failed to list projects", e)
            })?;
            summary.projects_scanned += 1;

            writeln!(out, "[x] Handling {}...", project.name)?;
            debug!(
                project_id = project.id,
                project = project.path_with_namespace.as_str(),
                "Handling project"
            );

            let pipelines = self
                .client
                .list_pipelines(&project, cutoff)
                .await
                .map_err(|e| {
                    error!(
                        project_id = project.id,
                        project = project.path_with_namespace.as_str(),
                        error = %e,
                        "Failed to list pipelines"
                    );
                    Error::client(
                        format!(
                            "Failed to list pipelines of project {}",
                            project.path_with_namespace
                        ),
                        e,
                    )
                })?;

            if pipelines.is_empty() {
                writeln!(out, " [-] Skipping project because no pipeline found")?;
                summary.projects_skipped += 1;
                continue;
            }

            writeln!(
                out,
                " [-] Found {} pipelines older than {} days to delete",
                pipelines.len(),
                self.config.max_age_days
            )?;
            summary.pipelines_found += pipelines.len();

            if self.config.dry_run {
                writeln!(out, "  [!] dry run mode enabled won't delete")?;
                continue;
            }

            for pipeline in &pipelines {
                self.client.delete_pipeline(pipeline).await.map_err(|e| {
                    error!(
                        project_id = project.id,
                        pipeline_id = pipeline.id,
                        error = %e,
                        "Failed to delete pipeline"
                    );
                    Error::client(
                        format!(
                            "Failed to delete pipeline {} of project {}",
                            pipeline.id, project.path_with_namespace
                        ),
                        e,
                    )
                })?;
                summary.pipelines_deleted += 1;
                debug!(
                    project_id = project.id,
                    pipeline_id = pipeline.id,
                    updated_at = %pipeline.updated_at,
                    "Deleted pipeline"
                );
            }
        }

        info!(
            projects_scanned = summary.projects_scanned,
            projects_skipped = summary.projects_skipped,
            pipelines_found = summary.pipelines_found,
            pipelines_deleted = summary.pipelines_deleted,
            dry_run = summary.dry_run,
            "Cleanup completed"
        );

        Ok(summary)
    }
}
