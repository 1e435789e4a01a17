//! # Models
//!
//! Project and pipeline records as returned by the GitLab REST API.
//!
//! Only the fields the cleaner reads are modelled; GitLab sends many more and
//! serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a GitLab project.
///
/// # Examples
///
/// ```rust
/// use gitlab_client::models::Project;
///
/// let project = Project {
///     id: 42,
///     name: "Alpha".to_string(),
///     path_with_namespace: "group/alpha".to_string(),
///     web_url: None,
/// };
///
/// assert_eq!(project.name, "Alpha");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// The numeric project ID
    pub id: u64,
    /// The display name of the project
    pub name: String,
    /// The full path, including the namespace (e.g. `group/subgroup/project`)
    pub path_with_namespace: String,
    /// Link to the project in the GitLab web UI
    #[serde(default)]
    pub web_url: Option<String>,
}

/// Represents a CI pipeline belonging to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    /// The instance-wide pipeline ID
    pub id: u64,
    /// The ID of the project that owns the pipeline
    pub project_id: u64,
    /// The pipeline status (`success`, `failed`, `running`, ...)
    #[serde(default)]
    pub status: Option<String>,
    /// The branch or tag the pipeline ran for
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
    /// When the pipeline was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the pipeline was last updated
    pub updated_at: DateTime<Utc>,
}
