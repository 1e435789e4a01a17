use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Exit status for a run that completed.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status for a run aborted by a GitLab or output failure.
pub const EXIT_FAILURE: i32 = 1;

/// Exit status for a run rejected before any network activity.
pub const EXIT_USAGE: i32 = 2;

/// Errors that can occur while resolving configuration or sweeping pipelines.
#[derive(Error, Debug)]
pub enum Error {
    /// A required option was supplied neither as a flag nor through its environment variable.
    #[error("Missing required option {option}: pass {flag} or set {env}")]
    MissingOption {
        option: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    /// An option was supplied but its value cannot be used.
    #[error("Invalid value '{value}' for {option}: {reason}")]
    InvalidOption {
        option: &'static str,
        value: String,
        reason: String,
    },

    /// A call to GitLab failed. The sweep stops at the first such failure.
    #[error("{context}: {source}")]
    Client {
        context: String,
        #[source]
        source: gitlab_client::Error,
    },

    /// Writing a progress line failed.
    #[error("Failed to write progress report: {0}")]
    Output(#[from] io::Error),
}

impl Error {
    /// Creates an `Error::Client` describing what was being attempted.
    pub fn client(context: impl Into<String>, source: gitlab_client::Error) -> Self {
        Self::Client {
            context: context.into(),
            source,
        }
    }

    /// Whether the error was raised while resolving configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingOption { .. } | Error::InvalidOption { .. }
        )
    }

    /// The process exit status that reports this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_configuration() {
            EXIT_USAGE
        } else {
            EXIT_FAILURE
        }
    }
}
