//! Run configuration and the layered resolver that produces it.
//!
//! Each option is looked up in an ordered list of [`ConfigSource`] providers:
//! command-line flags first, then environment variables, then literal
//! defaults. The first provider that returns a non-empty value wins.

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use tracing::debug;
use url::Url;

use crate::cli::Cli;
use crate::errors::Error;

/// User-Agent sent to GitLab when none is configured.
pub const DEFAULT_USER_AGENT: &str = "gitlab-pipeline-cleaner";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// The options the cleaner recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Endpoint,
    Credential,
    AgentLabel,
    DryRun,
    MaxAgeDays,
}

impl ConfigKey {
    /// Name used in log records and error messages.
    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::Endpoint => "gitlab-url",
            ConfigKey::Credential => "gitlab-token",
            ConfigKey::AgentLabel => "user-agent",
            ConfigKey::DryRun => "dry-run",
            ConfigKey::MaxAgeDays => "days",
        }
    }

    /// The long command-line flag for the option.
    pub fn flag(self) -> &'static str {
        match self {
            ConfigKey::Endpoint => "--gitlab-url",
            ConfigKey::Credential => "--gitlab-token",
            ConfigKey::AgentLabel => "--user-agent",
            ConfigKey::DryRun => "--dry-run",
            ConfigKey::MaxAgeDays => "--days",
        }
    }

    /// The environment variable consulted when the flag is absent.
    pub fn env_var(self) -> Option<&'static str> {
        match self {
            ConfigKey::Endpoint => Some("GITLAB_URL"),
            ConfigKey::Credential => Some("GITLAB_TOKEN"),
            ConfigKey::AgentLabel => Some("USER_AGENT"),
            ConfigKey::DryRun => None,
            ConfigKey::MaxAgeDays => Some("OLDER_THAN"),
        }
    }
}

/// A provider of raw option values.
pub trait ConfigSource {
    /// Short name of the provider, recorded when it supplies a value.
    fn name(&self) -> &'static str;

    /// The raw value for `key`, if this provider has one.
    fn value(&self, key: ConfigKey) -> Option<String>;
}

/// Values given explicitly on the command line.
pub struct FlagSource<'a> {
    cli: &'a Cli,
}

impl<'a> FlagSource<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self { cli }
    }
}

impl ConfigSource for FlagSource<'_> {
    fn name(&self) -> &'static str {
        "flag"
    }

    fn value(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::Endpoint => self.cli.gitlab_url.clone(),
            ConfigKey::Credential => self.cli.gitlab_token.clone(),
            ConfigKey::AgentLabel => self.cli.user_agent.clone(),
            // An absent switch means "not set here", not "false".
            ConfigKey::DryRun => self.cli.dry_run.then(|| "true".to_string()),
            ConfigKey::MaxAgeDays => self.cli.days.clone(),
        }
    }
}

/// Values read from environment variables.
///
/// The lookup function is injectable so that tests do not have to mutate the
/// process environment.
pub struct EnvSource {
    lookup: Box<dyn Fn(&str) -> Option<String>>,
}

impl EnvSource {
    /// Reads from the environment of the current process.
    pub fn process() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String> + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }
}

impl ConfigSource for EnvSource {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn value(&self, key: ConfigKey) -> Option<String> {
        key.env_var().and_then(|name| (self.lookup)(name))
    }
}

/// Literal defaults for the optional settings.
pub struct DefaultSource;

impl ConfigSource for DefaultSource {
    fn name(&self) -> &'static str {
        "default"
    }

    fn value(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::AgentLabel => Some(DEFAULT_USER_AGENT.to_string()),
            ConfigKey::DryRun => Some("false".to_string()),
            ConfigKey::Endpoint | ConfigKey::Credential | ConfigKey::MaxAgeDays => None,
        }
    }
}

/// Effective parameters of one cleanup run.
#[derive(Debug)]
pub struct RunConfig {
    /// Root URL of the GitLab instance
    pub endpoint: Url,
    /// Access token; redacted in `Debug` output
    pub credential: SecretString,
    /// User-Agent sent with every request
    pub agent_label: String,
    /// Report eligible pipelines without deleting them
    pub dry_run: bool,
    /// Pipelines not updated for more than this many days are eligible
    pub max_age_days: u32,
}

impl RunConfig {
    /// The timestamp before which a pipeline's last update makes it eligible for deletion.
    ///
    /// Falls back to the Unix epoch when the threshold reaches further back
    /// than the calendar can represent.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(Duration::days(i64::from(self.max_age_days)))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Resolves a [`RunConfig`] from an ordered list of sources.
pub struct ConfigResolver<'a> {
    sources: Vec<Box<dyn ConfigSource + 'a>>,
}

impl<'a> ConfigResolver<'a> {
    /// Creates a resolver that queries `sources` in the given order.
    pub fn new(sources: Vec<Box<dyn ConfigSource + 'a>>) -> Self {
        Self { sources }
    }

    /// Flags, then the process environment, then defaults.
    pub fn standard(cli: &'a Cli) -> Self {
        Self::new(vec![
            Box::new(FlagSource::new(cli)),
            Box::new(EnvSource::process()),
            Box::new(DefaultSource),
        ])
    }

    /// The first non-empty value for `key` and the name of the source that supplied it.
    pub fn lookup(&self, key: ConfigKey) -> Option<(String, &'static str)> {
        self.sources.iter().find_map(|source| {
            source
                .value(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(|value| (value, source.name()))
        })
    }

    /// Resolves every option.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingOption` when a required option has no value in
    /// any source and `Error::InvalidOption` when a value cannot be parsed.
    pub fn resolve(&self) -> Result<RunConfig, Error> {
        let endpoint = parse_endpoint(&self.require(ConfigKey::Endpoint)?)?;
        let credential = SecretString::from(self.require(ConfigKey::Credential)?);
        let agent_label = self.require(ConfigKey::AgentLabel)?;
        let dry_run = parse_switch(ConfigKey::DryRun, &self.require(ConfigKey::DryRun)?)?;
        let max_age_days = parse_days(&self.require(ConfigKey::MaxAgeDays)?)?;

        Ok(RunConfig {
            endpoint,
            credential,
            agent_label,
            dry_run,
            max_age_days,
        })
    }

    fn require(&self, key: ConfigKey) -> Result<String, Error> {
        match self.lookup(key) {
            Some((value, source)) => {
                if key == ConfigKey::Credential {
                    debug!(option = key.name(), source = source, "Resolved option");
                } else {
                    debug!(
                        option = key.name(),
                        source = source,
                        value = value.as_str(),
                        "Resolved option"
                    );
                }
                Ok(value)
            }
            None => Err(Error::MissingOption {
                option: key.name(),
                flag: key.flag(),
                env: key.env_var().unwrap_or("no environment variable"),
            }),
        }
    }
}

fn parse_endpoint(value: &str) -> Result<Url, Error> {
    let invalid = |reason: String| Error::InvalidOption {
        option: ConfigKey::Endpoint.name(),
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("must be an http or https URL".to_string()));
    }

    Ok(url)
}

fn parse_days(value: &str) -> Result<u32, Error> {
    value.parse::<u32>().map_err(|_| Error::InvalidOption {
        option: ConfigKey::MaxAgeDays.name(),
        value: value.to_string(),
        reason: "must be a non-negative whole number of days".to_string(),
    })
}

fn parse_switch(key: ConfigKey, value: &str) -> Result<bool, Error> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidOption {
            option: key.name(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
