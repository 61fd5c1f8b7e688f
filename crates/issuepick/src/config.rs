use std::fmt;

use issuepick_core::jira::rest_api_root;

use crate::prelude::*;

pub const DEFAULT_PROTOCOL: &str = "https";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_API_VERSION: &str = "2";

/// Jira connection settings, read from the environment or flags
#[derive(Debug, Clone, clap::Args)]
pub struct JiraArgs {
    /// Protocol used to reach Jira
    #[arg(long = "jira-protocol", env = "JIRA_PROTOCOL", default_value = DEFAULT_PROTOCOL)]
    pub protocol: String,

    /// Jira host name (required)
    #[arg(long = "jira-host", env = "JIRA_HOST")]
    pub host: Option<String>,

    /// Jira port
    #[arg(long = "jira-port", env = "JIRA_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// User for basic auth (required)
    #[arg(long = "jira-user", env = "JIRA_USER")]
    pub user: Option<String>,

    /// Password or API token for basic auth (required)
    #[arg(long = "jira-password", env = "JIRA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// REST API version
    #[arg(long = "jira-api-version", env = "JIRA_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,
}

/// Validated Jira configuration
#[derive(Clone)]
pub struct JiraConfig {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub api_version: String,
}

impl JiraArgs {
    /// Check that every required setting is present
    pub fn into_config(self) -> std::result::Result<JiraConfig, Error> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        match (non_empty(self.host), non_empty(self.user), non_empty(self.password)) {
            (Some(host), Some(user), Some(password)) => Ok(JiraConfig {
                protocol: self.protocol,
                host,
                port: self.port,
                user,
                password,
                api_version: self.api_version,
            }),
            (host, user, password) => {
                let missing: Vec<&str> = [
                    ("JIRA_HOST", host.is_none()),
                    ("JIRA_USER", user.is_none()),
                    ("JIRA_PASSWORD", password.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, is_missing)| is_missing.then_some(name))
                .collect();

                Err(Error::Config(f!(
                    "missing {}. Recognized settings: JIRA_PROTOCOL, JIRA_PORT, JIRA_API_VERSION, \
                     *JIRA_HOST, *JIRA_USER, *JIRA_PASSWORD (* - required)",
                    missing.join(", ")
                )))
            }
        }
    }
}

impl JiraConfig {
    pub fn api_root(&self) -> String {
        rest_api_root(&self.protocol, &self.host, self.port, &self.api_version)
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}
