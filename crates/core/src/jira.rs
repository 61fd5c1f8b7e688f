//! Jira issue queries and the built-in issue template
//!
//! Pure helpers for the shell: building the REST path for a single issue and
//! loading the template used to flatten an issue record.

use crate::error::TemplateError;
use crate::template::Template;

/// Canonical template applied to issues when the caller supplies none
pub const ISSUE_TEMPLATE: &str = include_str!("../templates/issue.json");

/// Parse [`ISSUE_TEMPLATE`]
pub fn issue_template() -> Result<Template, TemplateError> {
    ISSUE_TEMPLATE.parse()
}

/// Optional query-string decorations for an issue request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueQuery {
    /// Comma-separated list of fields to return
    pub fields: Option<String>,
    /// Comma-separated list of entities to expand
    pub expand: Option<String>,
}

impl IssueQuery {
    pub fn new(fields: Option<String>, expand: Option<String>) -> Self {
        Self { fields, expand }
    }

    /// Encode the supplied parameters, `None` when there is nothing to add
    ///
    /// Empty strings count as not supplied.
    pub fn query_string(&self) -> Option<String> {
        let pairs: Vec<String> = [("fields", &self.fields), ("expand", &self.expand)]
            .into_iter()
            .filter_map(|(name, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{name}={}", urlencoding::encode(v)))
            })
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("&"))
        }
    }
}

/// Root of the REST API, e.g. `https://jira.example.com:443/rest/api/2`
pub fn rest_api_root(protocol: &str, host: &str, port: u16, api_version: &str) -> String {
    format!(
        "{}://{}:{}/rest/api/{}",
        protocol.trim_end_matches("://"),
        host.trim_end_matches('/'),
        port,
        api_version.trim_matches('/')
    )
}

/// Full URL of a single issue, with the query string appended when present
pub fn issue_url(api_root: &str, issue: &str, query: &IssueQuery) -> String {
    let url = format!(
        "{}/issue/{}",
        api_root.trim_end_matches('/'),
        urlencoding::encode(issue)
    );

    match query.query_string() {
        Some(query) => format!("{url}?{query}"),
        None => url,
    }
}
