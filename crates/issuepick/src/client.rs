use issuepick_core::jira::{issue_url, IssueQuery};
use serde_json::Value;

use crate::config::JiraConfig;
use crate::prelude::*;

/// Create an authenticated HTTP client with Basic Auth headers
pub fn create_authenticated_client(config: &JiraConfig) -> Result<reqwest::Client> {
    use base64::Engine;
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

    let auth_string = format!("{}:{}", config.user, config.password);
    let auth_encoded = base64::engine::general_purpose::STANDARD.encode(&auth_string);

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Basic {auth_encoded}"))
            .map_err(|e| eyre!("Invalid header value: {}", e))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Fetch a single issue as raw JSON
///
/// One request per call; a non-success status becomes [`Error::Remote`].
pub async fn fetch_issue(config: &JiraConfig, issue: &str, query: &IssueQuery) -> Result<Value> {
    let client = create_authenticated_client(config)?;
    let url = issue_url(&config.api_root(), issue, query);

    log::debug!("GET {url}");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::Network(f!("Failed to send request to Jira: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::debug!("Jira answered {status} for {issue}");
        return Err(Error::Remote {
            status: status.as_u16(),
            message: body,
        }
        .into());
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| eyre!("Failed to parse Jira issue response: {}", e))
}
