use issuepick_core::jira::IssueQuery;
use issuepick_core::project;

use crate::client::fetch_issue;
use crate::config::JiraArgs;
use crate::prelude::{eprintln, *};
use crate::template::TemplateSource;

/// Options for fetching and projecting a Jira issue
#[derive(Debug, clap::Args)]
pub struct IssueOptions {
    /// Issue key or id (e.g., "PROJ-123")
    #[clap(env = "JIRA_ISSUE_KEY")]
    pub issue: String,

    /// Comma-separated fields to request from Jira
    #[arg(long)]
    pub fields: Option<String>,

    /// Comma-separated entities to expand (e.g., "changelog,renderedFields")
    #[arg(long)]
    pub expand: Option<String>,

    #[clap(flatten)]
    pub template: TemplateSource,

    /// Print the issue as returned by Jira, without projection
    #[arg(long)]
    pub raw: bool,

    /// Render the top level of the result as a table
    #[arg(long)]
    pub table: bool,

    #[clap(flatten)]
    pub jira: JiraArgs,
}

/// Handle the issue command
pub async fn handler(options: IssueOptions, global: crate::Global) -> Result<()> {
    if options.issue.trim().is_empty() {
        return Err(Error::Config("an issue key is required".to_string()).into());
    }

    let config = options.jira.into_config()?;
    let template = options.template.load()?;
    let query = IssueQuery::new(options.fields, options.expand);

    if global.verbose {
        eprintln!("Fetching {} from {}", options.issue, config.api_root());
    }

    let issue = fetch_issue(&config, &options.issue, &query).await?;
    let output = if options.raw {
        issue
    } else {
        project(&issue, &template)
    };

    crate::output::print_value(&output, options.table)
}
