use crate::prelude::*;
use clap::Parser;

mod client;
mod config;
mod error;
mod issue;
mod output;
mod prelude;
mod project;
mod template;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Fetch Jira issues and reshape them with pick templates"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "ISSUEPICK_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Fetch a Jira issue and project it through a template
    Issue(crate::issue::IssueOptions),

    /// Project a local JSON document through a template
    Project(crate::project::ProjectOptions),

    /// Print a template in its canonical layout
    Template(crate::template::TemplateOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Issue(options) => crate::issue::handler(options, app.global).await,
        SubCommands::Project(options) => crate::project::handler(options, app.global).await,
        SubCommands::Template(options) => crate::template::handler(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
