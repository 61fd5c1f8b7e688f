use std::path::{Path, PathBuf};

use issuepick_core::project;
use serde_json::Value;

use crate::prelude::{eprintln, *};
use crate::template::TemplateSource;

/// Options for projecting a local document
#[derive(Debug, clap::Args)]
pub struct ProjectOptions {
    /// JSON document to project (reads stdin when omitted)
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[clap(flatten)]
    pub template: TemplateSource,

    /// Render the top level of the result as a table
    #[arg(long)]
    pub table: bool,
}

/// Read the input document from a file or stdin
fn read_input(input: Option<&Path>) -> Result<Value> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| f!("Failed to read input {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
    };

    serde_json::from_str(&text).context("Input is not valid JSON")
}

/// Handle the project command
pub async fn handler(options: ProjectOptions, global: crate::Global) -> Result<()> {
    let template = options.template.load()?;
    let source = read_input(options.input.as_deref())?;

    if global.verbose {
        eprintln!("Projecting through {} template entries", template.len());
    }

    crate::output::print_value(&project(&source, &template), options.table)
}
