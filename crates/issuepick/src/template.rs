use std::path::{Path, PathBuf};

use issuepick_core::jira::issue_template;
use issuepick_core::Template;

use crate::prelude::{eprintln, println, *};

/// Where to read a template from
#[derive(Debug, Clone, clap::Args)]
pub struct TemplateSource {
    /// Template file (defaults to the built-in issue template)
    #[arg(long = "template", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Read the template file in the legacy layout (keyed by source path)
    #[arg(long, requires = "file")]
    pub legacy: bool,
}

/// Options for the template command
#[derive(Debug, clap::Args)]
pub struct TemplateOptions {
    #[clap(flatten)]
    pub source: TemplateSource,
}

impl TemplateSource {
    pub fn load(&self) -> Result<Template> {
        load_template(self.file.as_deref(), self.legacy)
    }
}

/// Load a template file, or the built-in issue template when `path` is `None`
pub fn load_template(path: Option<&Path>, legacy: bool) -> Result<Template> {
    let Some(path) = path else {
        return issue_template().map_err(|e| Error::from(e).into());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| f!("Failed to read template {}", path.display()))?;

    let parsed = if legacy {
        Template::from_legacy_str(&text)
    } else {
        text.parse::<Template>()
    };

    parsed
        .map_err(|e| Error::Template(f!("{}: {e}", path.display())))
        .map_err(Into::into)
}

/// Handle the template command
pub async fn handler(options: TemplateOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        match &options.source.file {
            Some(path) => eprintln!("Template: {}", path.display()),
            None => eprintln!("Template: built-in issue template"),
        }
    }

    let template = options.source.load()?;
    println!("{}", serde_json::to_string_pretty(&template)?);

    Ok(())
}
