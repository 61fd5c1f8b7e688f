#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Issue request failed [{status}]: {message}")]
    Remote { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid template: {0}")]
    Template(String),
}

impl From<issuepick_core::TemplateError> for Error {
    fn from(err: issuepick_core::TemplateError) -> Self {
        Error::Template(err.to_string())
    }
}
