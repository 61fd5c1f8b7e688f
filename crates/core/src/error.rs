//! Error type for template construction
//!
//! Projection itself never fails: missing data collapses to omission. The only
//! fallible step is turning a JSON document into a [`crate::Template`].

use thiserror::Error;

/// Errors raised while parsing field paths and template documents
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("field path is empty")]
    EmptyPath,

    #[error("field path `{path}` contains an empty segment")]
    EmptySegment { path: String },

    #[error("invalid template node `{key}`: {reason}")]
    InvalidNode { key: String, reason: String },

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("template is not valid JSON: {0}")]
    Json(String),
}

impl TemplateError {
    pub(crate) fn invalid_node(key: &str, reason: impl Into<String>) -> Self {
        TemplateError::InvalidNode {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::Json(err.to_string())
    }
}
