//! Core library for issuepick
//!
//! This crate implements the **Functional Core** of the issuepick application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`issuepick_core`** (this crate): pure transformation functions with zero I/O
//! - **`issuepick`**: configuration, HTTP and terminal output (the Imperative Shell)
//!
//! The heart of the crate is a small interpreter for *pick templates*: a
//! declarative description of how to reshape an arbitrary JSON document
//! (usually an issue record fetched from Jira) into a new one.
//!
//! # Module Organization
//!
//! - [`path`]: dotted field paths, resolution and path-set fragments
//! - [`template`]: the template model and its JSON layouts
//! - [`merge`]: the pure merge used to combine entry fragments
//! - [`projector`]: the projection itself ([`project`], [`project_array`])
//! - [`jira`]: issue URL construction and the built-in issue template
//!
//! # Example Usage
//!
//! ```rust
//! use issuepick_core::{project, Template};
//! use serde_json::json;
//!
//! let issue = json!({"fields": {"summary": "Fix bug", "resolution": null}});
//! let template: Template = r#"{
//!     "summary": "fields.summary",
//!     "resolution_name": "fields.resolution.name"
//! }"#
//! .parse()
//! .unwrap();
//!
//! assert_eq!(project(&issue, &template), json!({"summary": "Fix bug"}));
//! ```

pub mod error;
pub mod jira;
pub mod merge;
pub mod path;
pub mod projector;
pub mod template;

pub use error::TemplateError;
pub use path::{FieldPath, OutputKey, FLATTEN_SENTINEL};
pub use projector::{project, project_array};
pub use template::{Template, TemplateEntry, TemplateNode};
