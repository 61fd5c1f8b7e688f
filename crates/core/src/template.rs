//! Pick templates
//!
//! A template describes the shape of a projection in terms of source paths.
//! Node kinds are fixed when the template is parsed, so the projector never has
//! to guess what a node means from its shape.
//!
//! Canonical JSON layout, keyed by output key:
//!
//! ```json
//! {
//!   "summary": "fields.summary",
//!   "project": { "sourcePath": "fields.project", "fields": { "name": "name" } },
//!   "authors": {
//!     "sourcePath": "fields.comment.comments",
//!     "groupKey": "comment_author_name",
//!     "fields": { "-": "author.name" }
//!   }
//! }
//! ```
//!
//! A bare array of path strings is also a template: it projects to the
//! sequence of resolved values.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::TemplateError;
use crate::path::{FieldPath, OutputKey};

const SOURCE_PATH: &str = "sourcePath";
const FIELDS: &str = "fields";
const GROUP_KEY: &str = "groupKey";
const LEGACY_KEY: &str = "key";

/// A parsed, read-only pick template
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// Ordered entries, each contributing a fragment to a mapping result
    Fields(Vec<TemplateEntry>),
    /// Bare list of scalar paths, projecting to a sequence
    Paths(Vec<FieldPath>),
}

/// One `output key -> node` pair of a template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateEntry {
    pub output: OutputKey,
    pub node: TemplateNode,
}

/// What a template entry does with the value found at its source path
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// Copy the resolved value unmodified
    Scalar(FieldPath),
    /// Project the resolved value through `fields`
    Object { source: FieldPath, fields: Template },
    /// Project every element of the resolved array through `fields` and
    /// collect the results under `group_key`
    Group {
        source: FieldPath,
        fields: Template,
        group_key: OutputKey,
    },
}

impl TemplateNode {
    pub fn source(&self) -> &FieldPath {
        match self {
            TemplateNode::Scalar(source)
            | TemplateNode::Object { source, .. }
            | TemplateNode::Group { source, .. } => source,
        }
    }
}

impl TemplateEntry {
    pub fn scalar(output: OutputKey, source: FieldPath) -> Self {
        Self {
            output,
            node: TemplateNode::Scalar(source),
        }
    }

    /// Where this entry's fragment lands in the result
    ///
    /// Grouping nodes write to their own group key, so several entries can
    /// feed the same output array.
    pub fn target(&self) -> &OutputKey {
        match &self.node {
            TemplateNode::Group { group_key, .. } => group_key,
            _ => &self.output,
        }
    }
}

impl Template {
    /// Parse a template from its canonical JSON layout
    pub fn from_value(value: &Value) -> Result<Self, TemplateError> {
        match value {
            Value::Object(map) => map
                .iter()
                .map(|(key, node)| -> Result<TemplateEntry, TemplateError> {
                    Ok(TemplateEntry {
                        output: OutputKey::parse(key)?,
                        node: parse_node(key, node)?,
                    })
                })
                .collect::<Result<Vec<_>, TemplateError>>()
                .and_then(check_flatten)
                .map(Template::Fields),
            Value::Array(items) => parse_path_list(items).map(Template::Paths),
            other => Err(TemplateError::InvalidTemplate(format!(
                "expected an object or an array of paths, found {}",
                describe(other)
            ))),
        }
    }

    /// Convert a legacy template into the canonical form
    ///
    /// Legacy templates are keyed by *source path*. A string value is the
    /// output path. An object value `{ "key"?, "fields" }` becomes a grouping
    /// node targeting `key`, or the flatten sentinel when `key` is missing.
    pub fn from_legacy(value: &Value) -> Result<Self, TemplateError> {
        let map = match value {
            Value::Object(map) => map,
            Value::Array(items) => return parse_path_list(items).map(Template::Paths),
            other => {
                return Err(TemplateError::InvalidTemplate(format!(
                    "legacy templates are objects keyed by source path, found {}",
                    describe(other)
                )))
            }
        };

        map.iter()
            .map(|(source_key, node)| -> Result<TemplateEntry, TemplateError> {
                let source = FieldPath::parse(source_key)?;
                match node {
                    Value::String(output) => {
                        Ok(TemplateEntry::scalar(OutputKey::parse(output)?, source))
                    }
                    Value::Object(props) => {
                        let fields = props.get(FIELDS).ok_or_else(|| {
                            TemplateError::invalid_node(source_key, "missing `fields`")
                        })?;
                        let group_key = match props.get(LEGACY_KEY) {
                            Some(Value::String(key)) => OutputKey::parse(key)?,
                            None | Some(Value::Null) => OutputKey::Flatten,
                            Some(other) => {
                                return Err(TemplateError::invalid_node(
                                    source_key,
                                    format!("`key` must be a string, found {}", describe(other)),
                                ))
                            }
                        };

                        Ok(TemplateEntry {
                            output: OutputKey::Path(source.clone()),
                            node: TemplateNode::Group {
                                source,
                                fields: Template::from_legacy(fields)?,
                                group_key,
                            },
                        })
                    }
                    other => Err(TemplateError::invalid_node(
                        source_key,
                        format!(
                            "expected an output path or a node object, found {}",
                            describe(other)
                        ),
                    )),
                }
            })
            .collect::<Result<Vec<_>, TemplateError>>()
            .and_then(check_flatten)
            .map(Template::Fields)
    }

    pub fn from_legacy_str(s: &str) -> Result<Self, TemplateError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_legacy(&value)
    }

    /// Render the template back into its canonical JSON layout
    pub fn to_value(&self) -> Value {
        match self {
            Template::Paths(paths) => Value::Array(
                paths
                    .iter()
                    .map(|path| Value::String(path.to_string()))
                    .collect(),
            ),
            Template::Fields(entries) => {
                let mut map = Map::new();
                for entry in entries {
                    map.insert(entry.output.to_string(), node_to_value(&entry.node));
                }
                Value::Object(map)
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Template::Fields(entries) => entries.len(),
            Template::Paths(paths) => paths.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A `-` entry replaces the whole level, so it cannot share it with siblings
fn check_flatten(entries: Vec<TemplateEntry>) -> Result<Vec<TemplateEntry>, TemplateError> {
    if entries.len() > 1 {
        if let Some(entry) = entries.iter().find(|entry| entry.target().is_flatten()) {
            return Err(TemplateError::invalid_node(
                &entry.output.to_string(),
                "an entry targeting `-` must be the only entry at its level",
            ));
        }
    }

    Ok(entries)
}

fn parse_path_list(items: &[Value]) -> Result<Vec<FieldPath>, TemplateError> {
    items
        .iter()
        .map(|item| match item {
            Value::String(path) => FieldPath::parse(path),
            other => Err(TemplateError::InvalidTemplate(format!(
                "path lists may only contain strings, found {}",
                describe(other)
            ))),
        })
        .collect()
}

fn parse_node(key: &str, node: &Value) -> Result<TemplateNode, TemplateError> {
    let props = match node {
        Value::String(path) => return Ok(TemplateNode::Scalar(FieldPath::parse(path)?)),
        Value::Object(props) => props,
        other => {
            return Err(TemplateError::invalid_node(
                key,
                format!("expected a path string or a node object, found {}", describe(other)),
            ))
        }
    };

    if let Some(unknown) = props
        .keys()
        .find(|k| !matches!(k.as_str(), SOURCE_PATH | FIELDS | GROUP_KEY))
    {
        return Err(TemplateError::invalid_node(
            key,
            format!("unknown property `{unknown}`"),
        ));
    }

    let source = match props.get(SOURCE_PATH) {
        Some(Value::String(path)) => FieldPath::parse(path)?,
        Some(other) => {
            return Err(TemplateError::invalid_node(
                key,
                format!("`sourcePath` must be a string, found {}", describe(other)),
            ))
        }
        None => return Err(TemplateError::invalid_node(key, "missing `sourcePath`")),
    };

    let fields = props
        .get(FIELDS)
        .ok_or_else(|| TemplateError::invalid_node(key, "missing `fields`"))
        .and_then(Template::from_value)?;

    match props.get(GROUP_KEY) {
        None => Ok(TemplateNode::Object { source, fields }),
        Some(Value::String(group_key)) => Ok(TemplateNode::Group {
            source,
            fields,
            group_key: OutputKey::parse(group_key)?,
        }),
        Some(other) => Err(TemplateError::invalid_node(
            key,
            format!("`groupKey` must be a string, found {}", describe(other)),
        )),
    }
}

fn node_to_value(node: &TemplateNode) -> Value {
    match node {
        TemplateNode::Scalar(source) => Value::String(source.to_string()),
        TemplateNode::Object { source, fields } => {
            let mut map = Map::new();
            map.insert(SOURCE_PATH.to_string(), Value::String(source.to_string()));
            map.insert(FIELDS.to_string(), fields.to_value());
            Value::Object(map)
        }
        TemplateNode::Group {
            source,
            fields,
            group_key,
        } => {
            let mut map = Map::new();
            map.insert(SOURCE_PATH.to_string(), Value::String(source.to_string()));
            map.insert(GROUP_KEY.to_string(), Value::String(group_key.to_string()));
            map.insert(FIELDS.to_string(), fields.to_value());
            Value::Object(map)
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }
}

impl TryFrom<Value> for Template {
    type Error = TemplateError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Template::from_value(&value).map_err(serde::de::Error::custom)
    }
}
