//! Dotted field paths
//!
//! A [`FieldPath`] is parsed and validated once, when a template is built, and
//! then used both to read values out of a source document ([`FieldPath::resolve`])
//! and to address where a value lands in a result ([`FieldPath::to_fragment`]).

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::TemplateError;

/// Output key meaning "replace the result at this position, don't nest"
pub const FLATTEN_SENTINEL: &str = "-";

/// Pre-parsed, dot-delimited address into nested mappings
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path such as `fields.project.name`
    ///
    /// Empty paths and empty segments (`a..b`, `.a`, `a.`) are rejected.
    pub fn parse(path: &str) -> Result<Self, TemplateError> {
        if path.is_empty() {
            return Err(TemplateError::EmptyPath);
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(TemplateError::EmptySegment {
                path: path.to_string(),
            });
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Read the value at this path
    ///
    /// Every segment indexes into a mapping. A missing key, or anything other
    /// than a mapping where one is expected (arrays included), yields `None`.
    /// A `null` stored at the final segment is a present value.
    pub fn resolve<'a>(&self, source: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(source, |current, segment| match current {
                Value::Object(map) => map.get(segment),
                _ => None,
            })
    }

    /// Wrap `value` in the nested mappings this path describes
    ///
    /// `a.b` with `1` becomes `{"a": {"b": 1}}`.
    pub fn to_fragment(&self, value: Value) -> Value {
        self.segments.iter().rev().fold(value, |inner, segment| {
            let mut map = Map::new();
            map.insert(segment.clone(), inner);
            Value::Object(map)
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Destination of a template entry's contribution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputKey {
    /// Nest the contribution under this (possibly dotted) path
    Path(FieldPath),
    /// Splice the contribution in as the whole result at this level
    Flatten,
}

impl OutputKey {
    pub fn parse(key: &str) -> Result<Self, TemplateError> {
        if key == FLATTEN_SENTINEL {
            Ok(OutputKey::Flatten)
        } else {
            FieldPath::parse(key).map(OutputKey::Path)
        }
    }

    pub fn is_flatten(&self) -> bool {
        matches!(self, OutputKey::Flatten)
    }

    /// Build the fragment that puts `value` at this key
    pub fn place(&self, value: Value) -> Value {
        match self {
            OutputKey::Path(path) => path.to_fragment(value),
            OutputKey::Flatten => value,
        }
    }
}

impl fmt::Display for OutputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKey::Path(path) => write!(f, "{path}"),
            OutputKey::Flatten => f.write_str(FLATTEN_SENTINEL),
        }
    }
}

impl FromStr for OutputKey {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
