//! Types describing a tracker announce definition.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Declarative description of one tracker's announce grammar.
///
/// A definition is plain data: an ordered list of line patterns, the templates
/// that derive output fields from captured variables, and the schema of the
/// per-user settings those templates may reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Unique key used by indexer configuration to reference this definition.
    pub identifier: String,
    /// Human readable tracker name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub protocol: Protocol,
    /// Settings the operator supplies per indexer (keys, passkeys, ...).
    #[serde(default)]
    pub settings: Vec<SettingDefinition>,
    pub parse: ParseDefinition,
}

/// Download protocol of releases announced by a tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    #[default]
    Torrent,
    Usenet,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Torrent => "torrent",
            Protocol::Usenet => "usenet",
        }
    }
}

/// One entry of the settings schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingDefinition {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: SettingKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    #[default]
    Text,
    Secret,
}

/// Line grammar and derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDefinition {
    /// Patterns in priority order; the first one that matches wins.
    pub lines: Vec<LinePattern>,
    /// Output field name to template string.
    #[serde(rename = "match", default)]
    pub templates: BTreeMap<String, String>,
}

/// A regular expression and the names of its capture groups, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePattern {
    pub pattern: String,
    #[serde(default)]
    pub vars: Vec<String>,
    /// Example announce lines this pattern must parse.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<PatternTest>,
}

/// A self-test example for a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTest {
    pub line: String,
    /// Expected captures; variables not listed here are not checked.
    #[serde(default)]
    pub expect: BTreeMap<String, String>,
}

/// A malformed definition. Fatal at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("pattern {index} does not compile: {message}")]
    InvalidPattern { index: usize, message: String },

    #[error("pattern {index} has {groups} capture groups but declares {vars} variables")]
    GroupCountMismatch {
        index: usize,
        groups: usize,
        vars: usize,
    },

    #[error("template for field '{field}' is malformed: {message}")]
    MalformedTemplate { field: String, message: String },

    #[error("template for field '{field}' references undeclared name '{name}'")]
    UnresolvedReference { field: String, name: String },

    #[error("pattern {index} declares variable '{name}' more than once")]
    DuplicateVariable { index: usize, name: String },

    #[error("definition has no identifier")]
    MissingIdentifier,

    #[error("definition declares no patterns")]
    NoPatterns,

    #[error("setting '{0}' is declared more than once")]
    DuplicateSetting(String),

    #[error("'{0}' is declared both as a variable and as a setting")]
    AmbiguousName(String),

    #[error("pattern {index} test line does not match: {line}")]
    TestLineNotMatched { index: usize, line: String },

    #[error("pattern {index} test expected {name}='{expected}' but captured '{actual}'")]
    TestExpectationFailed {
        index: usize,
        name: String,
        expected: String,
        actual: String,
    },
}
