//! `{{ .name }}` templates for deriving fields from captured variables.
//!
//! A template is parsed once, when its definition is validated, into a list of
//! literal and placeholder segments. Rendering walks the segments left to right
//! and substitutes each placeholder from the captured variables first, then
//! from the indexer settings.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use thiserror::Error;

use super::settings::IndexerSettings;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A template string that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unclosed placeholder starting at byte {0}")]
    Unclosed(usize),

    #[error("invalid placeholder '{{{{{0}}}}}', expected '{{{{ .name }}}}'")]
    InvalidPlaceholder(String),
}

/// Rendering reached a name that is neither a declared variable nor a setting.
///
/// Validation rejects such templates, so this only happens when a template is
/// rendered against a context it was not validated for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("template references undeclared name '{0}'")]
    UndeclaredReference(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after_open = &rest[start + OPEN.len()..];
            let end = after_open
                .find(CLOSE)
                .ok_or(TemplateError::Unclosed(offset + start))?;
            let inner = &after_open[..end];
            segments.push(Segment::Placeholder(parse_placeholder(inner)?));

            let consumed = start + OPEN.len() + end + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names referenced by placeholders, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Expand every placeholder against the given context.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => out.push_str(ctx.resolve(name)?),
            }
        }
        Ok(out)
    }
}

fn parse_placeholder(inner: &str) -> Result<String, TemplateError> {
    let name = inner
        .trim()
        .strip_prefix('.')
        .filter(|name| is_identifier(name))
        .ok_or_else(|| TemplateError::InvalidPlaceholder(inner.to_string()))?;
    Ok(name.to_string())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Values available to a template while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub variables: &'a BTreeMap<String, String>,
    pub settings: &'a IndexerSettings,
    /// Every variable name declared by the definition, across all patterns.
    pub declared_variables: &'a BTreeSet<String>,
}

impl<'a> RenderContext<'a> {
    fn resolve(&self, name: &str) -> Result<&'a str, RenderError> {
        if let Some(value) = self.variables.get(name) {
            return Ok(value.as_str());
        }
        if let Some(value) = self.settings.get(name) {
            return Ok(value);
        }
        // Declared but not captured by the winning pattern, or an optional
        // setting left unset.
        if self.declared_variables.contains(name) || self.settings.is_declared(name) {
            return Ok("");
        }
        Err(RenderError::UndeclaredReference(name.to_string()))
    }
}
