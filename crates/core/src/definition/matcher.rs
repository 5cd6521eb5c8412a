//! Applies a validated definition's patterns to announce lines.

use regex_lite::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use super::ValidDefinition;

/// Variables captured from one announce line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Index of the pattern that matched, in declaration order.
    pub pattern_index: usize,
    pub variables: BTreeMap<String, String>,
}

impl ValidDefinition {
    /// Match a line against the definition's patterns.
    ///
    /// Patterns are tried in declaration order and the first one that matches
    /// wins. `None` means the line is not an announce of this tracker, which
    /// is the common case for channel chatter.
    pub fn match_line(&self, line: &str) -> Option<MatchResult> {
        self.patterns
            .iter()
            .enumerate()
            .find_map(|(pattern_index, pattern)| {
                capture_vars(&pattern.regex, &pattern.vars, line).map(|variables| MatchResult {
                    pattern_index,
                    variables,
                })
            })
    }
}

/// Zip a regex's capture groups with variable names.
///
/// Groups that did not participate in the match capture the empty string.
pub(super) fn capture_vars(
    regex: &Regex,
    vars: &[String],
    line: &str,
) -> Option<BTreeMap<String, String>> {
    let captures = regex.captures(line)?;
    Some(
        vars.iter()
            .enumerate()
            .map(|(i, name)| {
                let value = captures
                    .get(i + 1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                (name.clone(), value)
            })
            .collect(),
    )
}
