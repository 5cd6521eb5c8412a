//! Load-time validation of definitions.

use regex_lite::Regex;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::matcher::capture_vars;
use super::template::Template;
use super::{Definition, DefinitionError};

#[derive(Debug, Clone)]
pub(super) struct CompiledPattern {
    pub(super) regex: Regex,
    pub(super) vars: Vec<String>,
}

/// A definition that passed validation.
///
/// Holds the compiled patterns and parsed templates. Immutable and safe to
/// share between threads; matching never needs a lock.
#[derive(Debug, Clone)]
pub struct ValidDefinition {
    definition: Definition,
    pub(super) patterns: Vec<CompiledPattern>,
    templates: BTreeMap<String, Template>,
    declared_variables: BTreeSet<String>,
}

impl ValidDefinition {
    /// The definition this was validated from.
    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    pub fn identifier(&self) -> &str {
        &self.definition.identifier
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Parsed match templates keyed by output field.
    pub fn templates(&self) -> &BTreeMap<String, Template> {
        &self.templates
    }

    /// Every variable name declared by any pattern.
    pub fn declared_variables(&self) -> &BTreeSet<String> {
        &self.declared_variables
    }
}

impl PartialEq for ValidDefinition {
    fn eq(&self, other: &Self) -> bool {
        // Compiled state is derived from the definition.
        self.definition == other.definition
    }
}

/// Validate a definition, failing on the first violation found.
///
/// Checks run in this order: patterns compile, capture groups match declared
/// variables, templates reference only declared names, no variable repeats
/// within a pattern. Then the identifier and settings schema are checked, and
/// finally each pattern's test lines are run.
pub fn validate(definition: Definition) -> Result<ValidDefinition, DefinitionError> {
    let lines = &definition.parse.lines;

    let mut regexes = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let regex = Regex::new(&line.pattern).map_err(|e| DefinitionError::InvalidPattern {
            index,
            message: e.to_string(),
        })?;
        regexes.push(regex);
    }

    for (index, (regex, line)) in regexes.iter().zip(lines).enumerate() {
        // Group 0 is the whole match.
        let groups = regex.captures_len() - 1;
        if groups != line.vars.len() {
            return Err(DefinitionError::GroupCountMismatch {
                index,
                groups,
                vars: line.vars.len(),
            });
        }
    }

    let declared_variables: BTreeSet<String> =
        lines.iter().flat_map(|l| l.vars.iter().cloned()).collect();
    let setting_names: HashSet<&str> = definition
        .settings
        .iter()
        .map(|s| s.name.as_str())
        .collect();

    let mut templates = BTreeMap::new();
    for (field, source) in &definition.parse.templates {
        let template =
            Template::parse(source).map_err(|e| DefinitionError::MalformedTemplate {
                field: field.clone(),
                message: e.to_string(),
            })?;
        if let Some(name) = template
            .placeholders()
            .find(|name| !declared_variables.contains(*name) && !setting_names.contains(name))
        {
            return Err(DefinitionError::UnresolvedReference {
                field: field.clone(),
                name: name.to_string(),
            });
        }
        templates.insert(field.clone(), template);
    }

    for (index, line) in lines.iter().enumerate() {
        let mut seen = HashSet::new();
        if let Some(name) = line.vars.iter().find(|v| !seen.insert(v.as_str())) {
            return Err(DefinitionError::DuplicateVariable {
                index,
                name: name.clone(),
            });
        }
    }

    if definition.identifier.trim().is_empty() {
        return Err(DefinitionError::MissingIdentifier);
    }
    if lines.is_empty() {
        return Err(DefinitionError::NoPatterns);
    }

    let mut seen = HashSet::new();
    for setting in &definition.settings {
        if !seen.insert(setting.name.as_str()) {
            return Err(DefinitionError::DuplicateSetting(setting.name.clone()));
        }
        if declared_variables.contains(&setting.name) {
            return Err(DefinitionError::AmbiguousName(setting.name.clone()));
        }
    }

    for (index, (regex, line)) in regexes.iter().zip(lines).enumerate() {
        for test in &line.tests {
            let captured = capture_vars(regex, &line.vars, &test.line).ok_or_else(|| {
                DefinitionError::TestLineNotMatched {
                    index,
                    line: test.line.clone(),
                }
            })?;
            for (name, expected) in &test.expect {
                let actual = captured.get(name).map(String::as_str).unwrap_or_default();
                if actual != expected.as_str() {
                    return Err(DefinitionError::TestExpectationFailed {
                        index,
                        name: name.clone(),
                        expected: expected.clone(),
                        actual: actual.to_string(),
                    });
                }
            }
        }
    }

    let patterns = regexes
        .into_iter()
        .zip(lines)
        .map(|(regex, line)| CompiledPattern {
            regex,
            vars: line.vars.clone(),
        })
        .collect();

    Ok(ValidDefinition {
        definition,
        patterns,
        templates,
        declared_variables,
    })
}
