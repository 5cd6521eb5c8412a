use std::collections::BTreeMap;

use super::Release;
use crate::definition::{IndexerSettings, MatchResult, RenderContext, RenderError, ValidDefinition};

const TITLE_VARS: &[&str] = &["torrentName", "releaseName", "title", "name"];
const CATEGORY_VARS: &[&str] = &["category"];
const SIZE_VARS: &[&str] = &["torrentSize", "size"];

const DOWNLOAD_URL_FIELDS: &[&str] = &["torrenturl", "downloadurl", "url"];
const INFO_URL_FIELDS: &[&str] = &["infourl"];
const TITLE_FIELDS: &[&str] = &["title"];

fn first_var(variables: &BTreeMap<String, String>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| variables.get(*name))
        .cloned()
}

/// Field names match case-insensitively; `names` is in priority order.
fn first_field(fields: &BTreeMap<String, String>, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        fields
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    })
}

/// Build the canonical release for a matched line.
///
/// Pure and deterministic. Every match template of the definition is
/// rendered; a [`RenderError`] means the definition and the match disagree,
/// which validation rules out.
pub fn normalize(
    matched: &MatchResult,
    definition: &ValidDefinition,
    settings: &IndexerSettings,
) -> Result<Release, RenderError> {
    let ctx = RenderContext {
        variables: &matched.variables,
        settings,
        declared_variables: definition.declared_variables(),
    };

    let fields = definition
        .templates()
        .iter()
        .map(|(field, template)| Ok((field.clone(), template.render(&ctx)?)))
        .collect::<Result<BTreeMap<_, _>, RenderError>>()?;

    let variables = &matched.variables;
    let title = first_field(&fields, TITLE_FIELDS)
        .or_else(|| first_var(variables, TITLE_VARS))
        .unwrap_or_default();

    Ok(Release {
        indexer: definition.identifier().to_string(),
        protocol: definition.definition().protocol,
        title,
        category: first_var(variables, CATEGORY_VARS).filter(|c| !c.is_empty()),
        size: first_var(variables, SIZE_VARS).filter(|s| !s.is_empty()),
        download_url: first_field(&fields, DOWNLOAD_URL_FIELDS),
        info_url: first_field(&fields, INFO_URL_FIELDS),
        fields,
        raw_variables: variables.clone(),
    })
}
