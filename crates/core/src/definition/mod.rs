//! Declarative tracker announce definitions.
//!
//! A definition describes, as data, how one tracker's announce lines are laid
//! out: which regular expressions recognize them, which variables their
//! capture groups bind, and which templates derive output fields (such as the
//! download URL) from those variables and the operator's settings.
//!
//! Definitions are validated once at load time into a [`ValidDefinition`],
//! after which matching and rendering cannot fail on configuration grounds.

mod loader;
mod matcher;
mod settings;
mod template;
mod types;
mod validate;

pub use loader::{
    load_definition_file, load_definitions_dir, parse_definition_toml, parse_definition_yaml,
    LoadError,
};
pub use matcher::MatchResult;
pub use settings::{IndexerSettings, SettingsError};
pub use template::{RenderContext, RenderError, Template, TemplateError};
pub use types::*;
pub use validate::{validate, ValidDefinition};
