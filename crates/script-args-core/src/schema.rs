//! TOML schema adapter
//!
//! Each top-level table declares one argument, keyed by the name its value is
//! stored under:
//!
//! ```toml
//! [retries]
//! type = "int"
//! description = "How many times to retry"
//! cli_arg = "--retries"
//! env_var = "RETRIES"
//! default_value = 3
//! ```
//!
//! Arguments keep document order.

use crate::descriptor::ArgumentDescriptor;
use crate::engine;
use crate::value::ResolvedValues;
use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArgumentEntry {
    #[serde(rename = "type")]
    type_decl: String,
    #[serde(default)]
    description: Option<String>,
    cli_arg: String,
    #[serde(default)]
    env_var: Option<String>,
    #[serde(default)]
    default_value: Option<toml::Value>,
}

/// Textual form of a scalar default; booleans use the spelling the loose
/// boolean parse understands.
fn default_text(name: &str, value: toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(true) => Ok("True".to_string()),
        toml::Value::Boolean(false) => Ok("False".to_string()),
        toml::Value::Datetime(d) => Ok(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => Err(Error::InvalidSchema {
            name: name.to_string(),
            reason: "default_value must be a scalar".to_string(),
        }),
    }
}

/// An ordered set of argument descriptors loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    arguments: Vec<ArgumentDescriptor>,
}

impl Schema {
    /// Parse a schema from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let mut arguments = Vec::with_capacity(table.len());

        for (name, value) in table {
            let entry: ArgumentEntry = value.try_into()?;
            let mut descriptor = ArgumentDescriptor::new(&name, entry.type_decl, entry.cli_arg)?;
            if let Some(env_var) = entry.env_var {
                descriptor = descriptor.with_env_var(env_var);
            }
            if let Some(default) = entry.default_value {
                descriptor = descriptor.with_default(default_text(&name, default)?);
            }
            if let Some(description) = entry.description {
                descriptor = descriptor.with_description(description);
            }
            arguments.push(descriptor);
        }

        tracing::debug!(count = arguments.len(), "Parsed argument schema");
        Ok(Self { arguments })
    }

    /// Load and parse a schema file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::SchemaNotFound {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(?path, "Loading argument schema");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn arguments(&self) -> &[ArgumentDescriptor] {
        &self.arguments
    }

    pub fn get(&self, name: &str) -> Option<&ArgumentDescriptor> {
        self.arguments.iter().find(|arg| arg.name() == name)
    }

    pub fn into_arguments(self) -> Vec<ArgumentDescriptor> {
        self.arguments
    }

    /// Resolve this schema against `tokens` with the default collaborators.
    pub fn resolve<I, S>(&self, tokens: I) -> Result<ResolvedValues>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        engine::resolve(&self.arguments, tokens)
    }
}

impl From<Vec<ArgumentDescriptor>> for Schema {
    fn from(arguments: Vec<ArgumentDescriptor>) -> Self {
        Self { arguments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_defaults_are_stored_as_text() {
        let schema = Schema::parse(
            r#"
[flag]
type = "bool"
cli_arg = "--flag"
default_value = false

[count]
type = "int"
cli_arg = "--count"
default_value = 7
"#,
        )
        .unwrap();
        assert_eq!(schema.get("flag").unwrap().default_value(), Some("False"));
        assert_eq!(schema.get("count").unwrap().default_value(), Some("7"));
    }

    #[test]
    fn array_default_is_rejected() {
        let err = Schema::parse(
            r#"
[names]
type = "list[str]"
cli_arg = "--names"
default_value = ["a", "b"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSchema { ref name, .. } if name == "names"));
    }

    #[test]
    fn missing_cli_arg_is_a_toml_error() {
        let err = Schema::parse("[x]\ntype = \"str\"\n").unwrap_err();
        assert!(matches!(err, Error::TomlDe(_)));
    }
}
