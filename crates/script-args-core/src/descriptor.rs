//! Argument descriptors and their declared shapes.
//!
//! A descriptor is built once from a name and a type declaration such as
//! `int`, `list[str]`, `tuple[int, str]` or `list[tuple[int, int]]`. The
//! declaration is parsed at construction time; the resulting [`Shape`] never
//! changes afterwards.

use crate::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static LIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^list\[(.+)\]$").expect("Invalid list type regex"));

static TUPLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^tuple\[(.*)\]$").expect("Invalid tuple type regex"));

/// A leaf type with a direct string-to-value converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Str,
    Int,
    Bool,
    /// A boolean that may be given as a bare flag on the command line
    Switch,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Str => "str",
            ScalarKind::Int => "int",
            ScalarKind::Bool => "bool",
            ScalarKind::Switch => "switch",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "str" => Ok(ScalarKind::Str),
            "int" => Ok(ScalarKind::Int),
            "bool" => Ok(ScalarKind::Bool),
            "switch" => Ok(ScalarKind::Switch),
            other => Err(format!("unknown scalar kind '{}'", other)),
        }
    }
}

/// The declared shape of an argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Scalar(ScalarKind),
    List(ScalarKind),
    /// Fixed-arity tuple; never empty
    Tuple(Vec<ScalarKind>),
    /// List whose elements are fixed-arity tuples; never empty
    ListOfTuples(Vec<ScalarKind>),
}

impl Shape {
    /// Parse a type declaration for the argument `name`.
    pub fn parse(name: &str, type_decl: &str) -> Result<Self> {
        let decl = type_decl.trim();
        let invalid = |reason: String| Error::InvalidSchema {
            name: name.to_string(),
            reason: format!("type '{}' {}", type_decl, reason),
        };

        if let Some(caps) = LIST_REGEX.captures(decl) {
            let inner = caps[1].trim();
            if let Some(kinds) = parse_tuple(inner).map_err(&invalid)? {
                return Ok(Shape::ListOfTuples(kinds));
            }
            let kind = inner
                .parse::<ScalarKind>()
                .map_err(|e| invalid(format!("has an invalid list element: {}", e)))?;
            return Ok(Shape::List(kind));
        }

        if let Some(kinds) = parse_tuple(decl).map_err(&invalid)? {
            return Ok(Shape::Tuple(kinds));
        }

        decl.parse::<ScalarKind>()
            .map(Shape::Scalar)
            .map_err(|e| invalid(format!("is not supported: {}", e)))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Shape::List(_) | Shape::ListOfTuples(_))
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Shape::Tuple(_) | Shape::ListOfTuples(_))
    }

    /// Element kind of a plain list.
    pub fn element_type(&self) -> Option<ScalarKind> {
        match self {
            Shape::List(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Ordered field kinds of a tuple or list of tuples.
    pub fn tuple_types(&self) -> Option<&[ScalarKind]> {
        match self {
            Shape::Tuple(kinds) | Shape::ListOfTuples(kinds) => Some(kinds),
            _ => None,
        }
    }
}

/// Returns `Ok(None)` when `decl` is not a tuple declaration at all.
fn parse_tuple(decl: &str) -> std::result::Result<Option<Vec<ScalarKind>>, String> {
    let Some(caps) = TUPLE_REGEX.captures(decl) else {
        return Ok(None);
    };
    let members = caps[1].trim();
    if members.is_empty() {
        return Err("declares a tuple with no fields".to_string());
    }
    members
        .split(',')
        .map(|member| {
            member
                .trim()
                .parse::<ScalarKind>()
                .map_err(|e| format!("has an invalid tuple field: {}", e))
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(Some)
}

/// Immutable record of one configurable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    name: String,
    type_decl: String,
    cli_option: String,
    env_var: Option<String>,
    default_value: Option<String>,
    description: Option<String>,
    shape: Shape,
}

impl ArgumentDescriptor {
    /// Create a descriptor, parsing `type_decl` into its shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSchema`] when the declaration names an unknown
    /// scalar kind, an empty tuple, or an unsupported nesting.
    ///
    /// # Example
    ///
    /// ```
    /// use script_args_core::{ArgumentDescriptor, ScalarKind};
    ///
    /// let arg = ArgumentDescriptor::new("pairs", "list[tuple[int, str]]", "--pairs").unwrap();
    /// assert!(arg.is_list());
    /// assert!(arg.is_tuple());
    /// assert_eq!(arg.tuple_types(), Some(&[ScalarKind::Int, ScalarKind::Str][..]));
    /// ```
    pub fn new(
        name: impl Into<String>,
        type_decl: impl Into<String>,
        cli_option: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let type_decl = type_decl.into();
        let shape = Shape::parse(&name, &type_decl)?;
        Ok(Self {
            name,
            type_decl,
            cli_option: cli_option.into(),
            env_var: None,
            default_value: None,
            description: None,
            shape,
        })
    }

    /// Set the environment variable consulted when the option is absent.
    pub fn with_env_var(mut self, env_var: impl Into<String>) -> Self {
        self.env_var = Some(env_var.into());
        self
    }

    /// Set the literal used when both the option and the env var are absent.
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_decl(&self) -> &str {
        &self.type_decl
    }

    pub fn cli_option(&self) -> &str {
        &self.cli_option
    }

    pub fn env_var(&self) -> Option<&str> {
        self.env_var.as_deref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn is_list(&self) -> bool {
        self.shape.is_list()
    }

    pub fn is_tuple(&self) -> bool {
        self.shape.is_tuple()
    }

    pub fn element_type(&self) -> Option<ScalarKind> {
        self.shape.element_type()
    }

    pub fn tuple_types(&self) -> Option<&[ScalarKind]> {
        self.shape.tuple_types()
    }

    /// Declared tuple arity, if the shape involves a tuple.
    pub fn arity(&self) -> Option<usize> {
        self.tuple_types().map(<[ScalarKind]>::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_declarations_parse() {
        assert_eq!(Shape::parse("a", "str").unwrap(), Shape::Scalar(ScalarKind::Str));
        assert_eq!(Shape::parse("a", " int ").unwrap(), Shape::Scalar(ScalarKind::Int));
        assert_eq!(
            Shape::parse("a", "switch").unwrap(),
            Shape::Scalar(ScalarKind::Switch)
        );
    }

    #[test]
    fn list_of_tuples_sets_both_flags() {
        let shape = Shape::parse("a", "list[tuple[int,str]]").unwrap();
        assert!(shape.is_list());
        assert!(shape.is_tuple());
        assert_eq!(shape.element_type(), None);
        assert_eq!(
            shape.tuple_types(),
            Some(&[ScalarKind::Int, ScalarKind::Str][..])
        );
    }

    #[test]
    fn empty_tuple_is_rejected() {
        let err = Shape::parse("pair", "tuple[]").unwrap_err();
        assert!(matches!(err, Error::InvalidSchema { ref name, .. } if name == "pair"));
        assert!(err.to_string().contains("no fields"));
    }

    #[test]
    fn nested_lists_are_rejected() {
        assert!(Shape::parse("a", "list[list[int]]").is_err());
    }
}
