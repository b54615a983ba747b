//! Resolution engine
//!
//! Each argument is resolved independently through four steps:
//!
//! 1. **Raw read**: take the value the [`OptionReader`] produced, if any.
//! 2. **Fallback**: when absent, try the environment variable, then the
//!    declared default. If both are missing the argument stays absent.
//! 3. **Tokenize**: split compound raw text into list elements and/or tuple
//!    fields.
//! 4. **Coerce**: convert every fragment per its scalar kind.
//!
//! The first error aborts the run; no partial mapping is returned.

use crate::coerce::{coerce_list, coerce_list_of_tuples, coerce_scalar, coerce_tuple};
use crate::descriptor::{ArgumentDescriptor, ScalarKind, Shape};
use crate::env::{Environment, ProcessEnv};
use crate::reader::{ClapReader, OptionReader, RawValue};
use crate::tokenizer::{check_arity, split_list, split_list_of_tuples, split_tuple_at};
use crate::value::{ResolvedValues, Value};
use crate::{Error, Result};
use std::collections::HashSet;

/// Tokenized fragments, paired with the kinds they coerce to.
#[derive(Debug)]
enum Tokens<'a> {
    Scalar(ScalarKind, String),
    List(ScalarKind, Vec<String>),
    Tuple(&'a [ScalarKind], Vec<String>),
    ListOfTuples(&'a [ScalarKind], Vec<Vec<String>>),
}

impl Tokens<'_> {
    fn coerce(&self, name: &str) -> Result<Value> {
        match self {
            Tokens::Scalar(kind, raw) => coerce_scalar(name, *kind, raw),
            Tokens::List(kind, items) => coerce_list(name, *kind, items),
            Tokens::Tuple(kinds, fields) => coerce_tuple(name, kinds, fields),
            Tokens::ListOfTuples(kinds, groups) => coerce_list_of_tuples(name, kinds, groups),
        }
    }
}

fn unexpected_shape(descriptor: &ArgumentDescriptor) -> Error {
    Error::UnexpectedShape {
        name: descriptor.name().to_string(),
        expected: descriptor.type_decl().to_string(),
    }
}

/// Split `raw` according to the descriptor's shape.
///
/// Text is tokenized; values the reader already separated are used as they
/// are, with tuple arity still enforced.
fn tokenize(descriptor: &ArgumentDescriptor, raw: RawValue) -> Result<Tokens<'_>> {
    let name = descriptor.name();
    let tokens = match (descriptor.shape(), raw) {
        (Shape::Scalar(kind), RawValue::Text(text)) => Tokens::Scalar(*kind, text),

        (Shape::List(kind), RawValue::Text(text)) => Tokens::List(*kind, split_list(name, &text)?),
        (Shape::List(kind), RawValue::Items(items)) => Tokens::List(*kind, items),

        (Shape::Tuple(kinds), RawValue::Text(text)) => {
            Tokens::Tuple(kinds, split_tuple_at(name, &text, kinds.len(), None)?)
        }
        (Shape::Tuple(kinds), RawValue::Items(items)) => {
            let joined = items.join(" ");
            Tokens::Tuple(kinds, check_arity(name, items, kinds.len(), &joined, None)?)
        }

        (Shape::ListOfTuples(kinds), RawValue::Text(text)) => {
            Tokens::ListOfTuples(kinds, split_list_of_tuples(name, &text, kinds.len())?)
        }
        (Shape::ListOfTuples(kinds), RawValue::Items(items)) => {
            let groups = items
                .iter()
                .enumerate()
                .map(|(position, item)| split_tuple_at(name, item, kinds.len(), Some(position)))
                .collect::<Result<Vec<_>>>()?;
            Tokens::ListOfTuples(kinds, groups)
        }
        (Shape::ListOfTuples(kinds), RawValue::Groups(groups)) => {
            let groups = groups
                .into_iter()
                .enumerate()
                .map(|(position, group)| {
                    let joined = group.join(" ");
                    check_arity(name, group, kinds.len(), &joined, Some(position))
                })
                .collect::<Result<Vec<_>>>()?;
            Tokens::ListOfTuples(kinds, groups)
        }

        _ => return Err(unexpected_shape(descriptor)),
    };
    tracing::debug!(name, ?tokens, "Tokenized value");
    Ok(tokens)
}

fn ensure_unique_names(descriptors: &[ArgumentDescriptor]) -> Result<()> {
    let mut seen = HashSet::new();
    for descriptor in descriptors {
        if !seen.insert(descriptor.name()) {
            return Err(Error::DuplicateName {
                name: descriptor.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Resolves typed values from descriptors, command-line tokens and the
/// environment.
///
/// The resolver holds no state between calls: the same descriptors, tokens and
/// environment always produce the same mapping.
#[derive(Debug, Clone, Default)]
pub struct Resolver<R = ClapReader, E = ProcessEnv> {
    reader: R,
    env: E,
}

impl<R: OptionReader, E: Environment> Resolver<R, E> {
    /// Create a resolver with explicit collaborators.
    pub fn new(reader: R, env: E) -> Self {
        Self { reader, env }
    }

    /// Resolve every descriptor against `tokens`.
    ///
    /// # Errors
    ///
    /// Fails on duplicate names, rejected tokens, malformed text, tuple arity
    /// mismatches and scalar conversion failures.
    pub fn resolve<I, S>(&self, descriptors: &[ArgumentDescriptor], tokens: I) -> Result<ResolvedValues>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ensure_unique_names(descriptors)?;
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let mut raw_values = self.reader.read(descriptors, &tokens)?;

        let mut resolved = ResolvedValues::default();
        for descriptor in descriptors {
            let name = descriptor.name();
            let value = match self.fallback(descriptor, raw_values.remove(name)) {
                Some(raw) => Some(tokenize(descriptor, raw)?.coerce(name)?),
                None => None,
            };
            resolved.insert(name.to_string(), value);
        }
        Ok(resolved)
    }

    /// Apply the fallback chain: command line, environment, default.
    fn fallback(&self, descriptor: &ArgumentDescriptor, raw: Option<RawValue>) -> Option<RawValue> {
        let name = descriptor.name();
        if raw.is_some() {
            tracing::debug!(name, "Using command-line value");
            return raw;
        }
        if let Some(env_var) = descriptor.env_var() {
            if let Some(value) = self.env.var(env_var) {
                tracing::debug!(name, env_var, "Using environment variable");
                return Some(RawValue::Text(value));
            }
        }
        if let Some(default) = descriptor.default_value() {
            tracing::debug!(name, "Using declared default");
            return Some(RawValue::Text(default.to_string()));
        }
        tracing::debug!(name, "No value resolved");
        None
    }
}

/// Resolve `descriptors` against `tokens` with the clap-backed reader and the
/// process environment.
///
/// # Example
///
/// ```
/// use script_args_core::{resolve, ArgumentDescriptor, Value};
///
/// let args = vec![
///     ArgumentDescriptor::new("count", "int", "--count").unwrap(),
///     ArgumentDescriptor::new("points", "list[tuple[int,int]]", "--points").unwrap(),
/// ];
/// let values = resolve(&args, ["--count", "3", "--points", "1", "2"]).unwrap();
/// assert_eq!(values.get("count"), Some(&Value::Int(3)));
/// assert_eq!(
///     values.get("points"),
///     Some(&Value::List(vec![Value::Tuple(vec![Value::Int(1), Value::Int(2)])]))
/// );
/// ```
pub fn resolve<I, S>(descriptors: &[ArgumentDescriptor], tokens: I) -> Result<ResolvedValues>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Resolver::<ClapReader, ProcessEnv>::default().resolve(descriptors, tokens)
}
