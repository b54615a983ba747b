//! Reading raw option values from command-line tokens.
//!
//! The engine only depends on [`OptionReader`]. [`ClapReader`] is the default
//! implementation: it builds a `clap::Command` at runtime, one argument per
//! descriptor, and maps the matches back to [`RawValue`]s.
//!
//! | Declared shape        | Option behaviour                 | Raw value |
//! |-----------------------|----------------------------------|-----------|
//! | `switch`              | zero or one value, bare = `True` | `Text`    |
//! | `str`, `int`, `bool`  | exactly one value                | `Text`    |
//! | `list[T]`             | repeatable, one value each       | `Items`   |
//! | `tuple[...]`          | exactly N values                 | `Items`   |
//! | `list[tuple[...]]`    | repeatable, N values each        | `Groups`  |

use crate::descriptor::{ArgumentDescriptor, ScalarKind, Shape};
use crate::{Error, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::{HashMap, HashSet};

/// A raw value as produced by an option reader, before tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// A single raw string; compound shapes still need splitting
    Text(String),
    /// Values already separated by the reader (repeated or multi-value options)
    Items(Vec<String>),
    /// One group of values per occurrence of a repeated multi-value option
    Groups(Vec<Vec<String>>),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

/// Reads raw per-argument values from command-line tokens.
///
/// Arguments that were not given are simply missing from the returned map.
pub trait OptionReader {
    fn read(
        &self,
        descriptors: &[ArgumentDescriptor],
        tokens: &[String],
    ) -> Result<HashMap<String, RawValue>>;
}

impl<R: OptionReader + ?Sized> OptionReader for &R {
    fn read(
        &self,
        descriptors: &[ArgumentDescriptor],
        tokens: &[String],
    ) -> Result<HashMap<String, RawValue>> {
        (**self).read(descriptors, tokens)
    }
}

/// Option reader backed by clap's builder API.
#[derive(Debug, Clone)]
pub struct ClapReader {
    program: String,
}

impl Default for ClapReader {
    fn default() -> Self {
        Self {
            program: "script".to_string(),
        }
    }
}

impl ClapReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name used in usage lines of command-line errors.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Build the clap command for `descriptors`.
    ///
    /// Tokens are parsed without a leading binary name. A scalar option given
    /// twice keeps its last value. The automatic help and version flags are
    /// disabled so scripts may declare `--help` themselves.
    pub fn command(&self, descriptors: &[ArgumentDescriptor]) -> Result<Command> {
        let mut seen = HashSet::new();
        let mut command = Command::new(self.program.clone())
            .no_binary_name(true)
            .args_override_self(true)
            .disable_help_flag(true)
            .disable_version_flag(true);

        for descriptor in descriptors {
            let option = descriptor.cli_option();
            if !seen.insert(option) {
                return Err(invalid_option(descriptor, "is declared more than once"));
            }
            command = command.arg(build_arg(descriptor)?);
        }
        Ok(command)
    }
}

fn invalid_option(descriptor: &ArgumentDescriptor, reason: &str) -> Error {
    Error::InvalidSchema {
        name: descriptor.name().to_string(),
        reason: format!("option '{}' {}", descriptor.cli_option(), reason),
    }
}

fn build_arg(descriptor: &ArgumentDescriptor) -> Result<Arg> {
    let option = descriptor.cli_option();
    let mut arg = Arg::new(descriptor.name().to_string())
        .value_parser(clap::value_parser!(String))
        .required(false);

    if let Some(long) = option.strip_prefix("--") {
        if long.is_empty() || long.starts_with('-') {
            return Err(invalid_option(descriptor, "has no name"));
        }
        arg = arg.long(long.to_string());
    } else if let Some(short) = option.strip_prefix('-') {
        let mut chars = short.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => arg = arg.short(c),
            _ => {
                return Err(invalid_option(
                    descriptor,
                    "must be a single character after one dash",
                ));
            }
        }
    } else if option.is_empty() {
        return Err(invalid_option(descriptor, "has no name"));
    } else {
        arg = arg.value_name(option.to_string());
    }

    if let Some(help) = descriptor.description() {
        arg = arg.help(help.to_string());
    }

    let arg = match descriptor.shape() {
        Shape::Scalar(ScalarKind::Switch) => arg
            .action(ArgAction::Set)
            .num_args(0..=1)
            .default_missing_value("True"),
        Shape::Scalar(_) => arg
            .action(ArgAction::Set)
            .num_args(1)
            .allow_negative_numbers(true),
        Shape::List(_) => arg
            .action(ArgAction::Append)
            .num_args(1)
            .allow_negative_numbers(true),
        Shape::Tuple(kinds) => arg
            .action(ArgAction::Set)
            .num_args(kinds.len())
            .allow_negative_numbers(true),
        Shape::ListOfTuples(kinds) => arg
            .action(ArgAction::Append)
            .num_args(kinds.len())
            .allow_negative_numbers(true),
    };
    Ok(arg)
}

fn raw_value(matches: &ArgMatches, descriptor: &ArgumentDescriptor) -> Option<RawValue> {
    let id = descriptor.name();
    match descriptor.shape() {
        Shape::Scalar(_) => matches.get_one::<String>(id).cloned().map(RawValue::Text),
        Shape::List(_) | Shape::Tuple(_) => matches
            .get_many::<String>(id)
            .map(|values| RawValue::Items(values.cloned().collect())),
        Shape::ListOfTuples(_) => matches.get_occurrences::<String>(id).map(|occurrences| {
            RawValue::Groups(
                occurrences
                    .map(|occurrence| occurrence.cloned().collect())
                    .collect(),
            )
        }),
    }
}

impl OptionReader for ClapReader {
    fn read(
        &self,
        descriptors: &[ArgumentDescriptor],
        tokens: &[String],
    ) -> Result<HashMap<String, RawValue>> {
        let matches = self.command(descriptors)?.try_get_matches_from(tokens)?;

        let values: HashMap<String, RawValue> = descriptors
            .iter()
            .filter_map(|descriptor| {
                raw_value(&matches, descriptor).map(|raw| (descriptor.name().to_string(), raw))
            })
            .collect();
        tracing::debug!(
            given = values.len(),
            declared = descriptors.len(),
            "Read command-line options"
        );
        Ok(values)
    }
}
