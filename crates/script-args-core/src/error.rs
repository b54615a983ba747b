//! Error types for script-args-core

use std::path::PathBuf;

/// Result type for script-args-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building descriptors or resolving values
///
/// Every variant is fatal to a resolution run; the engine never returns a
/// partially filled mapping.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed declaration: unknown scalar kind, empty tuple, bad nesting,
    /// unusable option name or non-scalar default
    #[error("Invalid schema for argument '{name}': {reason}")]
    InvalidSchema { name: String, reason: String },

    /// Tuple field count disagrees with the declared arity
    #[error(
        "Tuple {name}{} expected {expected} values and got {actual}: {raw}",
        list_position(.position)
    )]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
        raw: String,
        /// Zero-based list position when the tuple is an element of a list
        position: Option<usize>,
    },

    /// Scalar conversion failure
    #[error("Cannot convert '{value}' to {kind} for argument '{name}'")]
    TypeError {
        name: String,
        kind: String,
        value: String,
    },

    /// Raw text could not be shell-split
    #[error("Malformed value for argument '{name}': {reason}: {raw}")]
    MalformedValue {
        name: String,
        raw: String,
        reason: String,
    },

    /// The option reader returned a raw form that cannot fit the declared shape
    #[error("Unexpected raw value shape for argument '{name}', expected {expected}")]
    UnexpectedShape { name: String, expected: String },

    /// Two descriptors share a name
    #[error("Duplicate argument name: {name}")]
    DuplicateName { name: String },

    /// Schema file not found at the given path
    #[error("Schema not found at {path}")]
    SchemaNotFound { path: PathBuf },

    /// Command-line tokens rejected by the option reader
    #[error(transparent)]
    CommandLine(#[from] clap::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

fn list_position(position: &Option<usize>) -> String {
    match position {
        Some(index) => format!(" (list element {index})"),
        None => String::new(),
    }
}

impl Error {
    /// Name of the argument the error concerns, if any
    pub fn argument(&self) -> Option<&str> {
        match self {
            Error::InvalidSchema { name, .. }
            | Error::ArityMismatch { name, .. }
            | Error::TypeError { name, .. }
            | Error::MalformedValue { name, .. }
            | Error::UnexpectedShape { name, .. }
            | Error::DuplicateName { name } => Some(name),
            Error::SchemaNotFound { .. }
            | Error::CommandLine(_)
            | Error::Io(_)
            | Error::TomlDe(_) => None,
        }
    }
}
