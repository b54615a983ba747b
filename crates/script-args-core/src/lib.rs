//! Schema-driven resolution of script arguments
//!
//! This crate turns a declarative list of [`ArgumentDescriptor`]s and a set of
//! command-line tokens into typed values:
//!
//! - **Fallback chain**: command-line value, then environment variable, then
//!   declared default, then absent
//! - **Shapes**: scalars (`str`, `int`, `bool`, `switch`), `list[T]`,
//!   `tuple[T1, ...]` and `list[tuple[T1, ...]]`
//! - **Tokenizer**: quoting-aware splitting of list and tuple text
//! - **Loose booleans**: only `0`, `False` and the empty string are false
//!
//! # Architecture
//!
//! ```text
//!   Schema (TOML) ──> ArgumentDescriptor[]
//!                          │
//!   tokens ──> OptionReader ──> RawValue ──> fallback (Environment, default)
//!                                                 │
//!                                      tokenizer ──> coerce ──> ResolvedValues
//! ```
//!
//! # Example
//!
//! ```
//! use script_args_core::{Schema, Value};
//!
//! let schema = Schema::parse(r#"
//! [tags]
//! type = "list[str]"
//! cli_arg = "--tags"
//! default_value = "a;b;c"
//! "#).unwrap();
//!
//! let values = schema.resolve(Vec::<String>::new()).unwrap();
//! assert_eq!(
//!     values.get("tags"),
//!     Some(&Value::List(vec!["a".into(), "b".into(), "c".into()]))
//! );
//! ```

pub mod coerce;
pub mod descriptor;
pub mod engine;
pub mod env;
pub mod error;
pub mod reader;
pub mod schema;
pub mod tokenizer;
pub mod value;

pub use coerce::str_to_bool;
pub use descriptor::{ArgumentDescriptor, ScalarKind, Shape};
pub use engine::{Resolver, resolve};
pub use env::{Environment, ProcessEnv};
pub use error::{Error, Result};
pub use reader::{ClapReader, OptionReader, RawValue};
pub use schema::Schema;
pub use tokenizer::{LIST_DELIMITER, shell_split, split_list, split_list_of_tuples, split_tuple};
pub use value::{ResolvedValues, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_error_names_argument_and_position() {
        let error = Error::ArityMismatch {
            name: "points".to_string(),
            expected: 2,
            actual: 3,
            raw: "1 2 3".to_string(),
            position: Some(1),
        };
        assert_eq!(
            error.to_string(),
            "Tuple points (list element 1) expected 2 values and got 3: 1 2 3"
        );
        assert_eq!(error.argument(), Some("points"));
    }
}
