//! Conversion of tokenized text into typed values

use crate::descriptor::ScalarKind;
use crate::value::Value;
use crate::{Error, Result};

/// Loose boolean parse.
///
/// `"0"` and `"False"` are false, `"1"` and `"True"` are true, the empty
/// string is false, and every other string is true. Matching is exact and
/// case-sensitive, so `"false"` is true.
pub fn str_to_bool(value: &str) -> bool {
    match value {
        "0" | "False" => false,
        "1" | "True" => true,
        other => !other.is_empty(),
    }
}

/// Convert one fragment according to `kind`.
pub fn coerce_scalar(name: &str, kind: ScalarKind, raw: &str) -> Result<Value> {
    let value = match kind {
        ScalarKind::Str => Value::Str(raw.to_string()),
        ScalarKind::Int => {
            Value::Int(raw.trim().parse::<i64>().map_err(|_| Error::TypeError {
                name: name.to_string(),
                kind: kind.to_string(),
                value: raw.to_string(),
            })?)
        }
        ScalarKind::Bool | ScalarKind::Switch => Value::Bool(str_to_bool(raw)),
    };
    tracing::trace!(name, %kind, raw, ?value, "Coerced value");
    Ok(value)
}

/// Convert tuple fields positionally against the declared kinds.
///
/// The caller has already checked arity.
pub fn coerce_tuple(name: &str, kinds: &[ScalarKind], fields: &[String]) -> Result<Value> {
    kinds
        .iter()
        .zip(fields)
        .map(|(kind, field)| coerce_scalar(name, *kind, field))
        .collect::<Result<Vec<_>>>()
        .map(Value::Tuple)
}

pub fn coerce_list(name: &str, kind: ScalarKind, items: &[String]) -> Result<Value> {
    items
        .iter()
        .map(|item| coerce_scalar(name, kind, item))
        .collect::<Result<Vec<_>>>()
        .map(Value::List)
}

pub fn coerce_list_of_tuples(
    name: &str,
    kinds: &[ScalarKind],
    groups: &[Vec<String>],
) -> Result<Value> {
    groups
        .iter()
        .map(|fields| coerce_tuple(name, kinds, fields))
        .collect::<Result<Vec<_>>>()
        .map(Value::List)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_accepts_sign_and_padding() {
        assert_eq!(
            coerce_scalar("n", ScalarKind::Int, " -42 ").unwrap(),
            Value::Int(-42)
        );
        assert_eq!(
            coerce_scalar("n", ScalarKind::Int, "+7").unwrap(),
            Value::Int(7)
        );
    }

    #[test]
    fn int_rejects_non_numeric_text() {
        let err = coerce_scalar("n", ScalarKind::Int, "4x").unwrap_err();
        assert!(matches!(err, Error::TypeError { ref value, .. } if value == "4x"));
        assert_eq!(err.to_string(), "Cannot convert '4x' to int for argument 'n'");
    }

    #[test]
    fn bool_is_case_sensitive() {
        assert!(str_to_bool("false"));
        assert!(str_to_bool("TRUE"));
        assert!(!str_to_bool("False"));
    }

    #[test]
    fn tuple_coerces_positionally() {
        let fields = vec!["5".to_string(), "hello".to_string()];
        let value = coerce_tuple("t", &[ScalarKind::Int, ScalarKind::Str], &fields).unwrap();
        assert_eq!(value, Value::Tuple(vec![Value::Int(5), Value::from("hello")]));
    }
}
