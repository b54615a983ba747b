//! Typed values and the resolved mapping

use serde::Serialize;
use std::collections::BTreeMap;

/// A coerced argument value.
///
/// Serializes to the natural JSON shape: strings, numbers, booleans and arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    /// Fixed-arity tuple, in declared field order
    Tuple(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Items of a list or fields of a tuple.
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Final mapping from argument name to typed value, or `None` when absent.
///
/// Keys iterate in sorted order. Absent values serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedValues {
    values: BTreeMap<String, Option<Value>>,
}

impl ResolvedValues {
    pub(crate) fn insert(&mut self, name: String, value: Option<Value>) {
        self.values.insert(name, value);
    }

    /// Value for `name`; `None` if absent or undeclared.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// `true` if `name` was declared but nothing resolved for it.
    pub fn is_absent(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(None))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn into_inner(self) -> BTreeMap<String, Option<Value>> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_serialize_to_plain_json() {
        let mut resolved = ResolvedValues::default();
        resolved.insert("count".into(), Some(Value::Int(3)));
        resolved.insert(
            "pairs".into(),
            Some(Value::List(vec![Value::Tuple(vec![
                Value::Int(1),
                Value::from("x"),
            ])])),
        );
        resolved.insert("missing".into(), None);

        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(
            json,
            json!({"count": 3, "pairs": [[1, "x"]], "missing": null})
        );
    }

    #[test]
    fn absent_is_distinct_from_undeclared() {
        let mut resolved = ResolvedValues::default();
        resolved.insert("a".into(), None);
        assert!(resolved.is_absent("a"));
        assert!(!resolved.is_absent("b"));
        assert!(resolved.contains("a"));
        assert!(resolved.get("a").is_none());
    }
}
