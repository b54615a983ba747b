//! Quoting-aware splitting of raw list and tuple values.
//!
//! Two grammars are layered here:
//!
//! - **Tuple fields** are separated by whitespace with POSIX shell quoting:
//!   `'single'` quotes are literal, `"double"` quotes allow `\"` and `\\`
//!   escapes, and a backslash outside quotes escapes any character.
//! - **List elements** are separated by [`LIST_DELIMITER`]. Delimiters inside
//!   quotes or escaped with a backslash do not split. Each element is then
//!   shell-split on its own.
//!
//! A doubled delimiter (`;;`) is rewritten to `; ;` before splitting, so the
//! text on either side always lands in separate elements. Elements that hold
//! no words after shell splitting are separator artefacts and are dropped.
//!
//! ```text
//! "a;b;c"   -> ["a", "b", "c"]
//! "a;;b"    -> ["a", "b"]
//! ""        -> [""]
//! "1 2;3 4" -> [["1", "2"], ["3", "4"]]   (list of 2-tuples)
//! ```

use crate::{Error, Result};

/// Separator between list elements.
pub const LIST_DELIMITER: char = ';';

/// Reasons shell splitting can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("no closing quotation")]
    UnclosedQuote,

    #[error("no escaped character")]
    DanglingEscape,
}

fn is_shell_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Split `input` into words using POSIX shell quoting rules.
///
/// An input made only of whitespace yields no words; `''` yields one empty word.
///
/// # Example
///
/// ```
/// use script_args_core::tokenizer::shell_split;
///
/// let words = shell_split(r#"5 "hello world" it\'s"#).unwrap();
/// assert_eq!(words, vec!["5", "hello world", "it's"]);
/// ```
pub fn shell_split(input: &str) -> std::result::Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some('\'') => {
                if c == '\'' {
                    quote = None;
                } else {
                    current.push(c);
                }
            }
            Some(_) => match c {
                '"' => quote = None,
                '\\' => match chars.next() {
                    Some(next @ ('"' | '\\')) => current.push(next),
                    Some(next) => {
                        current.push('\\');
                        current.push(next);
                    }
                    None => return Err(SplitError::UnclosedQuote),
                },
                _ => current.push(c),
            },
            None => {
                if is_shell_whitespace(c) {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                    continue;
                }
                in_word = true;
                match c {
                    '\\' => match chars.next() {
                        Some(next) => current.push(next),
                        None => return Err(SplitError::DanglingEscape),
                    },
                    '\'' | '"' => quote = Some(c),
                    _ => current.push(c),
                }
            }
        }
    }

    if quote.is_some() {
        return Err(SplitError::UnclosedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Tracks quoting while scanning raw text without interpreting it.
#[derive(Default)]
struct QuoteScanner {
    quote: Option<char>,
    escaped: bool,
}

impl QuoteScanner {
    /// Feed one character; returns `true` if it sits outside quotes and escapes.
    fn is_bare(&mut self, c: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match self.quote {
            Some('\'') => {
                if c == '\'' {
                    self.quote = None;
                }
                false
            }
            Some(_) => {
                match c {
                    '"' => self.quote = None,
                    '\\' => self.escaped = true,
                    _ => {}
                }
                false
            }
            None => match c {
                '\\' => {
                    self.escaped = true;
                    false
                }
                '\'' | '"' => {
                    self.quote = Some(c);
                    false
                }
                _ => true,
            },
        }
    }
}

/// Rewrite every bare `;;` to `; ;`, repeatedly, so runs of delimiters are
/// separated by whitespace.
fn separate_doubled_delimiters(raw: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut scanner = QuoteScanner::default();
    let mut previous_was_delimiter = false;

    for c in raw.chars() {
        let bare_delimiter = scanner.is_bare(c) && c == delimiter;
        if bare_delimiter && previous_was_delimiter {
            out.push(' ');
        }
        out.push(c);
        previous_was_delimiter = bare_delimiter;
    }
    out
}

/// Split on bare delimiters, keeping quotes and escapes in each field.
fn split_fields(raw: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut scanner = QuoteScanner::default();

    for c in raw.chars() {
        if scanner.is_bare(c) && c == delimiter {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}

/// One list element: the raw field text and its shell words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListField {
    pub raw: String,
    pub words: Vec<String>,
}

fn malformed(name: &str, raw: &str, reason: SplitError) -> Error {
    Error::MalformedValue {
        name: name.to_string(),
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// Split a raw list value into its element fields.
///
/// An empty raw string, or one holding nothing but separators and
/// whitespace, yields a single empty field.
pub fn list_fields(name: &str, raw: &str) -> Result<Vec<ListField>> {
    let empty = || ListField {
        raw: String::new(),
        words: Vec::new(),
    };
    if raw.is_empty() {
        return Ok(vec![empty()]);
    }

    let spaced = separate_doubled_delimiters(raw, LIST_DELIMITER);
    let mut fields = Vec::new();
    for field in split_fields(&spaced, LIST_DELIMITER) {
        let words = shell_split(&field).map_err(|e| malformed(name, raw, e))?;
        if words.is_empty() {
            continue;
        }
        fields.push(ListField { raw: field, words });
    }

    if fields.is_empty() {
        fields.push(empty());
    }
    Ok(fields)
}

/// Split a raw `list[T]` value into element strings.
///
/// Each element is the first shell word of its field; an empty field becomes
/// an empty string.
pub fn split_list(name: &str, raw: &str) -> Result<Vec<String>> {
    let elements = list_fields(name, raw)?
        .into_iter()
        .map(|field| field.words.into_iter().next().unwrap_or_default())
        .collect();
    tracing::trace!(name, raw, ?elements, "Split list value");
    Ok(elements)
}

/// Check that `fields` matches the declared tuple `arity`.
pub fn check_arity(
    name: &str,
    fields: Vec<String>,
    arity: usize,
    raw: &str,
    position: Option<usize>,
) -> Result<Vec<String>> {
    if fields.len() != arity {
        return Err(Error::ArityMismatch {
            name: name.to_string(),
            expected: arity,
            actual: fields.len(),
            raw: raw.to_string(),
            position,
        });
    }
    Ok(fields)
}

fn tuple_from_words(words: Vec<String>) -> Vec<String> {
    if words.is_empty() {
        vec![String::new()]
    } else {
        words
    }
}

/// Split a raw `tuple[...]` value into exactly `arity` fields.
///
/// An empty raw string yields one empty field, which only satisfies a
/// one-field tuple.
pub fn split_tuple(name: &str, raw: &str, arity: usize) -> Result<Vec<String>> {
    split_tuple_at(name, raw, arity, None)
}

/// Like [`split_tuple`], recording the list `position` on arity errors.
pub fn split_tuple_at(
    name: &str,
    raw: &str,
    arity: usize,
    position: Option<usize>,
) -> Result<Vec<String>> {
    let words = shell_split(raw).map_err(|e| malformed(name, raw, e))?;
    check_arity(name, tuple_from_words(words), arity, raw, position)
}

/// Split a raw `list[tuple[...]]` value: list splitting first, then tuple
/// splitting of every element.
pub fn split_list_of_tuples(name: &str, raw: &str, arity: usize) -> Result<Vec<Vec<String>>> {
    list_fields(name, raw)?
        .into_iter()
        .enumerate()
        .map(|(position, field)| {
            check_arity(
                name,
                tuple_from_words(field.words),
                arity,
                field.raw.trim(),
                Some(position),
            )
        })
        .collect()
}
