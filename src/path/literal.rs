//! Literal classification for key and argument text.

use crate::error::ParseError;
use crate::object::Value;

/// What a piece of key or argument text denotes.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<'a> {
    Null,
    Bool(bool),
    /// Contents between the quotes, verbatim.
    Str(&'a str),
    Int(i64),
    Float(f64),
    /// Not a literal: a nested path to resolve.
    Path(&'a str),
}

impl Literal<'_> {
    /// The literal's value, or `None` for a nested path.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Literal::Null => Some(Value::Null),
            Literal::Bool(b) => Some(Value::Bool(b)),
            Literal::Str(s) => Some(Value::Str(s.to_string())),
            Literal::Int(i) => Some(Value::Int(i)),
            Literal::Float(f) => Some(Value::Float(f)),
            Literal::Path(_) => None,
        }
    }
}

/// Classifies `text`, first match wins: `null`, `true`/`false`, a double
/// quoted string (no escapes), an integer, a float, otherwise a path.
///
/// Surrounding whitespace is ignored. Text that starts like a number (a
/// digit, or a sign or `.` followed by a digit) must parse as one.
pub fn classify(text: &str) -> Result<Literal<'_>, ParseError> {
    let text = text.trim();
    match text {
        "null" => return Ok(Literal::Null),
        "true" => return Ok(Literal::Bool(true)),
        "false" => return Ok(Literal::Bool(false)),
        _ => {}
    }
    if text.len() > 1 && text.starts_with('"') && text.ends_with('"') {
        return Ok(Literal::Str(&text[1..text.len() - 1]));
    }
    if !looks_numeric(text) {
        return Ok(Literal::Path(text));
    }
    if let Ok(i) = text.parse::<i64>() {
        return Ok(Literal::Int(i));
    }
    if let Ok(f) = text.parse::<f64>() {
        return Ok(Literal::Float(f));
    }
    Err(ParseError::MalformedNumber {
        text: text.to_string(),
    })
}

fn looks_numeric(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-' | '+' | '.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}
