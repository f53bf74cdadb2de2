//! Error types for path parsing, resolution, and dispatch.
//!
//! Every failure reaches the caller as a typed error; nothing is coerced
//! to null. `ScriptError` is the umbrella type returned by the resolver and
//! by host objects.

use std::error::Error;
use std::fmt;

/// Errors raised while splitting path or argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A bracket group opened at `position` was never closed.
    UnclosedBrackets { position: usize, bracket: char },
    /// A closing bracket did not match the innermost open group.
    UnexpectedBracket {
        position: usize,
        found: char,
        text: String,
    },
    /// Text that starts like a number but is not one.
    MalformedNumber { text: String },
    /// An argument list has an empty slot, as in `f(a,)`.
    BlankArgument { index: usize, text: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnclosedBrackets { position, bracket } => {
                write!(f, "Unclosed brackets: '{}' opened at position {}", bracket, position)
            }
            ParseError::UnexpectedBracket {
                position,
                found,
                text,
            } => write!(
                f,
                "Unexpected bracket '{}' at position {} in: {}",
                found, position, text
            ),
            ParseError::MalformedNumber { text } => {
                write!(f, "Malformed numeric literal: {}", text)
            }
            ParseError::BlankArgument { index, text } => {
                write!(f, "Blank argument {} in: ({})", index, text)
            }
        }
    }
}

impl Error for ParseError {}

/// Errors raised when a name, index, or key does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    UnknownMember { type_name: String, name: String },
    IndexOutOfRange { index: i64, len: usize },
    UnknownKey { type_name: String, key: String },
}

impl ResolutionError {
    pub fn unknown_member(type_name: &str, name: &str) -> Self {
        ResolutionError::UnknownMember {
            type_name: type_name.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::UnknownMember { type_name, name } => {
                write!(f, "{} has no member named '{}'", type_name, name)
            }
            ResolutionError::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for length {}", index, len)
            }
            ResolutionError::UnknownKey { type_name, key } => {
                write!(f, "{} has no key '{}'", type_name, key)
            }
        }
    }
}

impl Error for ResolutionError {}

/// Errors raised when a value has the wrong shape for an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A call element was applied to something other than a method reference.
    NotInvocable { found: String },
    /// A method reference was called without an object receiver.
    NoReceiver { method: String, found: String },
    /// A property was read from a value that has no members.
    NotAnObject { name: String, found: String },
    NotASequence { type_name: String },
    NotAMapping { type_name: String },
    /// A mapping was indexed with a key it cannot hold.
    KeyShape { type_name: String, key_type: String },
    ReadOnlyProperty { type_name: String, name: String },
    PropertyType {
        name: String,
        expected: String,
        found: String,
    },
    /// The last element of an assignment path is not a property.
    UnsupportedAssignmentTarget { target: String },
    /// A pre-evaluated key element carries no key, or more than one.
    KeyCount { count: usize },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::NotInvocable { found } => {
                write!(f, "Cannot call a value of type {}", found)
            }
            TypeError::NoReceiver { method, found } => {
                write!(f, "Cannot bind {} to a receiver of type {}", method, found)
            }
            TypeError::NotAnObject { name, found } => {
                write!(f, "Cannot read '{}' from a value of type {}", name, found)
            }
            TypeError::NotASequence { type_name } => {
                write!(f, "{} cannot be indexed by position", type_name)
            }
            TypeError::NotAMapping { type_name } => {
                write!(f, "{} cannot be indexed by key", type_name)
            }
            TypeError::KeyShape { type_name, key_type } => {
                write!(f, "{} cannot be indexed by a key of type {}", type_name, key_type)
            }
            TypeError::ReadOnlyProperty { type_name, name } => {
                write!(f, "{}.{} is read-only", type_name, name)
            }
            TypeError::PropertyType {
                name,
                expected,
                found,
            } => write!(
                f,
                "Cannot assign a value of type {} to '{}' of type {}",
                found, name, expected
            ),
            TypeError::UnsupportedAssignmentTarget { target } => {
                write!(f, "Unsupported assignment target: {}", target)
            }
            TypeError::KeyCount { count } => {
                write!(f, "A key element takes exactly one key, got {}", count)
            }
        }
    }
}

impl Error for TypeError {}

/// Errors raised while choosing an overload for a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    NoMatchingSignature {
        member: String,
        arguments: Vec<String>,
    },
    AmbiguousSignature {
        member: String,
        arguments: Vec<String>,
        candidates: Vec<String>,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoMatchingSignature { member, arguments } => write!(
                f,
                "No matching signatures found for calling {} with given arguments: ({})",
                member,
                arguments.join(", ")
            ),
            DispatchError::AmbiguousSignature {
                member,
                arguments,
                candidates,
            } => {
                write!(
                    f,
                    "Multiple matching signatures found for calling {} with given arguments:\n\t({})",
                    member,
                    arguments.join(", ")
                )?;
                for candidate in candidates {
                    write!(f, "\n\t{}", candidate)?;
                }
                Ok(())
            }
        }
    }
}

impl Error for DispatchError {}

/// Any failure while evaluating a path against a host object graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    Parse(ParseError),
    Resolution(ResolutionError),
    Type(TypeError),
    Dispatch(DispatchError),
    /// Raised by a host member while it was being invoked.
    Invocation { message: String },
}

impl ScriptError {
    pub fn invocation(message: impl Into<String>) -> Self {
        ScriptError::Invocation {
            message: message.into(),
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Parse(e) => write!(f, "Parse error: {}", e),
            ScriptError::Resolution(e) => write!(f, "Resolution error: {}", e),
            ScriptError::Type(e) => write!(f, "Type error: {}", e),
            ScriptError::Dispatch(e) => write!(f, "Dispatch error: {}", e),
            ScriptError::Invocation { message } => write!(f, "Invocation failed: {}", message),
        }
    }
}

// Display already includes the wrapped error, so it is not repeated as a source.
impl Error for ScriptError {}

impl From<ParseError> for ScriptError {
    fn from(e: ParseError) -> Self {
        ScriptError::Parse(e)
    }
}

impl From<ResolutionError> for ScriptError {
    fn from(e: ResolutionError) -> Self {
        ScriptError::Resolution(e)
    }
}

impl From<TypeError> for ScriptError {
    fn from(e: TypeError) -> Self {
        ScriptError::Type(e)
    }
}

impl From<DispatchError> for ScriptError {
    fn from(e: DispatchError) -> Self {
        ScriptError::Dispatch(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_signature_message() {
        let err = DispatchError::NoMatchingSignature {
            member: "Civilization.addGold".to_string(),
            arguments: vec!["String".to_string(), "Null".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "No matching signatures found for calling Civilization.addGold with given arguments: (String, Null)"
        );
    }

    #[test]
    fn test_ambiguous_lists_every_candidate() {
        let err = DispatchError::AmbiguousSignature {
            member: "T.meth".to_string(),
            arguments: vec!["Int".to_string()],
            candidates: vec!["meth(Any)".to_string(), "meth(Any?)".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains("meth(Any)"));
        assert!(text.contains("meth(Any?)"));
    }

    #[test]
    fn test_script_error_wraps_message() {
        let err: ScriptError = ParseError::MalformedNumber {
            text: "1x".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Parse error: Malformed numeric literal: 1x");
        assert!(err.source().is_none());
    }
}
