//! Path element types produced by the tokenizer.

use crate::object::Value;

/// What a path element does to the value it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Named member read (`.name`).
    Property,
    /// Position or key read (`[key]`).
    Key,
    /// Invocation of the preceding member reference (`(args)`).
    Call,
}

/// One step of a path expression.
///
/// When `needs_eval` is set, `text` is itself an expression (a key, or a
/// comma-separated argument list) evaluated against the resolution root.
/// Otherwise keys and arguments come from `literal_args`, which lets callers
/// hand over values that have already been evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    kind: ElementKind,
    text: String,
    needs_eval: bool,
    literal_args: Vec<Value>,
}

impl PathElement {
    /// A property read by name.
    pub fn property(name: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Property,
            text: name.into(),
            needs_eval: false,
            literal_args: Vec::new(),
        }
    }

    /// A key or index read with an already evaluated key.
    pub fn key(key: Value) -> Self {
        Self {
            kind: ElementKind::Key,
            text: String::new(),
            needs_eval: false,
            literal_args: vec![key],
        }
    }

    /// A call with already evaluated arguments.
    pub fn call(args: Vec<Value>) -> Self {
        Self {
            kind: ElementKind::Call,
            text: String::new(),
            needs_eval: false,
            literal_args: args,
        }
    }

    /// A key or call whose bracket interior is evaluated at resolution time.
    pub fn evaluated(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            needs_eval: kind != ElementKind::Property,
            literal_args: Vec::new(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn needs_eval(&self) -> bool {
        self.needs_eval
    }

    pub fn literal_args(&self) -> &[Value] {
        &self.literal_args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ScriptError, TypeError};
    use crate::path::Resolver;
    use crate::sample;

    #[test]
    fn test_key_element_needs_exactly_one_key() {
        let resolver = Resolver::default();
        let world = sample::world();
        for keys in [vec![], vec![Value::Int(0), Value::Int(1)]] {
            let count = keys.len();
            let path = vec![
                PathElement::property("civilizations"),
                PathElement {
                    kind: ElementKind::Key,
                    text: String::new(),
                    needs_eval: false,
                    literal_args: keys,
                },
            ];
            assert_eq!(
                resolver.resolve(&world, &path).unwrap_err(),
                ScriptError::Type(TypeError::KeyCount { count })
            );
        }
    }
}
