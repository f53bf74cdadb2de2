//! Path expression tokenizer.
//!
//! A path is a run of names separated by `.`, with bracket groups attached:
//! `[...]` becomes a key element and `(...)` a call element. Bracket
//! interiors are kept as raw text and evaluated later, so they may hold any
//! nested path, including further bracket groups of the same kind.

use log::trace;

use super::ast::{ElementKind, PathElement};
use crate::error::ParseError;

/// Bracket pairs that open a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    Square,
    Round,
}

impl Bracket {
    fn opened_by(ch: char) -> Option<Self> {
        match ch {
            '[' => Some(Bracket::Square),
            '(' => Some(Bracket::Round),
            _ => None,
        }
    }

    fn open(self) -> char {
        match self {
            Bracket::Square => '[',
            Bracket::Round => '(',
        }
    }

    fn close(self) -> char {
        match self {
            Bracket::Square => ']',
            Bracket::Round => ')',
        }
    }

    fn kind(self) -> ElementKind {
        match self {
            Bracket::Square => ElementKind::Key,
            Bracket::Round => ElementKind::Call,
        }
    }
}

/// Raw segment text and the byte offset it starts at.
#[derive(Debug, Default)]
struct Token {
    position: usize,
    text: String,
}

impl Token {
    fn push(&mut self, position: usize, ch: char) {
        if self.text.is_empty() {
            self.position = position;
        }
        self.text.push(ch);
    }

    fn take(&mut self) -> Token {
        std::mem::take(self)
    }
}

/// An open bracket group: which bracket, where it opened, nesting depth.
#[derive(Debug, Clone, Copy)]
struct Group {
    bracket: Bracket,
    position: usize,
    depth: usize,
}

/// Single-pass tokenizer for path strings.
pub struct Parser {
    elements: Vec<PathElement>,
    buffer: Token,
    group: Option<Group>,
    just_closed: bool,
}

impl Parser {
    fn new() -> Self {
        Self {
            elements: Vec::new(),
            buffer: Token::default(),
            group: None,
            // A leading `.` or bracket group has nothing before it to flush.
            just_closed: true,
        }
    }

    /// Splits a path string into its elements.
    pub fn parse(text: &str) -> Result<Vec<PathElement>, ParseError> {
        let mut parser = Parser::new();
        for (position, ch) in text.char_indices() {
            parser.feed(position, ch);
        }
        parser.finish()
    }

    fn feed(&mut self, position: usize, ch: char) {
        match self.group.as_mut() {
            None => {
                if ch == '.' {
                    self.flush_property();
                    self.just_closed = false;
                } else if let Some(bracket) = Bracket::opened_by(ch) {
                    self.flush_property();
                    self.group = Some(Group {
                        bracket,
                        position,
                        depth: 1,
                    });
                    self.just_closed = false;
                } else {
                    self.buffer.push(position, ch);
                    self.just_closed = false;
                }
            }
            Some(group) => {
                if ch == group.bracket.close() {
                    group.depth -= 1;
                    if group.depth == 0 {
                        let kind = group.bracket.kind();
                        self.group = None;
                        let token = self.buffer.take();
                        trace!("{:?} group at {}: {:?}", kind, token.position, token.text);
                        self.elements.push(PathElement::evaluated(kind, token.text));
                        self.just_closed = true;
                        return;
                    }
                } else if ch == group.bracket.open() {
                    group.depth += 1;
                }
                self.buffer.push(position, ch);
            }
        }
    }

    /// Emits the buffer as a property, unless a bracket group just closed.
    fn flush_property(&mut self) {
        let token = self.buffer.take();
        if !self.just_closed {
            self.elements.push(PathElement::property(token.text));
        }
    }

    fn finish(mut self) -> Result<Vec<PathElement>, ParseError> {
        if let Some(group) = self.group {
            return Err(ParseError::UnclosedBrackets {
                position: group.position,
                bracket: group.bracket.open(),
            });
        }
        self.flush_property();
        Ok(self.elements)
    }
}

/// Splits a path string into its elements.
pub fn tokenize(text: &str) -> Result<Vec<PathElement>, ParseError> {
    Parser::parse(text)
}

/// Splits `text` on any of `delimiters` that are not inside a bracket group.
///
/// Both bracket kinds are tracked here, and a closing bracket that does not
/// match the innermost open one is an error. Blank input yields no parts.
pub fn split_toplevel(text: &str, delimiters: &[char]) -> Result<Vec<String>, ParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut parts = Vec::new();
    let mut closers: Vec<char> = Vec::new();
    let mut current = String::new();
    for (position, ch) in text.char_indices() {
        if closers.is_empty() && delimiters.contains(&ch) {
            parts.push(std::mem::take(&mut current));
            continue;
        }
        current.push(ch);
        if ch == ']' || ch == ')' {
            if closers.last() == Some(&ch) {
                closers.pop();
            } else {
                return Err(ParseError::UnexpectedBracket {
                    position,
                    found: ch,
                    text: text.to_string(),
                });
            }
        } else if let Some(bracket) = Bracket::opened_by(ch) {
            closers.push(bracket.close());
        }
    }
    parts.push(current);
    Ok(parts)
}

/// Renders elements back into path text.
pub fn stringify(elements: &[PathElement]) -> String {
    let mut out = String::new();
    for element in elements {
        match element.kind() {
            ElementKind::Property => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(element.text());
            }
            ElementKind::Key => {
                out.push('[');
                if element.needs_eval() {
                    out.push_str(element.text());
                } else if let Some(key) = element.literal_args().first() {
                    out.push_str(&key.to_string());
                }
                out.push(']');
            }
            ElementKind::Call => {
                out.push('(');
                if element.needs_eval() {
                    out.push_str(element.text());
                } else {
                    let args: Vec<String> =
                        element.literal_args().iter().map(ToString::to_string).collect();
                    out.push_str(&args.join(", "));
                }
                out.push(')');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Value;

    fn property(name: &str) -> PathElement {
        PathElement::property(name)
    }

    fn key(text: &str) -> PathElement {
        PathElement::evaluated(ElementKind::Key, text)
    }

    fn call(text: &str) -> PathElement {
        PathElement::evaluated(ElementKind::Call, text)
    }

    #[test]
    fn test_parse_properties() {
        let path = tokenize("civ.cities").unwrap();
        assert_eq!(path, vec![property("civ"), property("cities")]);
    }

    #[test]
    fn test_parse_index() {
        let path = tokenize("civ.cities[0]").unwrap();
        assert_eq!(path, vec![property("civ"), property("cities"), key("0")]);
        assert!(path[2].needs_eval());
    }

    #[test]
    fn test_parse_call() {
        let path = tokenize("civ.tech.isResearched(\"Writing\")").unwrap();
        assert_eq!(
            path,
            vec![
                property("civ"),
                property("tech"),
                property("isResearched"),
                call("\"Writing\"")
            ]
        );
    }

    #[test]
    fn test_parse_nested_key() {
        let path = tokenize("a[b[1]].c").unwrap();
        assert_eq!(path, vec![property("a"), key("b[1]"), property("c")]);
    }

    #[test]
    fn test_parse_adjacent_groups() {
        let path = tokenize("a[0][1]").unwrap();
        assert_eq!(path, vec![property("a"), key("0"), key("1")]);
        let path = tokenize("f(1)(2)").unwrap();
        assert_eq!(path, vec![property("f"), call("1"), call("2")]);
    }

    #[test]
    fn test_parse_leading_group() {
        let path = tokenize("[0].name").unwrap();
        assert_eq!(path, vec![key("0"), property("name")]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_call_with_nested_call() {
        let path = tokenize("civ.addGold(civ.tech.techsResearched.size)").unwrap();
        assert_eq!(
            path,
            vec![
                property("civ"),
                property("addGold"),
                call("civ.tech.techsResearched.size")
            ]
        );
        let path = tokenize("a.f(g(1), h(2)).b").unwrap();
        assert_eq!(path, vec![property("a"), property("f"), call("g(1), h(2)"), property("b")]);
    }

    #[test]
    fn test_other_bracket_kind_is_not_counted() {
        let path = tokenize("m[f(0)]").unwrap();
        assert_eq!(path, vec![property("m"), key("f(0)")]);
    }

    #[test]
    fn test_parse_unclosed_fails() {
        assert_eq!(
            tokenize("a[b[1]"),
            Err(ParseError::UnclosedBrackets {
                position: 1,
                bracket: '['
            })
        );
        assert!(tokenize("f(").is_err());
    }

    #[test]
    fn test_split_toplevel() {
        assert_eq!(
            split_toplevel("1, f(2, 3), a[4]", &[',']).unwrap(),
            vec!["1", " f(2, 3)", " a[4]"]
        );
        assert!(split_toplevel("  ", &[',']).unwrap().is_empty());
        assert_eq!(split_toplevel("x", &[',']).unwrap(), vec!["x"]);
    }

    #[test]
    fn test_split_on_spaces() {
        let parts = split_toplevel("civ.gold = f(1, 2)", &[' ']).unwrap();
        assert_eq!(parts, vec!["civ.gold", "=", "f(1, 2)"]);
    }

    #[test]
    fn test_split_mismatched_bracket_fails() {
        assert!(matches!(
            split_toplevel("f(1]", &[',']),
            Err(ParseError::UnexpectedBracket { position: 3, found: ']', .. })
        ));
    }

    #[test]
    fn test_stringify() {
        let path = tokenize("civ.cities[0].name").unwrap();
        assert_eq!(stringify(&path), "civ.cities[0].name");
        let literal = vec![
            PathElement::property("civ"),
            PathElement::property("addNotification"),
            PathElement::call(vec![Value::from("Hi"), Value::Int(2)]),
        ];
        assert_eq!(stringify(&literal), "civ.addNotification(Hi, 2)");
    }
}
