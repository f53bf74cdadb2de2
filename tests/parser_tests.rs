//! Integration tests for path tokenizing and argument splitting.

use scriptquill::error::ParseError;
use scriptquill::object::Value;
use scriptquill::path::{
    classify, split_toplevel, stringify, tokenize, ElementKind, Literal, PathElement,
};

fn kinds(path: &[PathElement]) -> Vec<ElementKind> {
    path.iter().map(PathElement::kind).collect()
}

/// Test that a nested key keeps its interior as raw text.
#[test]
fn test_nested_key_element() {
    let path = tokenize("a[b[1]].c").unwrap();
    assert_eq!(path.len(), 3);
    assert_eq!(path[0], PathElement::property("a"));
    assert_eq!(path[1].kind(), ElementKind::Key);
    assert_eq!(path[1].text(), "b[1]");
    assert!(path[1].needs_eval());
    assert_eq!(path[2], PathElement::property("c"));
}

/// Test element kinds for a mixed path.
#[test]
fn test_mixed_path_kinds() {
    let path = tokenize("civilizations[0].cities[1].civ.addGold(5)").unwrap();
    assert_eq!(
        kinds(&path),
        vec![
            ElementKind::Property,
            ElementKind::Key,
            ElementKind::Property,
            ElementKind::Key,
            ElementKind::Property,
            ElementKind::Property,
            ElementKind::Call,
        ]
    );
}

/// Test that adjacent groups never produce empty properties between them.
#[test]
fn test_adjacent_groups() {
    let path = tokenize("grid[1][2](3)").unwrap();
    assert_eq!(
        kinds(&path),
        vec![ElementKind::Property, ElementKind::Key, ElementKind::Key, ElementKind::Call]
    );
    assert!(path.iter().all(|element| element.kind() != ElementKind::Property
        || !element.text().is_empty()));
}

/// Test root-level indexing.
#[test]
fn test_leading_bracket_group() {
    let path = tokenize("[3]").unwrap();
    assert_eq!(kinds(&path), vec![ElementKind::Key]);
    assert_eq!(path[0].text(), "3");
}

/// Test that an unclosed group is reported where it opened.
#[test]
fn test_unclosed_group_position() {
    assert_eq!(
        tokenize("civ.addGold(f(1)"),
        Err(ParseError::UnclosedBrackets {
            position: 11,
            bracket: '('
        })
    );
}

/// Test splitting on commas outside of either bracket kind.
#[test]
fn test_split_arguments() {
    let parts = split_toplevel("a[1, 2], f(x, y[0]), \"s\"", &[',']).unwrap();
    assert_eq!(parts, vec!["a[1, 2]", " f(x, y[0])", " \"s\""]);
}

/// Test that mismatched closers are rejected by the splitter.
#[test]
fn test_split_rejects_crossed_brackets() {
    assert!(matches!(
        split_toplevel("f(a[1)]", &[',']),
        Err(ParseError::UnexpectedBracket { found: ')', .. })
    ));
    assert!(matches!(
        split_toplevel("x)", &[',']),
        Err(ParseError::UnexpectedBracket { position: 1, .. })
    ));
}

/// Test literal classification order.
#[test]
fn test_classify_order() {
    assert_eq!(classify("\"null\"").unwrap(), Literal::Str("null"));
    assert_eq!(classify("10").unwrap(), Literal::Int(10));
    assert_eq!(classify("10.0").unwrap(), Literal::Float(10.0));
    assert_eq!(classify("truthy").unwrap(), Literal::Path("truthy"));
    assert!(matches!(classify("1.2.3"), Err(ParseError::MalformedNumber { .. })));
}

/// Test that stringify reproduces tokenized text and renders literal elements.
#[test]
fn test_stringify_round_trip() {
    for text in ["civ.cities[0].name", "a[b[1]].c", "civ.tech.isResearched(\"Writing\")"] {
        assert_eq!(stringify(&tokenize(text).unwrap()), text);
    }
    let path = vec![PathElement::key(Value::Int(2)), PathElement::property("gold")];
    assert_eq!(stringify(&path), "[2].gold");
}
