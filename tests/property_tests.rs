//! Property-based tests for the tokenizer, the literal classifier, and
//! overload selection.

use proptest::prelude::*;

use scriptquill::dispatch::{Dispatcher, Overload, ParamType};
use scriptquill::error::{DispatchError, ParseError};
use scriptquill::object::types::{TypeInfo, ANY, ARRAY_LIST, LIST};
use scriptquill::object::{ScriptList, Value};
use scriptquill::path::{classify, tokenize, Literal};

static CUSTOM_LIST_SUPERTYPES: [&TypeInfo; 1] = [&ARRAY_LIST];
static CUSTOM_LIST: TypeInfo = TypeInfo::new("CustomList", "test.CustomList", &CUSTOM_LIST_SUPERTYPES);

/// Inserts enough `open` brackets into `text` that openers outnumber closers.
fn unbalance(text: &str, at: usize, open: char, close: char) -> String {
    let opens = text.chars().filter(|&c| c == open).count();
    let closes = text.chars().filter(|&c| c == close).count();
    let missing = closes.saturating_sub(opens) + 1;
    let chars: Vec<char> = text.chars().collect();
    let at = at % (chars.len() + 1);
    let mut out: String = chars[..at].iter().collect();
    out.extend(std::iter::repeat(open).take(missing));
    out.extend(&chars[at..]);
    out
}

proptest! {
    #[test]
    fn prop_unbalanced_square_brackets_fail(
        text in "[ab.\\[\\]]{0,24}",
        at in 0usize..32,
    ) {
        let text = unbalance(&text, at, '[', ']');
        prop_assert!(
            matches!(tokenize(&text), Err(ParseError::UnclosedBrackets { bracket: '[', .. })),
            "{:?} should not tokenize",
            text
        );
    }

    #[test]
    fn prop_unbalanced_round_brackets_fail(
        text in "[ab.()]{0,24}",
        at in 0usize..32,
    ) {
        let text = unbalance(&text, at, '(', ')');
        prop_assert!(
            matches!(tokenize(&text), Err(ParseError::UnclosedBrackets { bracket: '(', .. })),
            "{:?} should not tokenize",
            text
        );
    }

    #[test]
    fn prop_dotted_names_are_properties(
        names in proptest::collection::vec("[a-z][a-zA-Z0-9]{0,8}", 1..6)
    ) {
        let path = tokenize(&names.join(".")).unwrap();
        let texts: Vec<&str> = path.iter().map(|element| element.text()).collect();
        prop_assert_eq!(texts, names.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn prop_integers_classify_as_int(value in any::<i64>()) {
        let text = value.to_string();
        prop_assert_eq!(classify(&text).unwrap(), Literal::Int(value));
    }

    #[test]
    fn prop_arity_mismatch_never_matches(
        arities in proptest::collection::vec(0usize..4, 1..4),
        arg_count in 0usize..6,
    ) {
        prop_assume!(!arities.contains(&arg_count));
        let candidates: Vec<Overload> = arities
            .iter()
            .map(|&arity| Overload::new("candidate", vec![ParamType::nullable(&ANY); arity]))
            .collect();
        let args: Vec<Value> = (0..arg_count as i64).map(Value::Int).collect();
        let result = Dispatcher::default().select("meth", &candidates, &args);
        let is_no_match = matches!(result, Err(DispatchError::NoMatchingSignature { .. }));
        prop_assert!(is_no_match);
    }

    #[test]
    fn prop_most_derived_list_wins_in_any_order(
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
    ) {
        let all = [
            Overload::new("list", vec![ParamType::of(&LIST)]),
            Overload::new("arrayList", vec![ParamType::of(&ARRAY_LIST)]),
            Overload::new("customList", vec![ParamType::of(&CUSTOM_LIST)]),
        ];
        let candidates: Vec<Overload> = order.iter().map(|&i| all[i].clone()).collect();
        let dispatcher = Dispatcher::default();

        let custom = Value::object(ScriptList::with_type(&CUSTOM_LIST, Vec::new()));
        let chosen = dispatcher.select("take", &candidates, &[custom]).unwrap();
        prop_assert_eq!(chosen.symbol(), "customList");

        let plain = Value::list(Vec::new());
        let chosen = dispatcher.select("take", &candidates, &[plain]).unwrap();
        prop_assert_eq!(chosen.symbol(), "arrayList");
    }
}
