//! Integration tests for the reflective command backend.

use scriptquill::backend::{Completions, ReflectiveBackend};
use scriptquill::config::Config;
use scriptquill::sample;

fn backend() -> ReflectiveBackend {
    ReflectiveBackend::new(sample::world(), &Config::default())
}

/// Test the basic get / typeof commands.
#[test]
fn test_get_and_typeof() {
    let mut backend = backend();
    assert_eq!(backend.exec("get civ.cities").output, "[City(Rome), City(Antium)]");
    assert_eq!(backend.exec("get civ.cities[0].population").output, "5");
    assert_eq!(backend.exec("typeof civ.tech").output, "TechManager");
    assert_eq!(backend.exec("typeof null").output, "Null");
    assert_eq!(backend.exec("typeof civ.addGold").output, "Method");
    assert_eq!(backend.exec("get civ.addGold").output, "<method Civilization.addGold>");
}

/// Test that set requires the `target = value` shape.
#[test]
fn test_set_requires_equals() {
    let mut backend = backend();
    let result = backend.exec("set turns 5");
    assert!(result.is_exception);
    assert!(result.output.contains("equals sign"));

    let result = backend.exec("set turns := 5");
    assert!(result.is_exception);

    let result = backend.exec("set turns = civ.cities[0].population");
    assert!(!result.is_exception, "{}", result.output);
    assert_eq!(result.output, "Set turns to 5");
    assert_eq!(backend.exec("get turns").output, "5");
}

/// Test that errors are reported as output and never abort the backend.
#[test]
fn test_errors_are_output() {
    let mut backend = backend();
    let result = backend.exec("get civ.addGold(\"lots\")");
    assert!(result.is_exception);
    assert!(result.output.starts_with("Error evaluating command:"));
    assert!(result.output.contains("No matching signatures found for calling Civilization.addGold"));

    let result = backend.exec("set civ.name = \"Carthage\"");
    assert!(result.is_exception);
    assert!(result.output.contains("read-only"));

    assert!(!backend.exec("get civ.name").is_exception);
}

/// Test that an overflowing call is reported and the backend keeps going.
#[test]
fn test_overflow_is_output() {
    let mut backend = backend();
    assert!(!backend.exec("set turns = 1e300").is_exception);
    let result = backend.exec("get nextTurn()");
    assert!(result.is_exception);
    assert!(result.output.contains("turns overflow"));
    assert!(!backend.exec("get civ.gold").is_exception);
}

/// Test that members lists properties before method overloads.
#[test]
fn test_members() {
    let mut backend = backend();
    let output = backend.exec("members civ.tech").output;
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "var freeTechs: Int");
    assert_eq!(lines[1], "val techsResearched: List");
    assert!(lines.contains(&"fun setFreeTechs(Int)"));
    assert!(lines.contains(&"fun setFreeTechs(Boolean)"));

    assert!(backend.exec("members civ.gold").is_exception);
}

/// Test that every built-in example passes.
#[test]
fn test_runtests_passes() {
    let mut backend = backend();
    let result = backend.exec("runtests");
    assert!(!result.is_exception, "{}", result.output);
    assert!(result.output.ends_with("reflective tests PASSED!"));
}

/// Test help and examples listings.
#[test]
fn test_help_and_examples() {
    let mut backend = backend();
    assert!(backend.exec("help").output.contains("typeof"));
    let examples = backend.exec("examples").output;
    assert!(examples.lines().all(|line| line.starts_with("> ")));
    assert!(backend.motd().contains("reflective"));
}

/// Test member completion at the end of a path.
#[test]
fn test_autocomplete_members() {
    let backend = backend();
    let completions = backend.autocomplete("get civ.tech.is", None);
    assert_eq!(
        completions,
        Completions {
            matches: vec!["get civ.tech.isResearched".to_string()],
            help_text: None,
        }
    );

    let completions = backend.autocomplete("get civ.cities[0].", None);
    assert_eq!(
        completions.matches,
        vec![
            "get civ.cities[0].name",
            "get civ.cities[0].population",
            "get civ.cities[0].civ",
        ]
    );
}

/// Test completion of the target and value of an assignment.
#[test]
fn test_autocomplete_set() {
    let backend = backend();
    let completions = backend.autocomplete("set civ.go", None);
    assert_eq!(completions.matches, vec!["set civ.gold"]);
    let completions = backend.autocomplete("set turns = civ.n", None);
    assert_eq!(completions.matches, vec!["set turns = civ.name", "set turns = civ.notifications"]);
}

/// Test completion fallbacks: calls, bad paths, and unknown commands.
#[test]
fn test_autocomplete_fallbacks() {
    let backend = backend();
    let completions = backend.autocomplete("get civ.addGold(1).", None);
    assert_eq!(
        completions.help_text.as_deref(),
        Some("No autocomplete available for function calls.")
    );
    assert!(completions.matches.is_empty());

    let completions = backend.autocomplete("get nothing.here", None);
    assert!(completions.matches.is_empty());
    assert!(completions.help_text.unwrap().starts_with("Could not get autocompletion"));

    assert!(backend.autocomplete("zzz", None).matches.is_empty());
    assert_eq!(backend.autocomplete("", None).matches.len(), 7);
}
