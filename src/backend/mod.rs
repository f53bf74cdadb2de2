//! Line-oriented reflective backend.
//!
//! Each line is one command word followed by its argument:
//!
//! ```text
//! get <expr>            evaluate and print
//! set <path> = <expr>   assign a property
//! typeof <expr>         runtime type name
//! members <expr>        properties and method signatures
//! examples              sample commands
//! runtests              run the examples and report failures
//! help                  list commands
//! ```
//!
//! Failures never escape [`ReflectiveBackend::exec`]; they come back as
//! output flagged with `is_exception`.

use anyhow::{bail, Context};

use crate::config::Config;
use crate::object::capability::MemberInfo;
use crate::object::Value;
use crate::path::{split_toplevel, tokenize, ElementKind, Resolver};

/// Command words and how many space-separated arguments each takes.
const COMMANDS: &[(&str, usize)] = &[
    ("get", 1),
    ("set", 3),
    ("typeof", 1),
    ("members", 1),
    ("examples", 0),
    ("runtests", 0),
    ("help", 0),
];

const EXAMPLES: &[&str] = &[
    "get civ.cities",
    "get civ.cities[0].name",
    "get civ.tech.isResearched(\"Writing\")",
    "set civ.tech.freeTechs = 5",
    "set turns = 5",
    "get civ.addGold(1337)",
    "get civ.addGold(civ.tech.techsResearched.size)",
    "get civ.addGold(10, \"tribute\")",
    "get civ.addNotification(\"Here's a notification!\")",
    "get civilizations[1].cities[0].civ.name",
    "get settings[\"difficulty\"]",
    "get civ.tech.setFreeTechs(true)",
    "typeof civ.tech",
    "members civ",
];

/// Outcome of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    pub output: String,
    pub is_exception: bool,
}

impl ExecResult {
    fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_exception: false,
        }
    }

    fn failed(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_exception: true,
        }
    }
}

/// Completion candidates for a partially typed line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completions {
    /// Full replacement lines.
    pub matches: Vec<String>,
    pub help_text: Option<String>,
}

impl Completions {
    fn help(text: impl Into<String>) -> Self {
        Self {
            matches: Vec::new(),
            help_text: Some(text.into()),
        }
    }
}

/// Evaluates commands against one root object.
#[derive(Debug)]
pub struct ReflectiveBackend {
    root: Value,
    resolver: Resolver,
    history: Vec<String>,
}

impl ReflectiveBackend {
    pub fn new(root: Value, config: &Config) -> Self {
        Self {
            root,
            resolver: Resolver::new(config.dispatch_config()),
            history: Vec::new(),
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Commands executed so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn motd(&self) -> String {
        [
            "Welcome to the reflective scriptquill backend.",
            "",
            "Commands you enter are parsed as a path of property reads, key and index",
            "accesses, method calls, and string, numeric, boolean, and null literals.",
            "Keys, indices, and call arguments are parsed recursively.",
            "Properties can be both read from and written to.",
            "",
            "End a line with a tab to list completions at the current path.",
            "Type `help` for the list of commands.",
        ]
        .join("\n")
    }

    /// Runs one command and records it in the history.
    pub fn exec(&mut self, command: &str) -> ExecResult {
        self.history.push(command.to_string());
        self.run(command)
    }

    fn run(&self, command: &str) -> ExecResult {
        log::debug!("exec {:?}", command);
        match self.run_command(command) {
            Ok(result) => result,
            Err(err) => ExecResult::failed(format!("Error evaluating command:\n\t{:#}", err)),
        }
    }

    fn run_command(&self, command: &str) -> anyhow::Result<ExecResult> {
        let command = command.trim();
        let (word, argument) = command.split_once(' ').unwrap_or((command, ""));
        let output = match word {
            "get" => self.evaluate(argument)?.to_string(),
            "set" => self.set(argument)?,
            "typeof" => self.evaluate(argument)?.type_name().to_string(),
            "members" => describe_members(&self.evaluate(argument)?)?,
            "examples" => EXAMPLES
                .iter()
                .map(|example| format!("> {}", example))
                .collect::<Vec<_>>()
                .join("\n"),
            "runtests" => return Ok(self.run_tests()),
            "help" => COMMANDS
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
            other => bail!("Unknown command: {}", other),
        };
        Ok(ExecResult::ok(output))
    }

    fn evaluate(&self, expr: &str) -> anyhow::Result<Value> {
        if expr.trim().is_empty() {
            bail!("Expected an expression");
        }
        self.resolver
            .evaluate(&self.root, expr)
            .with_context(|| format!("evaluating {}", expr.trim()))
    }

    fn set(&self, argument: &str) -> anyhow::Result<String> {
        let parts: Vec<String> = split_toplevel(argument, &[' '])?
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .collect();
        let [target, equals, expr] = parts.as_slice() else {
            bail!(
                "Expected two expressions separated by an equals sign with spaces, got: {}",
                parts.join(" | ")
            );
        };
        if equals != "=" {
            bail!("Expected `=` between target and value, got `{}`", equals);
        }
        let value = self.evaluate(expr)?;
        let path = tokenize(target)?;
        self.resolver
            .assign(&self.root, &path, value.clone())
            .with_context(|| format!("assigning {}", target))?;
        Ok(format!("Set {} to {}", target, value))
    }

    /// Runs every example, after checking that failures are detected at all.
    fn run_tests(&self) -> ExecResult {
        if !self.run("get This.Command[Should](Fail)!").is_exception {
            return ExecResult::failed("Reflective tests are unable to detect failures.");
        }
        let failures: Vec<String> = EXAMPLES
            .iter()
            .filter_map(|example| {
                let result = self.run(example);
                result
                    .is_exception
                    .then(|| format!("\t{}\n\t\t{}", example, result.output))
            })
            .collect();
        if failures.is_empty() {
            ExecResult::ok(format!("{} reflective tests PASSED!", EXAMPLES.len()))
        } else {
            ExecResult::failed(format!(
                "{}/{} reflective tests FAILED:\n{}",
                failures.len(),
                EXAMPLES.len(),
                failures.join("\n")
            ))
        }
    }

    /// Completes the command word, or the last member name of the path
    /// being typed. `cursor` is a byte offset; text after it is ignored.
    pub fn autocomplete(&self, command: &str, cursor: Option<usize>) -> Completions {
        let input = cursor
            .and_then(|cursor| command.get(..cursor))
            .unwrap_or(command);
        let Some((word, _)) = COMMANDS
            .iter()
            .find(|(word, _)| input.starts_with(&format!("{} ", word)))
        else {
            return Completions {
                matches: COMMANDS
                    .iter()
                    .filter(|(word, _)| word.starts_with(input))
                    .map(|(word, _)| format!("{} ", word))
                    .collect(),
                help_text: None,
            };
        };
        match self.complete_path(input, &input[word.len() + 1..]) {
            Ok(completions) => completions,
            Err(err) => Completions::help(format!("Could not get autocompletion: {:#}", err)),
        }
    }

    fn complete_path(&self, input: &str, argument: &str) -> anyhow::Result<Completions> {
        let working = split_toplevel(argument, &[' '])?.pop().unwrap_or_default();
        let mut path = tokenize(&working)?;
        if path.iter().any(|element| element.kind() == ElementKind::Call) {
            return Ok(Completions::help(
                "No autocomplete available for function calls.",
            ));
        }
        let leaf = match path.last() {
            Some(last) if last.kind() == ElementKind::Property => {
                path.pop().map(|last| last.text().to_string()).unwrap_or_default()
            }
            _ => String::new(),
        };
        let branch = self.resolver.resolve(&self.root, &path)?;
        let prefix = &input[..input.len() - leaf.len()];
        let mut matches: Vec<String> = Vec::new();
        if let Some(object) = branch.as_object() {
            for member in object.describe_members() {
                let candidate = format!("{}{}", prefix, member.name());
                if member.name().starts_with(&leaf) && !matches.contains(&candidate) {
                    matches.push(candidate);
                }
            }
        }
        Ok(Completions {
            matches,
            help_text: None,
        })
    }
}

/// One line per member: properties with their types, then every method
/// overload signature.
fn describe_members(value: &Value) -> anyhow::Result<String> {
    let object = value
        .as_object()
        .with_context(|| format!("{} has no members", value.type_name()))?;
    let mut lines = Vec::new();
    for member in object.describe_members() {
        if let MemberInfo::Property(property) = member {
            let access = if property.is_writable() { "var" } else { "val" };
            lines.push(format!("{} {}: {}", access, property.name(), property.ty()));
        }
    }
    for member in object.describe_members() {
        if let MemberInfo::Method(method) = member {
            for overload in method.overloads() {
                let params: Vec<String> =
                    overload.params().iter().map(ToString::to_string).collect();
                lines.push(format!("fun {}({})", method.name(), params.join(", ")));
            }
        }
    }
    Ok(lines.join("\n"))
}
