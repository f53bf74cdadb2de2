//! Walks path elements against a live host object graph.

use log::trace;

use super::ast::{ElementKind, PathElement};
use super::literal::classify;
use super::parser::{split_toplevel, stringify, tokenize};
use crate::dispatch::{DispatchConfig, Dispatcher};
use crate::error::{ParseError, ResolutionError, ScriptError, TypeError};
use crate::object::{MethodRef, ObjectRef, Value};

/// Per-resolution cursor: the last resolved value and the one before it.
///
/// `previous` is the receiver a following call binds to.
#[derive(Debug)]
struct ResolutionState {
    current: Value,
    previous: Option<Value>,
}

/// Resolves, evaluates, and assigns paths.
///
/// # Example
///
/// ```
/// use scriptquill::path::Resolver;
/// use scriptquill::object::Value;
/// use scriptquill::sample;
///
/// let resolver = Resolver::default();
/// let world = sample::world();
/// let gold = resolver.evaluate(&world, "civ.gold").unwrap();
/// assert_eq!(gold, Value::Int(100));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    dispatcher: Dispatcher,
}

impl Resolver {
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(config),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Evaluates literal or path text against `scope`.
    pub fn evaluate(&self, scope: &Value, text: &str) -> Result<Value, ScriptError> {
        let literal = classify(text)?;
        match literal.into_value() {
            Some(value) => Ok(value),
            None => self.resolve(scope, &tokenize(text.trim())?),
        }
    }

    /// Tokenizes and resolves `path` against `root`.
    pub fn resolve_path(&self, root: &Value, path: &str) -> Result<Value, ScriptError> {
        self.resolve(root, &tokenize(path)?)
    }

    /// Resolves every element in order, starting from `root`.
    pub fn resolve(&self, root: &Value, elements: &[PathElement]) -> Result<Value, ScriptError> {
        let mut state = ResolutionState {
            current: root.clone(),
            previous: None,
        };
        for element in elements {
            self.step(root, &mut state, element)?;
        }
        Ok(state.current)
    }

    /// Writes `value` to the property named by the last element.
    ///
    /// Only properties can be assigned; a trailing key or call fails with
    /// `UnsupportedAssignmentTarget`.
    pub fn assign(
        &self,
        root: &Value,
        elements: &[PathElement],
        value: Value,
    ) -> Result<(), ScriptError> {
        let Some((leaf, branch)) = elements.split_last() else {
            return Err(TypeError::UnsupportedAssignmentTarget {
                target: "empty path".to_string(),
            }
            .into());
        };
        if leaf.kind() != ElementKind::Property {
            return Err(TypeError::UnsupportedAssignmentTarget {
                target: stringify(elements),
            }
            .into());
        }
        let owner = self.resolve(root, branch)?;
        let object = expect_object(&owner, leaf.text())?;
        let name = leaf.text();
        let property = object.property(name).ok_or_else(|| {
            ResolutionError::unknown_member(object.type_info().name(), name)
        })?;
        if !property.is_writable() {
            return Err(TypeError::ReadOnlyProperty {
                type_name: object.type_info().name().to_string(),
                name: name.to_string(),
            }
            .into());
        }
        if !self.dispatcher.accepts(&property.ty(), &value) {
            return Err(TypeError::PropertyType {
                name: name.to_string(),
                expected: property.ty().to_string(),
                found: value.type_name().to_string(),
            }
            .into());
        }
        let value = self.dispatcher.coerce(&property.ty(), value);
        trace!("assign {} = {}", stringify(elements), value);
        object.write_member(name, value)
    }

    fn step(
        &self,
        scope: &Value,
        state: &mut ResolutionState,
        element: &PathElement,
    ) -> Result<(), ScriptError> {
        trace!("{:?} {:?} on {}", element.kind(), element.text(), state.current.type_name());
        let next = match element.kind() {
            ElementKind::Property => read_property(&state.current, element.text())?,
            ElementKind::Key => {
                let key = if element.needs_eval() {
                    self.evaluate(scope, element.text())?
                } else {
                    match element.literal_args() {
                        [key] => key.clone(),
                        keys => return Err(TypeError::KeyCount { count: keys.len() }.into()),
                    }
                };
                read_item(&state.current, &key)?
            }
            ElementKind::Call => {
                let args = self.call_arguments(scope, element)?;
                self.call(state, args)?
            }
        };
        state.previous = Some(std::mem::replace(&mut state.current, next));
        Ok(())
    }

    fn call_arguments(
        &self,
        scope: &Value,
        element: &PathElement,
    ) -> Result<Vec<Value>, ScriptError> {
        if !element.needs_eval() {
            return Ok(element.literal_args().to_vec());
        }
        split_toplevel(element.text(), &[','])?
            .iter()
            .enumerate()
            .map(|(index, arg)| {
                if arg.trim().is_empty() {
                    return Err(ParseError::BlankArgument {
                        index,
                        text: element.text().to_string(),
                    }
                    .into());
                }
                self.evaluate(scope, arg)
            })
            .collect()
    }

    fn call(&self, state: &ResolutionState, args: Vec<Value>) -> Result<Value, ScriptError> {
        let Value::Method(method) = &state.current else {
            return Err(TypeError::NotInvocable {
                found: state.current.type_name().to_string(),
            }
            .into());
        };
        let receiver = match &state.previous {
            Some(Value::Object(receiver)) => receiver,
            other => {
                return Err(TypeError::NoReceiver {
                    method: method.to_string(),
                    found: other.as_ref().map_or("nothing", Value::type_name).to_string(),
                }
                .into())
            }
        };
        let group = receiver.method(method.name()).ok_or_else(|| {
            ResolutionError::unknown_member(receiver.type_info().name(), method.name())
        })?;
        self.dispatcher.dispatch(receiver, group, args)
    }
}

fn expect_object<'a>(value: &'a Value, name: &str) -> Result<&'a ObjectRef, TypeError> {
    value.as_object().ok_or_else(|| TypeError::NotAnObject {
        name: name.to_string(),
        found: value.type_name().to_string(),
    })
}

/// Reads a property, or yields a method reference when only a method group
/// has that name.
fn read_property(current: &Value, name: &str) -> Result<Value, ScriptError> {
    let object = expect_object(current, name)?;
    if object.property(name).is_some() {
        return object.read_member(name);
    }
    if object.method(name).is_some() {
        return Ok(Value::Method(MethodRef::new(name, object.type_info())));
    }
    Err(ResolutionError::unknown_member(object.type_info().name(), name).into())
}

/// Integer keys read by position, anything else by key.
fn read_item(current: &Value, key: &Value) -> Result<Value, ScriptError> {
    let object = current.as_object().ok_or_else(|| TypeError::KeyShape {
        type_name: current.type_name().to_string(),
        key_type: key.type_name().to_string(),
    })?;
    match key {
        Value::Int(index) => object.read_index(*index),
        key => object.read_key(key),
    }
}
