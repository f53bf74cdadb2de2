//! Overload selection and invocation.

use log::{debug, trace};

use super::signature::{Overload, ParamType};
use crate::error::{DispatchError, ScriptError};
use crate::object::types::{FLOAT, INT};
use crate::object::{MethodInfo, ObjectRef, Value};

/// Matching behaviour of a [`Dispatcher`].
///
/// Passed explicitly to every resolver and dispatcher; there is no global
/// verbosity or matching state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Any numeric argument matches any numeric parameter. Lossy: a float
    /// argument can land in an integer parameter.
    pub match_numbers_leniently: bool,
    /// Types unrelated by subtyping still match when their qualified names
    /// are equal. Only useful for hosts whose generic instantiations erase to
    /// one name (e.g. arrays backing variadic parameters).
    pub match_qualified_names: bool,
    /// Break ties between several matching overloads by specificity instead
    /// of failing immediately.
    pub resolve_ambiguous_specificity: bool,
    /// Log candidate filtering and the chosen overload at debug level.
    pub log_dispatch: bool,
}

impl Default for DispatchConfig {
    /// The settings the scripting frontends use.
    fn default() -> Self {
        Self {
            match_numbers_leniently: true,
            match_qualified_names: false,
            resolve_ambiguous_specificity: true,
            log_dispatch: false,
        }
    }
}

impl DispatchConfig {
    /// Exact matching only, no tie-breaking.
    pub fn strict() -> Self {
        Self {
            match_numbers_leniently: false,
            match_qualified_names: false,
            resolve_ambiguous_specificity: false,
            log_dispatch: false,
        }
    }
}

/// Chooses and invokes one overload of a method group for given arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Whether `arg` may be passed for a parameter declared as `param`.
    pub fn accepts(&self, param: &ParamType, arg: &Value) -> bool {
        let Some(arg_type) = arg.runtime_type() else {
            return param.is_nullable();
        };
        let param_type = param.ty();
        if self.config.match_numbers_leniently && param_type.is_numeric() && arg_type.is_numeric() {
            return true;
        }
        arg_type.is_subtype_of(param_type)
            || (self.config.match_qualified_names
                && arg_type.qualified_name() == param_type.qualified_name())
    }

    /// Whether every argument fits the overload positionally.
    pub fn matches(&self, overload: &Overload, args: &[Value]) -> bool {
        overload.arity() == args.len()
            && overload
                .params()
                .iter()
                .zip(args)
                .all(|(param, arg)| self.accepts(param, arg))
    }

    /// Selects the overload to invoke for `args`.
    ///
    /// `member` only labels errors and log lines.
    pub fn select<'a>(
        &self,
        member: &str,
        candidates: &'a [Overload],
        args: &[Value],
    ) -> Result<&'a Overload, DispatchError> {
        let matching: Vec<&Overload> = candidates
            .iter()
            .filter(|candidate| self.matches(candidate, args))
            .collect();
        trace!(
            "{}: {} of {} candidates accept ({})",
            member,
            matching.len(),
            candidates.len(),
            argument_types(args).join(", ")
        );

        match matching.as_slice() {
            [] => Err(DispatchError::NoMatchingSignature {
                member: member.to_string(),
                arguments: argument_types(args),
            }),
            [only] => Ok(*only),
            several => {
                let winner = if self.config.resolve_ambiguous_specificity {
                    most_specific(several)
                } else {
                    None
                };
                winner.ok_or_else(|| DispatchError::AmbiguousSignature {
                    member: member.to_string(),
                    arguments: argument_types(args),
                    candidates: several.iter().map(ToString::to_string).collect(),
                })
            }
        }
    }

    /// Selects an overload of `method` and invokes it on `receiver`.
    pub fn dispatch(
        &self,
        receiver: &ObjectRef,
        method: &MethodInfo,
        args: Vec<Value>,
    ) -> Result<Value, ScriptError> {
        let member = format!("{}.{}", receiver.type_info().name(), method.name());
        let overload = self.select(&member, method.overloads(), &args)?;
        if self.config.log_dispatch {
            debug!("{} -> {}", member, overload);
        }
        let args = overload
            .params()
            .iter()
            .zip(args)
            .map(|(param, arg)| self.coerce(param, arg))
            .collect();
        receiver.invoke_member(overload.symbol(), args)
    }

    /// Converts a leniently matched number to the parameter's numeric type.
    pub fn coerce(&self, param: &ParamType, arg: Value) -> Value {
        if !self.config.match_numbers_leniently {
            return arg;
        }
        match arg {
            Value::Int(i) if param.ty().is(&FLOAT) => Value::Float(i as f64),
            Value::Float(f) if param.ty().is(&INT) => Value::Int(f as i64),
            other => other,
        }
    }
}

/// The candidate that is more specific than every other candidate, if any.
fn most_specific<'a>(candidates: &[&'a Overload]) -> Option<&'a Overload> {
    candidates.iter().copied().find(|candidate| {
        candidates
            .iter()
            .all(|rival| std::ptr::eq(*candidate, *rival) || candidate.is_more_specific_than(rival))
    })
}

fn argument_types(args: &[Value]) -> Vec<String> {
    args.iter().map(|arg| arg.type_name().to_string()).collect()
}
