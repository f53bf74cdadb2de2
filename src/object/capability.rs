//! The capability interface host types implement to be scriptable.
//!
//! Instead of blanket reflection, each host type describes its members once
//! (a `'static` table, typically built in a `LazyLock`) and answers reads,
//! writes, and invocations by name. Member tables depend only on the type,
//! never on an instance, so sharing them process-wide is safe.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//! use std::cell::Cell;
//! use std::sync::LazyLock;
//!
//! use scriptquill::dispatch::{Overload, ParamType};
//! use scriptquill::error::{ResolutionError, ScriptError};
//! use scriptquill::object::capability::{arg_i64, MemberInfo, ScriptObject};
//! use scriptquill::object::types::{TypeInfo, INT};
//! use scriptquill::object::Value;
//!
//! static COUNTER: TypeInfo = TypeInfo::new("Counter", "demo.Counter", &[]);
//! static COUNTER_MEMBERS: LazyLock<Vec<MemberInfo>> = LazyLock::new(|| {
//!     vec![
//!         MemberInfo::mutable_property("count", ParamType::of(&INT)),
//!         MemberInfo::method("bump", vec![Overload::new("bump", vec![ParamType::of(&INT)])]),
//!     ]
//! });
//!
//! #[derive(Debug, Default)]
//! struct Counter {
//!     count: Cell<i64>,
//! }
//!
//! impl ScriptObject for Counter {
//!     fn type_info(&self) -> &'static TypeInfo {
//!         &COUNTER
//!     }
//!
//!     fn describe_members(&self) -> &'static [MemberInfo] {
//!         &COUNTER_MEMBERS
//!     }
//!
//!     fn read_member(&self, name: &str) -> Result<Value, ScriptError> {
//!         match name {
//!             "count" => Ok(Value::Int(self.count.get())),
//!             _ => Err(ResolutionError::unknown_member("Counter", name).into()),
//!         }
//!     }
//!
//!     fn invoke_member(&self, symbol: &str, args: Vec<Value>) -> Result<Value, ScriptError> {
//!         match symbol {
//!             "bump" => {
//!                 self.count.set(self.count.get() + arg_i64(&args, 0)?);
//!                 Ok(Value::Null)
//!             }
//!             _ => Err(ResolutionError::unknown_member("Counter", symbol).into()),
//!         }
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let counter = Counter::default();
//! counter.invoke_member("bump", vec![Value::Int(2)]).unwrap();
//! assert_eq!(counter.read_member("count").unwrap(), Value::Int(2));
//! assert!(counter.method("bump").is_some());
//! ```

use std::any::Any;
use std::fmt;

use super::types::TypeInfo;
use super::value::Value;
use crate::dispatch::{Overload, ParamType};
use crate::error::{ResolutionError, ScriptError, TypeError};

/// A readable, possibly writable, property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    name: &'static str,
    ty: ParamType,
    writable: bool,
}

impl PropertyInfo {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type, checked on writes.
    pub fn ty(&self) -> ParamType {
        self.ty
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }
}

/// A named group of overloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    name: &'static str,
    overloads: Vec<Overload>,
}

impl MethodInfo {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn overloads(&self) -> &[Overload] {
        &self.overloads
    }
}

/// One entry in a type's member table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberInfo {
    Property(PropertyInfo),
    Method(MethodInfo),
}

impl MemberInfo {
    /// A read-only property.
    pub fn property(name: &'static str, ty: ParamType) -> Self {
        MemberInfo::Property(PropertyInfo {
            name,
            ty,
            writable: false,
        })
    }

    pub fn mutable_property(name: &'static str, ty: ParamType) -> Self {
        MemberInfo::Property(PropertyInfo {
            name,
            ty,
            writable: true,
        })
    }

    pub fn method(name: &'static str, overloads: Vec<Overload>) -> Self {
        MemberInfo::Method(MethodInfo { name, overloads })
    }

    pub fn name(&self) -> &'static str {
        match self {
            MemberInfo::Property(property) => property.name,
            MemberInfo::Method(method) => method.name,
        }
    }
}

/// Capability set of a scriptable host type.
///
/// Implementations use interior mutability for writable state: the object
/// graph is shared and usually cyclic, and a call may re-enter the receiver.
pub trait ScriptObject: fmt::Debug {
    /// Runtime type of this instance.
    fn type_info(&self) -> &'static TypeInfo;

    /// Member table of the runtime type.
    fn describe_members(&self) -> &'static [MemberInfo];

    /// Reads a property declared in `describe_members`.
    fn read_member(&self, name: &str) -> Result<Value, ScriptError>;

    /// Writes a writable property. The resolver has already checked the
    /// value against the declared type.
    fn write_member(&self, name: &str, _value: Value) -> Result<(), ScriptError> {
        Err(TypeError::ReadOnlyProperty {
            type_name: self.type_info().name().to_string(),
            name: name.to_string(),
        }
        .into())
    }

    /// Invokes the overload whose symbol is `symbol`. Arguments already
    /// match the overload's parameter types.
    fn invoke_member(&self, symbol: &str, _args: Vec<Value>) -> Result<Value, ScriptError> {
        Err(ResolutionError::unknown_member(self.type_info().name(), symbol).into())
    }

    /// Positional read, for ordered sequences.
    fn read_index(&self, _index: i64) -> Result<Value, ScriptError> {
        Err(TypeError::NotASequence {
            type_name: self.type_info().name().to_string(),
        }
        .into())
    }

    /// Keyed read, for mappings.
    fn read_key(&self, _key: &Value) -> Result<Value, ScriptError> {
        Err(TypeError::NotAMapping {
            type_name: self.type_info().name().to_string(),
        }
        .into())
    }

    fn as_any(&self) -> &dyn Any;

    /// Text shown when the object is printed.
    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_info().name())
    }

    fn property(&self, name: &str) -> Option<&'static PropertyInfo> {
        self.describe_members().iter().find_map(|member| match member {
            MemberInfo::Property(property) if property.name == name => Some(property),
            _ => None,
        })
    }

    fn method(&self, name: &str) -> Option<&'static MethodInfo> {
        self.describe_members().iter().find_map(|member| match member {
            MemberInfo::Method(method) if method.name == name => Some(method),
            _ => None,
        })
    }
}

fn arg<'a, T>(
    args: &'a [Value],
    index: usize,
    expected: &str,
    read: impl FnOnce(&'a Value) -> Option<T>,
) -> Result<T, ScriptError> {
    args.get(index).and_then(read).ok_or_else(|| {
        let found = args.get(index).map_or("nothing", Value::type_name);
        ScriptError::invocation(format!(
            "argument {} should be {}, got {}",
            index, expected, found
        ))
    })
}

pub fn arg_str(args: &[Value], index: usize) -> Result<&str, ScriptError> {
    arg(args, index, "String", Value::as_str)
}

pub fn arg_i64(args: &[Value], index: usize) -> Result<i64, ScriptError> {
    arg(args, index, "Int", Value::as_i64)
}

pub fn arg_f64(args: &[Value], index: usize) -> Result<f64, ScriptError> {
    arg(args, index, "a number", Value::as_f64)
}

pub fn arg_bool(args: &[Value], index: usize) -> Result<bool, ScriptError> {
    arg(args, index, "Boolean", Value::as_bool)
}

/// Argument at `index`, or null when absent.
pub fn arg_value(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Null)
}
