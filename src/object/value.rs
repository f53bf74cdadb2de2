//! Dynamically typed values that cross the scripting boundary.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::capability::ScriptObject;
use super::containers::{ScriptList, ScriptMap};
use super::types::{TypeInfo, BOOLEAN, FLOAT, INT, METHOD, STRING};

/// Shared handle to a host object.
pub type ObjectRef = Rc<dyn ScriptObject>;

/// An unbound reference to a named method group.
///
/// Produced when a property lookup finds a method instead of a property. The
/// receiver is supplied separately when the reference is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef {
    name: String,
    owner: &'static TypeInfo,
}

impl MethodRef {
    pub fn new(name: impl Into<String>, owner: &'static TypeInfo) -> Self {
        Self {
            name: name.into(),
            owner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type that declared the method group.
    pub fn owner(&self) -> &'static TypeInfo {
        self.owner
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<method {}.{}>", self.owner.name(), self.name)
    }
}

/// A dynamically typed runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Handle to a live host object.
    Object(ObjectRef),
    /// Unbound method group, callable by a following call element.
    Method(MethodRef),
}

impl Value {
    /// Wraps a host object.
    pub fn object<T: ScriptObject + 'static>(object: T) -> Self {
        Value::Object(Rc::new(object))
    }

    /// Builds an `ArrayList` of the given items.
    pub fn list(items: Vec<Value>) -> Self {
        Value::object(ScriptList::new(items))
    }

    /// Builds a string-keyed `Map`.
    pub fn map(entries: IndexMap<String, Value>) -> Self {
        Value::object(ScriptMap::new(entries))
    }

    /// Runtime type of the value, `None` for null.
    pub fn runtime_type(&self) -> Option<&'static TypeInfo> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(&BOOLEAN),
            Value::Int(_) => Some(&INT),
            Value::Float(_) => Some(&FLOAT),
            Value::Str(_) => Some(&STRING),
            Value::Object(object) => Some(object.type_info()),
            Value::Method(_) => Some(&METHOD),
        }
    }

    /// Display name of the runtime type, `Null` for null.
    pub fn type_name(&self) -> &'static str {
        self.runtime_type().map_or("Null", TypeInfo::name)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Borrows the concrete host type behind an object handle.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_object()
            .and_then(|object| object.as_any().downcast_ref::<T>())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            (Value::Method(a), Value::Method(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{:?}", fl),
            Value::Str(s) => write!(f, "{}", s),
            Value::Object(object) => object.fmt_display(f),
            Value::Method(method) => write!(f, "{}", method),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}
