//! Host-side sequence and mapping types.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;

use super::capability::{arg_i64, arg_str, arg_value, MemberInfo, ScriptObject};
use super::types::{TypeInfo, ANY, ARRAY_LIST, INT, MAP, STRING};
use super::value::Value;
use crate::dispatch::{Overload, ParamType};
use crate::error::{ResolutionError, ScriptError, TypeError};

static LIST_MEMBERS: LazyLock<Vec<MemberInfo>> = LazyLock::new(|| {
    vec![
        MemberInfo::property("size", ParamType::of(&INT)),
        MemberInfo::method("get", vec![Overload::new("get", vec![ParamType::of(&INT)])]),
        MemberInfo::method(
            "add",
            vec![
                Overload::new("add", vec![ParamType::nullable(&ANY)]),
                Overload::new("insert", vec![ParamType::of(&INT), ParamType::nullable(&ANY)]),
            ],
        ),
        MemberInfo::method(
            "contains",
            vec![Overload::new("contains", vec![ParamType::nullable(&ANY)])],
        ),
        MemberInfo::method(
            "removeAt",
            vec![Overload::new("removeAt", vec![ParamType::of(&INT)])],
        ),
    ]
});

/// An ordered, zero-indexed sequence.
///
/// The runtime type defaults to `ArrayList`; `with_type` lets hosts expose
/// the same storage under a more specific or unrelated list type.
#[derive(Debug)]
pub struct ScriptList {
    ty: &'static TypeInfo,
    items: RefCell<Vec<Value>>,
}

impl ScriptList {
    pub fn new(items: Vec<Value>) -> Self {
        Self::with_type(&ARRAY_LIST, items)
    }

    pub fn with_type(ty: &'static TypeInfo, items: Vec<Value>) -> Self {
        Self {
            ty,
            items: RefCell::new(items),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn get(&self, index: i64) -> Result<Value, ScriptError> {
        let items = self.items.borrow();
        usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .ok_or_else(|| {
                ResolutionError::IndexOutOfRange {
                    index,
                    len: items.len(),
                }
                .into()
            })
    }

    pub fn push(&self, value: Value) {
        self.items.borrow_mut().push(value);
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.borrow().iter().any(|item| item == value)
    }

    /// Snapshot of the current items.
    pub fn items(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    fn insert(&self, index: i64, value: Value) -> Result<(), ScriptError> {
        let mut items = self.items.borrow_mut();
        let len = items.len();
        match usize::try_from(index) {
            Ok(i) if i <= len => {
                items.insert(i, value);
                Ok(())
            }
            _ => Err(ResolutionError::IndexOutOfRange { index, len }.into()),
        }
    }

    fn remove_at(&self, index: i64) -> Result<Value, ScriptError> {
        let mut items = self.items.borrow_mut();
        let len = items.len();
        match usize::try_from(index) {
            Ok(i) if i < len => Ok(items.remove(i)),
            _ => Err(ResolutionError::IndexOutOfRange { index, len }.into()),
        }
    }
}

impl ScriptObject for ScriptList {
    fn type_info(&self) -> &'static TypeInfo {
        self.ty
    }

    fn describe_members(&self) -> &'static [MemberInfo] {
        &LIST_MEMBERS
    }

    fn read_member(&self, name: &str) -> Result<Value, ScriptError> {
        match name {
            "size" => Ok(Value::Int(self.len() as i64)),
            _ => Err(ResolutionError::unknown_member(self.ty.name(), name).into()),
        }
    }

    fn invoke_member(&self, symbol: &str, args: Vec<Value>) -> Result<Value, ScriptError> {
        match symbol {
            "get" => self.get(arg_i64(&args, 0)?),
            "add" => {
                self.push(arg_value(&args, 0));
                Ok(Value::Bool(true))
            }
            "insert" => {
                self.insert(arg_i64(&args, 0)?, arg_value(&args, 1))?;
                Ok(Value::Null)
            }
            "contains" => Ok(Value::Bool(self.contains(&arg_value(&args, 0)))),
            "removeAt" => self.remove_at(arg_i64(&args, 0)?),
            _ => Err(ResolutionError::unknown_member(self.ty.name(), symbol).into()),
        }
    }

    fn read_index(&self, index: i64) -> Result<Value, ScriptError> {
        self.get(index)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.items.borrow().iter().map(ToString::to_string).collect();
        write!(f, "[{}]", items.join(", "))
    }
}

static MAP_MEMBERS: LazyLock<Vec<MemberInfo>> = LazyLock::new(|| {
    vec![
        MemberInfo::property("size", ParamType::of(&INT)),
        MemberInfo::property("keys", ParamType::of(&ARRAY_LIST)),
        MemberInfo::method("get", vec![Overload::new("get", vec![ParamType::of(&STRING)])]),
        MemberInfo::method(
            "put",
            vec![Overload::new(
                "put",
                vec![ParamType::of(&STRING), ParamType::nullable(&ANY)],
            )],
        ),
        MemberInfo::method(
            "containsKey",
            vec![Overload::new("containsKey", vec![ParamType::of(&STRING)])],
        ),
    ]
});

/// A string-keyed mapping that preserves insertion order.
#[derive(Debug)]
pub struct ScriptMap {
    ty: &'static TypeInfo,
    entries: RefCell<IndexMap<String, Value>>,
}

impl ScriptMap {
    pub fn new(entries: IndexMap<String, Value>) -> Self {
        Self {
            ty: &MAP,
            entries: RefCell::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn get(&self, key: &str) -> Result<Value, ScriptError> {
        self.entries.borrow().get(key).cloned().ok_or_else(|| {
            ResolutionError::UnknownKey {
                type_name: self.ty.name().to_string(),
                key: key.to_string(),
            }
            .into()
        })
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.borrow_mut().insert(key.into(), value)
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl ScriptObject for ScriptMap {
    fn type_info(&self) -> &'static TypeInfo {
        self.ty
    }

    fn describe_members(&self) -> &'static [MemberInfo] {
        &MAP_MEMBERS
    }

    fn read_member(&self, name: &str) -> Result<Value, ScriptError> {
        match name {
            "size" => Ok(Value::Int(self.len() as i64)),
            "keys" => Ok(Value::list(self.keys().into_iter().map(Value::Str).collect())),
            _ => Err(ResolutionError::unknown_member(self.ty.name(), name).into()),
        }
    }

    fn invoke_member(&self, symbol: &str, args: Vec<Value>) -> Result<Value, ScriptError> {
        match symbol {
            "get" => self.get(arg_str(&args, 0)?),
            "put" => Ok(self
                .insert(arg_str(&args, 0)?, arg_value(&args, 1))
                .unwrap_or(Value::Null)),
            "containsKey" => Ok(Value::Bool(
                self.entries.borrow().contains_key(arg_str(&args, 0)?),
            )),
            _ => Err(ResolutionError::unknown_member(self.ty.name(), symbol).into()),
        }
    }

    fn read_key(&self, key: &Value) -> Result<Value, ScriptError> {
        match key {
            Value::Str(key) => self.get(key),
            other => Err(TypeError::KeyShape {
                type_name: self.ty.name().to_string(),
                key_type: other.type_name().to_string(),
            }
            .into()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .entries
            .borrow()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}
