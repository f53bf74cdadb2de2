use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::LazyLock;

use super::{checked_add, int_value, TECH_MANAGER};
use crate::dispatch::{Overload, ParamType};
use crate::error::{ResolutionError, ScriptError};
use crate::object::capability::{arg_bool, arg_i64, arg_str, MemberInfo, ScriptObject};
use crate::object::types::{TypeInfo, BOOLEAN, INT, LIST, STRING};
use crate::object::{ScriptList, Value};

static TECH_MEMBERS: LazyLock<Vec<MemberInfo>> = LazyLock::new(|| {
    vec![
        MemberInfo::mutable_property("freeTechs", ParamType::of(&INT)),
        MemberInfo::property("techsResearched", ParamType::of(&LIST)),
        MemberInfo::method(
            "isResearched",
            vec![Overload::new("isResearched", vec![ParamType::of(&STRING)])],
        ),
        MemberInfo::method(
            "addTechnology",
            vec![Overload::new("addTechnology", vec![ParamType::of(&STRING)])],
        ),
        MemberInfo::method(
            "setFreeTechs",
            vec![
                Overload::new("setFreeTechs", vec![ParamType::of(&INT)]),
                Overload::new("grantFreeTech", vec![ParamType::of(&BOOLEAN)]),
            ],
        ),
    ]
});

/// Research state of one civilization.
#[derive(Debug)]
pub struct TechManager {
    free_techs: Cell<i64>,
    researched: Rc<ScriptList>,
}

impl TechManager {
    pub fn new() -> Self {
        Self {
            free_techs: Cell::new(0),
            researched: Rc::new(ScriptList::new(Vec::new())),
        }
    }

    pub fn free_techs(&self) -> i64 {
        self.free_techs.get()
    }

    pub fn is_researched(&self, tech: &str) -> bool {
        self.researched.contains(&Value::from(tech))
    }

    /// Returns false when the technology was already known.
    pub fn add_technology(&self, tech: &str) -> bool {
        if self.is_researched(tech) {
            return false;
        }
        self.researched.push(Value::from(tech));
        true
    }
}

impl Default for TechManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptObject for TechManager {
    fn type_info(&self) -> &'static TypeInfo {
        &TECH_MANAGER
    }

    fn describe_members(&self) -> &'static [MemberInfo] {
        &TECH_MEMBERS
    }

    fn read_member(&self, name: &str) -> Result<Value, ScriptError> {
        match name {
            "freeTechs" => Ok(Value::Int(self.free_techs.get())),
            "techsResearched" => Ok(Value::Object(self.researched.clone())),
            _ => Err(ResolutionError::unknown_member("TechManager", name).into()),
        }
    }

    fn write_member(&self, name: &str, value: Value) -> Result<(), ScriptError> {
        match name {
            "freeTechs" => {
                self.free_techs.set(int_value(name, &value)?);
                Ok(())
            }
            _ => Err(ResolutionError::unknown_member("TechManager", name).into()),
        }
    }

    fn invoke_member(&self, symbol: &str, args: Vec<Value>) -> Result<Value, ScriptError> {
        match symbol {
            "isResearched" => Ok(Value::Bool(self.is_researched(arg_str(&args, 0)?))),
            "addTechnology" => Ok(Value::Bool(self.add_technology(arg_str(&args, 0)?))),
            "setFreeTechs" => {
                self.free_techs.set(arg_i64(&args, 0)?);
                Ok(Value::Null)
            }
            "grantFreeTech" => {
                if arg_bool(&args, 0)? {
                    self.free_techs
                        .set(checked_add("freeTechs", self.free_techs.get(), 1)?);
                }
                Ok(Value::Null)
            }
            _ => Err(ResolutionError::unknown_member("TechManager", symbol).into()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
