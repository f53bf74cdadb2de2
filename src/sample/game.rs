use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use indexmap::IndexMap;

use super::civilization::Civilization;
use super::{checked_add, int_value, CIVILIZATION, GAME};
use crate::dispatch::{Overload, ParamType};
use crate::error::{ResolutionError, ScriptError};
use crate::object::capability::{arg_str, MemberInfo, ScriptObject};
use crate::object::types::{TypeInfo, ARRAY, ARRAY_LIST, INT, LIST, MAP, STRING};
use crate::object::{ScriptList, ScriptMap, Value};

static GAME_MEMBERS: LazyLock<Vec<MemberInfo>> = LazyLock::new(|| {
    vec![
        MemberInfo::mutable_property("turns", ParamType::of(&INT)),
        MemberInfo::property("civ", ParamType::nullable(&CIVILIZATION)),
        MemberInfo::property("civilizations", ParamType::of(&LIST)),
        MemberInfo::property("settings", ParamType::of(&MAP)),
        MemberInfo::method("nextTurn", vec![Overload::new("nextTurn", vec![])]),
        MemberInfo::method(
            "words",
            vec![Overload::new("words", vec![ParamType::of(&STRING)])],
        ),
    ]
});

/// Root of the sample graph.
#[derive(Debug)]
pub struct Game {
    turns: Cell<i64>,
    civilizations: Rc<ScriptList>,
    settings: Rc<ScriptMap>,
}

impl Game {
    /// The first civilization is the current one.
    pub fn new(civilizations: Vec<Rc<Civilization>>, settings: IndexMap<String, Value>) -> Self {
        let items = civilizations
            .into_iter()
            .map(|civ| Value::Object(civ))
            .collect();
        Self {
            turns: Cell::new(0),
            civilizations: Rc::new(ScriptList::with_type(&ARRAY_LIST, items)),
            settings: Rc::new(ScriptMap::new(settings)),
        }
    }

    pub fn turns(&self) -> i64 {
        self.turns.get()
    }

    /// Head of the civilizations list, read live so scripts that reorder
    /// or remove civilizations see the change.
    pub fn civ(&self) -> Option<Value> {
        let first = self.civilizations.get(0).ok()?;
        first.downcast_ref::<Civilization>().is_some().then_some(first)
    }

    pub fn settings(&self) -> &ScriptMap {
        &self.settings
    }
}

impl ScriptObject for Game {
    fn type_info(&self) -> &'static TypeInfo {
        &GAME
    }

    fn describe_members(&self) -> &'static [MemberInfo] {
        &GAME_MEMBERS
    }

    fn read_member(&self, name: &str) -> Result<Value, ScriptError> {
        match name {
            "turns" => Ok(Value::Int(self.turns.get())),
            "civ" => Ok(self.civ().unwrap_or(Value::Null)),
            "civilizations" => Ok(Value::Object(self.civilizations.clone())),
            "settings" => Ok(Value::Object(self.settings.clone())),
            _ => Err(ResolutionError::unknown_member("Game", name).into()),
        }
    }

    fn write_member(&self, name: &str, value: Value) -> Result<(), ScriptError> {
        match name {
            "turns" => {
                self.turns.set(int_value(name, &value)?);
                Ok(())
            }
            _ => Err(ResolutionError::unknown_member("Game", name).into()),
        }
    }

    fn invoke_member(&self, symbol: &str, args: Vec<Value>) -> Result<Value, ScriptError> {
        match symbol {
            "nextTurn" => {
                let turns = checked_add("turns", self.turns.get(), 1)?;
                self.turns.set(turns);
                Ok(Value::Int(turns))
            }
            // Arrays built here carry the erased element type.
            "words" => {
                let words = arg_str(&args, 0)?
                    .split_whitespace()
                    .map(Value::from)
                    .collect();
                Ok(Value::object(ScriptList::with_type(&ARRAY, words)))
            }
            _ => Err(ResolutionError::unknown_member("Game", symbol).into()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game(turn {})", self.turns.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    #[test]
    fn test_civ_follows_the_civilizations_list() {
        let game = sample::game();
        let list = game.read_member("civilizations").unwrap();
        let list = list.downcast_ref::<ScriptList>().unwrap();
        list.invoke_member("removeAt", vec![Value::Int(0)]).unwrap();

        let civ = game.read_member("civ").unwrap();
        assert_eq!(civ.downcast_ref::<Civilization>().unwrap().name(), "Greece");

        list.invoke_member("removeAt", vec![Value::Int(0)]).unwrap();
        assert!(game.read_member("civ").unwrap().is_null());
    }

    #[test]
    fn test_next_turn_overflow_is_an_error() {
        let game = sample::game();
        game.write_member("turns", Value::Int(i64::MAX)).unwrap();
        assert_eq!(
            game.invoke_member("nextTurn", vec![]).unwrap_err(),
            ScriptError::invocation("turns overflow")
        );
        assert_eq!(game.turns(), i64::MAX);
    }
}
