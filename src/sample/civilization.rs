use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::LazyLock;

use super::tech::TechManager;
use super::{checked_add, int_value, CITY, CIVILIZATION, TECH_MANAGER};
use crate::dispatch::{Overload, ParamType};
use crate::error::{ResolutionError, ScriptError};
use crate::object::capability::{arg_i64, arg_str, MemberInfo, ScriptObject};
use crate::object::types::{TypeInfo, INT, LIST, STRING, STRING_ARRAY};
use crate::object::{ScriptList, Value};

static CIVILIZATION_MEMBERS: LazyLock<Vec<MemberInfo>> = LazyLock::new(|| {
    vec![
        MemberInfo::property("name", ParamType::of(&STRING)),
        MemberInfo::mutable_property("gold", ParamType::of(&INT)),
        MemberInfo::property("cities", ParamType::of(&LIST)),
        MemberInfo::property("tech", ParamType::of(&TECH_MANAGER)),
        MemberInfo::property("notifications", ParamType::of(&LIST)),
        MemberInfo::method(
            "addGold",
            vec![
                Overload::new("addGold", vec![ParamType::of(&INT)]),
                Overload::new(
                    "addGoldFor",
                    vec![ParamType::of(&INT), ParamType::of(&STRING)],
                ),
            ],
        ),
        MemberInfo::method(
            "addNotification",
            vec![
                Overload::new("addNotification", vec![ParamType::of(&STRING)]),
                Overload::new(
                    "addNotificationTagged",
                    vec![ParamType::of(&STRING), ParamType::of(&STRING_ARRAY)],
                ),
            ],
        ),
    ]
});

/// A player: treasury, cities, research, and a notification feed.
#[derive(Debug)]
pub struct Civilization {
    name: String,
    gold: Cell<i64>,
    cities: Rc<ScriptList>,
    tech: Rc<TechManager>,
    notifications: RefCell<Vec<String>>,
}

impl Civilization {
    /// Builds a civilization whose cities point back at it.
    pub fn new(name: &str, gold: i64, cities: &[(&str, i64)]) -> Rc<Self> {
        Rc::new_cyclic(|me| {
            let cities = cities
                .iter()
                .map(|(city, population)| Value::object(City::new(city, *population, me.clone())))
                .collect();
            Self {
                name: name.to_string(),
                gold: Cell::new(gold),
                cities: Rc::new(ScriptList::new(cities)),
                tech: Rc::new(TechManager::new()),
                notifications: RefCell::new(Vec::new()),
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gold(&self) -> i64 {
        self.gold.get()
    }

    pub fn tech(&self) -> &TechManager {
        &self.tech
    }

    pub fn cities(&self) -> &ScriptList {
        &self.cities
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.borrow().clone()
    }

    /// Returns the new balance.
    pub fn add_gold(&self, amount: i64) -> Result<i64, ScriptError> {
        let gold = checked_add("gold", self.gold.get(), amount)?;
        self.gold.set(gold);
        Ok(gold)
    }

    pub fn add_notification(&self, text: impl Into<String>) {
        self.notifications.borrow_mut().push(text.into());
    }
}

impl ScriptObject for Civilization {
    fn type_info(&self) -> &'static TypeInfo {
        &CIVILIZATION
    }

    fn describe_members(&self) -> &'static [MemberInfo] {
        &CIVILIZATION_MEMBERS
    }

    fn read_member(&self, name: &str) -> Result<Value, ScriptError> {
        match name {
            "name" => Ok(Value::from(self.name.as_str())),
            "gold" => Ok(Value::Int(self.gold.get())),
            "cities" => Ok(Value::Object(self.cities.clone())),
            "tech" => Ok(Value::Object(self.tech.clone())),
            "notifications" => Ok(Value::list(
                self.notifications().into_iter().map(Value::Str).collect(),
            )),
            _ => Err(ResolutionError::unknown_member("Civilization", name).into()),
        }
    }

    fn write_member(&self, name: &str, value: Value) -> Result<(), ScriptError> {
        match name {
            "gold" => {
                self.gold.set(int_value(name, &value)?);
                Ok(())
            }
            _ => Err(ResolutionError::unknown_member("Civilization", name).into()),
        }
    }

    fn invoke_member(&self, symbol: &str, args: Vec<Value>) -> Result<Value, ScriptError> {
        match symbol {
            "addGold" => Ok(Value::Int(self.add_gold(arg_i64(&args, 0)?)?)),
            "addGoldFor" => {
                let amount = arg_i64(&args, 0)?;
                let reason = arg_str(&args, 1)?;
                let gold = self.add_gold(amount)?;
                self.add_notification(format!("{} gold: {}", amount, reason));
                Ok(Value::Int(gold))
            }
            "addNotification" => {
                self.add_notification(arg_str(&args, 0)?);
                Ok(Value::Null)
            }
            "addNotificationTagged" => {
                let tags = args
                    .get(1)
                    .and_then(|tags| tags.downcast_ref::<ScriptList>())
                    .map(ScriptList::items)
                    .unwrap_or_default();
                let tags: Vec<String> = tags.iter().map(ToString::to_string).collect();
                self.add_notification(format!("{} [{}]", arg_str(&args, 0)?, tags.join(", ")));
                Ok(Value::Null)
            }
            _ => Err(ResolutionError::unknown_member("Civilization", symbol).into()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Civilization({})", self.name)
    }
}

static CITY_MEMBERS: LazyLock<Vec<MemberInfo>> = LazyLock::new(|| {
    vec![
        MemberInfo::property("name", ParamType::of(&STRING)),
        MemberInfo::mutable_property("population", ParamType::of(&INT)),
        MemberInfo::property("civ", ParamType::nullable(&CIVILIZATION)),
    ]
});

/// A city. Its owner is held weakly, so the graph can be cyclic without
/// leaking.
#[derive(Debug)]
pub struct City {
    name: String,
    population: Cell<i64>,
    civ: Weak<Civilization>,
}

impl City {
    pub fn new(name: &str, population: i64, civ: Weak<Civilization>) -> Self {
        Self {
            name: name.to_string(),
            population: Cell::new(population),
            civ,
        }
    }

    pub fn population(&self) -> i64 {
        self.population.get()
    }
}

impl ScriptObject for City {
    fn type_info(&self) -> &'static TypeInfo {
        &CITY
    }

    fn describe_members(&self) -> &'static [MemberInfo] {
        &CITY_MEMBERS
    }

    fn read_member(&self, name: &str) -> Result<Value, ScriptError> {
        match name {
            "name" => Ok(Value::from(self.name.as_str())),
            "population" => Ok(Value::Int(self.population.get())),
            "civ" => Ok(self
                .civ
                .upgrade()
                .map_or(Value::Null, |civ| Value::Object(civ))),
            _ => Err(ResolutionError::unknown_member("City", name).into()),
        }
    }

    fn write_member(&self, name: &str, value: Value) -> Result<(), ScriptError> {
        match name {
            "population" => {
                self.population.set(int_value(name, &value)?);
                Ok(())
            }
            _ => Err(ResolutionError::unknown_member("City", name).into()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "City({})", self.name)
    }
}
