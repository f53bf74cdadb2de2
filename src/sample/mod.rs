//! A small game-like object graph to script against.
//!
//! `Game` owns the civilizations, each civilization owns its cities and its
//! tech manager, and every city points back at its civilization through a
//! weak reference. The REPL binary and the integration tests both run
//! against [`world`].

pub mod civilization;
pub mod game;
pub mod tech;

use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::ScriptError;
use crate::object::types::TypeInfo;
use crate::object::Value;

pub use civilization::{City, Civilization};
pub use game::Game;
pub use tech::TechManager;

pub static GAME: TypeInfo = TypeInfo::new("Game", "sample.Game", &[]);
pub static CIVILIZATION: TypeInfo = TypeInfo::new("Civilization", "sample.Civilization", &[]);
pub static CITY: TypeInfo = TypeInfo::new("City", "sample.City", &[]);
pub static TECH_MANAGER: TypeInfo = TypeInfo::new("TechManager", "sample.TechManager", &[]);

/// Builds the sample game and returns it as the resolution root.
///
/// Rome (100 gold, cities Rome and Antium, Agriculture and Pottery known)
/// is the current civilization; Greece (50 gold, city Athens) is the other.
pub fn world() -> Value {
    Value::Object(game())
}

/// Builds the sample game.
pub fn game() -> Rc<Game> {
    let rome = Civilization::new("Rome", 100, &[("Rome", 5), ("Antium", 2)]);
    rome.tech().add_technology("Agriculture");
    rome.tech().add_technology("Pottery");
    let greece = Civilization::new("Greece", 50, &[("Athens", 4)]);

    let mut settings = IndexMap::new();
    settings.insert("difficulty".to_string(), Value::from("Prince"));
    settings.insert("speed".to_string(), Value::from("Standard"));
    settings.insert("maxTurns".to_string(), Value::Int(500));

    Rc::new(Game::new(vec![rome, greece], settings))
}

/// Integer payload of a property write; writes are type-checked before they
/// reach the host, so anything else is a host bug surfaced as an error.
fn int_value(name: &str, value: &Value) -> Result<i64, ScriptError> {
    value.as_i64().ok_or_else(|| {
        ScriptError::invocation(format!("{} expects Int, got {}", name, value.type_name()))
    })
}

/// Adds `amount` to a counter, failing instead of wrapping.
fn checked_add(name: &str, current: i64, amount: i64) -> Result<i64, ScriptError> {
    current
        .checked_add(amount)
        .ok_or_else(|| ScriptError::invocation(format!("{} overflow", name)))
}
