//! Host object model: runtime types, values, and the capability interface.
//!
//! The scripting core never looks inside host types directly. Anything that
//! can be reached from a path implements [`ScriptObject`], and everything a
//! path produces is a [`Value`].

pub mod capability;
pub mod containers;
pub mod types;
pub mod value;

pub use capability::{MemberInfo, MethodInfo, PropertyInfo, ScriptObject};
pub use containers::{ScriptList, ScriptMap};
pub use types::TypeInfo;
pub use value::{MethodRef, ObjectRef, Value};
