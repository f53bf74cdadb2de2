//! ScriptQuill - path expressions and runtime overload dispatch over a live
//! host object graph.
//!
//! A path such as `civ.tech.isResearched("Writing")` is tokenized into
//! elements ([`path`]), walked against a root object by the
//! [`path::Resolver`], and every call is routed through the
//! [`dispatch::Dispatcher`], which picks the most specific overload for the
//! runtime argument types. Host types take part by implementing
//! [`object::ScriptObject`].

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod object;
pub mod path;
pub mod sample;
