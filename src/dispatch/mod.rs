//! Runtime overload resolution.
//!
//! Given a method group and concrete arguments, [`Dispatcher`] picks the one
//! overload to invoke:
//!
//! 1. Overloads whose arity differs from the argument count are dropped.
//! 2. Each remaining parameter must accept its argument: null needs a
//!    nullable parameter, numbers may match any numeric parameter in lenient
//!    mode, anything else must be the parameter's type or a subtype of it.
//! 3. One survivor is invoked. Several survivors go through specificity
//!    resolution, which keeps the overload that is at least as narrow as
//!    every rival in every position and strictly narrower in one.

pub mod dispatcher;
pub mod signature;

pub use dispatcher::{DispatchConfig, Dispatcher};
pub use signature::{Overload, ParamType, Specificity};
