//! Path expressions over a host object graph.
//!
//! ```text
//! path    := segment ( "." segment | "[" key "]" | "(" args ")" )*
//! key     := literal | path
//! args    := ( literal | path ) ( "," ( literal | path ) )*
//! literal := null | true | false | "text" | integer | float
//! ```
//!
//! Tokenizing keeps bracket interiors as raw text; the resolver evaluates
//! them against the resolution root when it reaches them.

pub mod ast;
pub mod literal;
pub mod parser;
pub mod resolver;

pub use ast::{ElementKind, PathElement};
pub use literal::{classify, Literal};
pub use parser::{split_toplevel, stringify, tokenize, Parser};
pub use resolver::Resolver;
