//! Declared parameter types and overload signatures.

use std::fmt;

use crate::object::types::TypeInfo;

/// A declared parameter type: a type identity plus nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamType {
    ty: &'static TypeInfo,
    nullable: bool,
}

/// How one parameter type relates to another in the specificity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specificity {
    Same,
    /// Strict subtype.
    Narrower,
    /// Strict supertype.
    Wider,
    Unrelated,
}

impl ParamType {
    /// A non-nullable parameter of type `ty`.
    pub const fn of(ty: &'static TypeInfo) -> Self {
        Self {
            ty,
            nullable: false,
        }
    }

    /// A nullable parameter of type `ty`.
    pub const fn nullable(ty: &'static TypeInfo) -> Self {
        Self { ty, nullable: true }
    }

    pub fn ty(&self) -> &'static TypeInfo {
        self.ty
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Compares two declared types.
    ///
    /// Nullability is its own axis: `T` and `T?` are unrelated rather than
    /// ordered, so two overloads that differ only in nullability stay
    /// ambiguous for non-null arguments.
    pub fn compare(&self, other: &ParamType) -> Specificity {
        if self.nullable != other.nullable {
            Specificity::Unrelated
        } else if self.ty.is(other.ty) {
            Specificity::Same
        } else if self.ty.is_subtype_of(other.ty) {
            Specificity::Narrower
        } else if other.ty.is_subtype_of(self.ty) {
            Specificity::Wider
        } else {
            Specificity::Unrelated
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.ty.name(), if self.nullable { "?" } else { "" })
    }
}

/// One declared overload of a method group.
///
/// `symbol` names the overload uniquely within its type and is what the
/// receiver's `invoke_member` matches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overload {
    symbol: &'static str,
    params: Vec<ParamType>,
}

impl Overload {
    pub fn new(symbol: &'static str, params: Vec<ParamType>) -> Self {
        Self { symbol, params }
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether this overload is strictly more specific than `other`: every
    /// parameter is the same or narrower, and at least one is narrower.
    pub fn is_more_specific_than(&self, other: &Overload) -> bool {
        if self.arity() != other.arity() {
            return false;
        }
        let mut narrower = false;
        for (mine, theirs) in self.params.iter().zip(&other.params) {
            match mine.compare(theirs) {
                Specificity::Same => {}
                Specificity::Narrower => narrower = true,
                Specificity::Wider | Specificity::Unrelated => return false,
            }
        }
        narrower
    }
}

impl fmt::Display for Overload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        write!(f, "{}({})", self.symbol, params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::types::{ANY, ARRAY_LIST, INT, LIST, STRING};

    #[test]
    fn test_compare_types() {
        assert_eq!(ParamType::of(&ARRAY_LIST).compare(&ParamType::of(&LIST)), Specificity::Narrower);
        assert_eq!(ParamType::of(&LIST).compare(&ParamType::of(&ARRAY_LIST)), Specificity::Wider);
        assert_eq!(ParamType::of(&INT).compare(&ParamType::of(&STRING)), Specificity::Unrelated);
        assert_eq!(ParamType::of(&INT).compare(&ParamType::of(&INT)), Specificity::Same);
    }

    #[test]
    fn test_nullability_is_unordered() {
        assert_eq!(ParamType::of(&ANY).compare(&ParamType::nullable(&ANY)), Specificity::Unrelated);
        assert_eq!(ParamType::nullable(&ANY).compare(&ParamType::of(&ANY)), Specificity::Unrelated);
        assert_eq!(
            ParamType::nullable(&STRING).compare(&ParamType::nullable(&ANY)),
            Specificity::Narrower
        );
    }

    #[test]
    fn test_more_specific_requires_a_narrower_position() {
        let narrow = Overload::new("f", vec![ParamType::of(&INT), ParamType::of(&ARRAY_LIST)]);
        let wide = Overload::new("g", vec![ParamType::of(&INT), ParamType::of(&LIST)]);
        assert!(narrow.is_more_specific_than(&wide));
        assert!(!wide.is_more_specific_than(&narrow));
        assert!(!narrow.is_more_specific_than(&narrow.clone()));
    }

    #[test]
    fn test_mixed_directions_are_not_more_specific() {
        let a = Overload::new("a", vec![ParamType::of(&ARRAY_LIST), ParamType::of(&ANY)]);
        let b = Overload::new("b", vec![ParamType::of(&LIST), ParamType::of(&STRING)]);
        assert!(!a.is_more_specific_than(&b));
        assert!(!b.is_more_specific_than(&a));
    }

    #[test]
    fn test_display() {
        let overload = Overload::new("meth", vec![ParamType::of(&INT), ParamType::nullable(&ANY)]);
        assert_eq!(overload.to_string(), "meth(Int, Any?)");
    }
}
