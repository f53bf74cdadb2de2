//! Runtime type identities for host values.
//!
//! Every value that crosses the scripting boundary has a `TypeInfo`. Type
//! identities are `'static` and compared by address, so two distinct
//! identities may share a display name or a qualified name. That is how
//! erased generic instantiations such as `Array<String>` and `Array<Any>`
//! are modelled: different identities, same qualified name `Array`.
//!
//! # Example
//!
//! ```
//! use scriptquill::object::types::{TypeInfo, ANY, INT, NUMBER, STRING};
//!
//! assert!(INT.is_subtype_of(&NUMBER));
//! assert!(INT.is_strict_subtype_of(&ANY));
//! assert!(!STRING.is_subtype_of(&NUMBER));
//! assert!(INT.is_numeric());
//! ```

use std::fmt;

/// A runtime type identity with its direct supertypes.
#[derive(Debug)]
pub struct TypeInfo {
    name: &'static str,
    qualified_name: &'static str,
    supertypes: &'static [&'static TypeInfo],
}

impl TypeInfo {
    /// Declares a type. `supertypes` lists direct supertypes only; `Any` is
    /// implied for every type.
    pub const fn new(
        name: &'static str,
        qualified_name: &'static str,
        supertypes: &'static [&'static TypeInfo],
    ) -> Self {
        Self {
            name,
            qualified_name,
            supertypes,
        }
    }

    /// Short display name, e.g. `ArrayList`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fully qualified name. Distinct identities may share one.
    pub fn qualified_name(&self) -> &'static str {
        self.qualified_name
    }

    /// Direct supertypes.
    pub fn supertypes(&self) -> &'static [&'static TypeInfo] {
        self.supertypes
    }

    /// Identity comparison.
    pub fn is(&self, other: &TypeInfo) -> bool {
        std::ptr::eq(self, other)
    }

    /// Reflexive, transitive subtype check.
    pub fn is_subtype_of(&self, other: &TypeInfo) -> bool {
        if self.is(other) || other.is(&ANY) {
            return true;
        }
        self.supertypes.iter().any(|ty| ty.is_subtype_of(other))
    }

    /// Subtype check that excludes the type itself.
    pub fn is_strict_subtype_of(&self, other: &TypeInfo) -> bool {
        !self.is(other) && self.is_subtype_of(other)
    }

    /// Whether this is `Number` or one of its subtypes.
    pub fn is_numeric(&self) -> bool {
        self.is_subtype_of(&NUMBER)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for TypeInfo {}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Top type.
pub static ANY: TypeInfo = TypeInfo::new("Any", "Any", &[]);

pub static NUMBER: TypeInfo = TypeInfo::new("Number", "Number", &[]);
static NUMBER_SUPERTYPES: [&TypeInfo; 1] = [&NUMBER];
pub static INT: TypeInfo = TypeInfo::new("Int", "Int", &NUMBER_SUPERTYPES);
pub static FLOAT: TypeInfo = TypeInfo::new("Float", "Float", &NUMBER_SUPERTYPES);
pub static BOOLEAN: TypeInfo = TypeInfo::new("Boolean", "Boolean", &[]);
pub static STRING: TypeInfo = TypeInfo::new("String", "String", &[]);

/// Type of unbound member references produced by property lookups.
pub static METHOD: TypeInfo = TypeInfo::new("Method", "Method", &[]);

pub static LIST: TypeInfo = TypeInfo::new("List", "List", &[]);
static LIST_SUPERTYPES: [&TypeInfo; 1] = [&LIST];
pub static ARRAY_LIST: TypeInfo = TypeInfo::new("ArrayList", "ArrayList", &LIST_SUPERTYPES);
pub static MAP: TypeInfo = TypeInfo::new("Map", "Map", &[]);

/// Generic arrays erase to the same qualified name.
pub static ARRAY: TypeInfo = TypeInfo::new("Array<Any>", "Array", &[]);
pub static STRING_ARRAY: TypeInfo = TypeInfo::new("Array<String>", "Array", &[]);

#[cfg(test)]
mod tests {
    use super::*;

    static CUSTOM_LIST_SUPERTYPES: [&TypeInfo; 1] = [&ARRAY_LIST];
    static CUSTOM_LIST: TypeInfo = TypeInfo::new("CustomList", "CustomList", &CUSTOM_LIST_SUPERTYPES);

    #[test]
    fn test_subtype_is_transitive() {
        assert!(CUSTOM_LIST.is_subtype_of(&ARRAY_LIST));
        assert!(CUSTOM_LIST.is_subtype_of(&LIST));
        assert!(!LIST.is_subtype_of(&CUSTOM_LIST));
    }

    #[test]
    fn test_everything_is_any() {
        assert!(STRING.is_subtype_of(&ANY));
        assert!(CUSTOM_LIST.is_strict_subtype_of(&ANY));
        assert!(!ANY.is_strict_subtype_of(&ANY));
    }

    #[test]
    fn test_identity_ignores_qualified_name() {
        assert_eq!(ARRAY.qualified_name(), STRING_ARRAY.qualified_name());
        assert_ne!(ARRAY, STRING_ARRAY);
        assert!(!STRING_ARRAY.is_subtype_of(&ARRAY));
    }

    #[test]
    fn test_numeric_types() {
        assert!(FLOAT.is_numeric());
        assert!(NUMBER.is_numeric());
        assert!(!BOOLEAN.is_numeric());
    }
}
