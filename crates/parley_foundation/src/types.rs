//! Type descriptors for command parameters.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::value::Value;

/// Builds a value of a named type from a single string.
pub type StringConstructor = fn(&str) -> std::result::Result<Value, String>;

/// Type descriptor for parameter declarations.
///
/// Used to declare what a command parameter expects and to check that a
/// converted value is assignable to it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Any type (accepts any value).
    Any,
    /// String type.
    String,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// Boolean type.
    Bool,
    /// Homogeneous sequence type.
    List(Box<Type>),
    /// Application-defined type.
    Named(NamedType),
}

/// An application-defined type, identified by name.
///
/// A named type may carry a string constructor. The elementary conversion
/// fallback uses it when no converter applies.
#[derive(Clone)]
pub struct NamedType {
    name: Arc<str>,
    from_str: Option<StringConstructor>,
}

impl NamedType {
    /// Creates a named type without a string constructor.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            from_str: None,
        }
    }

    /// Creates a named type that can be built from a single string.
    #[must_use]
    pub fn with_constructor(name: impl Into<Arc<str>>, from_str: StringConstructor) -> Self {
        Self {
            name: name.into(),
            from_str: Some(from_str),
        }
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the string constructor, if any.
    #[must_use]
    pub const fn constructor(&self) -> Option<StringConstructor> {
        self.from_str
    }
}

// Named types are identified by name alone.
impl PartialEq for NamedType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for NamedType {}

impl Hash for NamedType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Type {
    /// Creates a list type with the given element type.
    #[must_use]
    pub fn list(element: Type) -> Self {
        Self::List(Box::new(element))
    }

    /// Creates a named type without a string constructor.
    #[must_use]
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self::Named(NamedType::new(name))
    }

    /// Returns true if this type is `Any`.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns true if this is the string type.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    /// Returns the element type of a list type.
    #[must_use]
    pub fn element(&self) -> Option<&Type> {
        match self {
            Self::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// Checks if a value type is accepted by this type.
    ///
    /// - `Any` accepts all types
    /// - Primitive types must match exactly (no numeric promotion)
    /// - List types check element types recursively
    /// - Named types match by name
    #[must_use]
    pub fn accepts(&self, value_type: &Type) -> bool {
        if matches!(self, Self::Any) {
            return true;
        }

        match (self, value_type) {
            (Self::String, Self::String)
            | (Self::Int, Self::Int)
            | (Self::Long, Self::Long)
            | (Self::Float, Self::Float)
            | (Self::Double, Self::Double)
            | (Self::Bool, Self::Bool) => true,

            // List(Any) is what a runtime list reports; its elements are
            // checked by `admits` instead.
            (Self::List(expected), Self::List(actual)) => {
                actual.is_any() || expected.accepts(actual)
            }

            (Self::Named(a), Self::Named(b)) => a == b,

            _ => false,
        }
    }

    /// Checks if a concrete value is assignable to this type.
    ///
    /// Unlike [`Type::accepts`], this inspects list elements.
    #[must_use]
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::List(element), Value::List(items)) => {
                items.iter().all(|item| element.admits(item))
            }
            _ => self.accepts(&value.value_type()),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::String => write!(f, "string"),
            Self::Int => write!(f, "int"),
            Self::Long => write!(f, "long"),
            Self::Float => write!(f, "float"),
            Self::Double => write!(f, "double"),
            Self::Bool => write!(f, "bool"),
            Self::List(t) => write!(f, "list<{t:?}>"),
            Self::Named(t) => write!(f, "{t:?}"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
