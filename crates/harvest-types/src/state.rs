//! Object types and their property-based state.
//!
//! A [`GrowableState`] is a snapshot of whatever occupies one grid cell: its
//! [`ObjectType`] plus a set of declared properties with current values. The
//! engine reads the integer property named [`MATURITY_PROPERTY`] to decide
//! whether the object is ready for harvest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::GrowableKind;

/// Conventional name of the integer maturity property.
pub const MATURITY_PROPERTY: &str = "age";

// ---------------------------------------------------------------------------
// ObjectType
// ---------------------------------------------------------------------------

/// The type of a placed object, as described by the host registry.
///
/// Two states belong to the same object type iff their `ObjectType`s are
/// equal. The registry identifier is *not* stored here: resolving it is a
/// host lookup that may fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectType {
    /// Host registry handle.
    pub raw_id: u32,
    /// Built-in growable kind, if the type is one.
    #[serde(default)]
    pub builtin: Option<GrowableKind>,
    /// Whether the type belongs to the stacked-growable category (segments
    /// of the same type may sit on top of each other).
    #[serde(default)]
    pub stacked: bool,
}

impl ObjectType {
    /// A plain object type with no growable traits.
    pub const fn plain(raw_id: u32) -> Self {
        Self {
            raw_id,
            builtin: None,
            stacked: false,
        }
    }

    /// A built-in growable of the given kind. Built-in crops are stackable.
    pub const fn builtin(raw_id: u32, kind: GrowableKind) -> Self {
        Self {
            raw_id,
            builtin: Some(kind),
            stacked: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// The declared type of a state property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyKind {
    /// Integer values in `min..=max`.
    Integer {
        /// Smallest legal value.
        min: i32,
        /// Largest legal value.
        max: i32,
    },
    /// `true` / `false`.
    Boolean,
    /// One of a fixed list of names.
    Enumerated {
        /// Legal values, in declaration order.
        values: Vec<String>,
    },
}

impl PropertyKind {
    /// The integer range `(min, max)`, if this is a non-empty integer property.
    pub const fn integer_range(&self) -> Option<(i32, i32)> {
        match *self {
            Self::Integer { min, max } if min <= max => Some((min, max)),
            _ => None,
        }
    }
}

/// The current value of a state property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// An integer value.
    Integer(i32),
    /// A boolean value.
    Boolean(bool),
    /// An enumerated value.
    Enumerated(String),
}

impl PropertyValue {
    /// The value as an integer, if it is one.
    pub const fn as_integer(&self) -> Option<i32> {
        match *self {
            Self::Integer(value) => Some(value),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// GrowableState
// ---------------------------------------------------------------------------

/// A snapshot of one placed object: its type and property values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowableState {
    /// The object's type.
    pub object: ObjectType,
    /// Declared properties, by name.
    #[serde(default)]
    declared: BTreeMap<String, PropertyKind>,
    /// Current values, by name.
    #[serde(default)]
    values: BTreeMap<String, PropertyValue>,
}

impl GrowableState {
    /// A state with no properties.
    pub const fn new(object: ObjectType) -> Self {
        Self {
            object,
            declared: BTreeMap::new(),
            values: BTreeMap::new(),
        }
    }

    /// A crop-like state with an `age` property in `0..=max_age`.
    pub fn with_age(object: ObjectType, age: i32, max_age: i32) -> Self {
        Self::new(object).with_property(
            MATURITY_PROPERTY,
            PropertyKind::Integer {
                min: 0,
                max: max_age,
            },
            PropertyValue::Integer(age),
        )
    }

    /// Declare a property and set its current value.
    #[must_use]
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        kind: PropertyKind,
        value: PropertyValue,
    ) -> Self {
        let name = name.into();
        self.declared.insert(name.clone(), kind);
        self.values.insert(name, value);
        self
    }

    /// Declare a property without giving it a value.
    #[must_use]
    pub fn with_declared(mut self, name: impl Into<String>, kind: PropertyKind) -> Self {
        self.declared.insert(name.into(), kind);
        self
    }

    /// Return a copy of this state with `name` set to `value`.
    ///
    /// The property must already be declared; otherwise the state is
    /// returned unchanged.
    #[must_use]
    pub fn with_value(mut self, name: &str, value: PropertyValue) -> Self {
        if self.declared.contains_key(name) {
            self.values.insert(name.to_owned(), value);
        }
        self
    }

    /// The declared type of the property `name`.
    pub fn declared(&self, name: &str) -> Option<&PropertyKind> {
        self.declared.get(name)
    }

    /// The current value of the property `name`.
    pub fn value(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    /// Names of all declared properties, in order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.declared.keys().map(String::as_str)
    }

    /// Whether two states are of the same object type.
    pub fn is_same_type(&self, other: &Self) -> bool {
        self.object == other.object
    }
}
