//! Error types for the `harvest-core` crate.
//!
//! None of these ever reach the host. Each is recovered at the lowest layer
//! that can make sense of it, logged at debug level, and degraded to "not
//! harvestable this time".

use harvest_types::{ObjectType, Position};

/// Failures classifying an object or reading its maturity property.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrowthError {
    /// The object declares no property with the maturity name. Usually an
    /// allow-list entry that is not actually a crop.
    #[error("object type {object:?} has no '{property}' property")]
    PropertyMissing {
        /// The object type.
        object: ObjectType,
        /// The property name looked up.
        property: String,
    },

    /// The maturity property exists but is not integer-valued.
    #[error("property '{property}' of object type {object:?} is not an integer property")]
    PropertyNotInteger {
        /// The object type.
        object: ObjectType,
        /// The property name.
        property: String,
    },

    /// The maturity property is declared with an empty range, so it has no
    /// maximum to compare against.
    #[error("property '{property}' of object type {object:?} has an empty range")]
    EmptyRange {
        /// The object type.
        object: ObjectType,
        /// The property name.
        property: String,
    },

    /// The maturity property is declared but the state carries no integer
    /// value for it.
    #[error("state of object type {object:?} has no value for '{property}'")]
    PropertyValueMissing {
        /// The object type.
        object: ObjectType,
        /// The property name.
        property: String,
    },
}

/// The host registry could not name an object type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no registry identifier for object type {0:?}")]
pub struct RegistryLookupFailure(pub ObjectType);

/// A single harvest stopped part-way. Siblings of an area harvest continue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HarvestError {
    /// The base segment's growth property could not be reset.
    #[error("cannot reset growable at {position}: {source}")]
    Reset {
        /// Base position of the growable.
        position: Position,
        /// The underlying property failure.
        #[source]
        source: GrowthError,
    },

    /// The resolved base position held nothing when the harvest reached it.
    #[error("base position {0} is empty")]
    BaseVanished(Position),
}
