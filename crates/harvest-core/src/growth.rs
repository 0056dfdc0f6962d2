//! Growable classification and maturity detection.
//!
//! An object is a growable if it is one of the built-in kinds or its
//! registry identifier is allow-listed. A growable's maturity lives in its
//! integer property named [`MATURITY_PROPERTY`]; it is mature once the
//! current value reaches the property's declared maximum.
//!
//! Allow-listed identifiers are user input. An entry naming something that
//! is not really a crop yields a [`GrowthError`], which callers log and
//! treat as "not harvestable" rather than propagate.

use harvest_types::{GrowableKind, GrowableState, MATURITY_PROPERTY, PropertyKind, PropertyValue};

use crate::config::HarvestConfig;
use crate::error::GrowthError;
use crate::host::{Registry, registry_id_in};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// How (and whether) an object is recognized as a growable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// One of the built-in growable kinds.
    Builtin(GrowableKind),
    /// Not built in, but its registry identifier is allow-listed.
    AllowListed,
    /// Not a growable.
    NotAGrowable,
}

impl Classification {
    /// Whether the object is a growable at all.
    pub const fn is_growable(self) -> bool {
        !matches!(self, Self::NotAGrowable)
    }
}

/// Classify `state`'s object type.
///
/// Built-in kinds never touch the registry; everything else is looked up
/// and compared against the allow-list.
pub fn classify<R>(registry: &R, state: &GrowableState, config: &HarvestConfig) -> Classification
where
    R: Registry + ?Sized,
{
    if let Some(kind) = state.object.builtin {
        return Classification::Builtin(kind);
    }
    if registry_id_in(registry, state.object, &config.allow_listed_growable_ids) {
        Classification::AllowListed
    } else {
        Classification::NotAGrowable
    }
}

// ---------------------------------------------------------------------------
// Maturity
// ---------------------------------------------------------------------------

/// The located maturity property of one object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaturityProperty {
    /// Property name.
    pub name: String,
    /// Smallest legal value (the freshly planted stage).
    pub min: i32,
    /// Largest legal value (the mature stage).
    pub max: i32,
}

/// Locate and validate the maturity property of `state`.
pub fn maturity_property(state: &GrowableState) -> Result<MaturityProperty, GrowthError> {
    let object = state.object;
    let property = || MATURITY_PROPERTY.to_owned();

    let kind = state
        .declared(MATURITY_PROPERTY)
        .ok_or_else(|| GrowthError::PropertyMissing {
            object,
            property: property(),
        })?;

    if !matches!(kind, PropertyKind::Integer { .. }) {
        return Err(GrowthError::PropertyNotInteger {
            object,
            property: property(),
        });
    }

    let (min, max) = kind.integer_range().ok_or_else(|| GrowthError::EmptyRange {
        object,
        property: property(),
    })?;

    if state
        .value(MATURITY_PROPERTY)
        .and_then(PropertyValue::as_integer)
        .is_none()
    {
        return Err(GrowthError::PropertyValueMissing {
            object,
            property: property(),
        });
    }

    Ok(MaturityProperty {
        name: property(),
        min,
        max,
    })
}

/// Whether `state` has reached `property`'s maximum.
pub fn is_mature(state: &GrowableState, property: &MaturityProperty) -> bool {
    state
        .value(&property.name)
        .and_then(PropertyValue::as_integer)
        .is_some_and(|current| current >= property.max)
}

/// `state` with its maturity property set back to the minimum.
///
/// Fails if `state` does not declare an integer property of that name, which
/// happens when the base segment of a stacked growable differs from the
/// clicked segment.
pub fn reset_to_minimum(
    state: &GrowableState,
    property: &MaturityProperty,
) -> Result<GrowableState, GrowthError> {
    match state.declared(&property.name) {
        Some(PropertyKind::Integer { .. }) => Ok(state
            .clone()
            .with_value(&property.name, PropertyValue::Integer(property.min))),
        Some(_) => Err(GrowthError::PropertyNotInteger {
            object: state.object,
            property: property.name.clone(),
        }),
        None => Err(GrowthError::PropertyMissing {
            object: state.object,
            property: property.name.clone(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use harvest_types::ObjectType;

    use super::*;
    use crate::sandbox::SandboxHost;

    const WHEAT: ObjectType = ObjectType::builtin(1, GrowableKind::GroundCrop);
    const RICE: ObjectType = ObjectType::plain(20);
    const FENCE: ObjectType = ObjectType::plain(21);

    fn host() -> SandboxHost {
        let mut host = SandboxHost::new();
        host.register(RICE, "examplemod:rice");
        host.register(FENCE, "minecraft:oak_fence");
        host
    }

    fn allow_rice() -> HarvestConfig {
        HarvestConfig {
            allow_listed_growable_ids: ["examplemod:rice".to_owned()].into(),
            ..HarvestConfig::default()
        }
    }

    #[test]
    fn builtin_kinds_are_growables() {
        let state = GrowableState::with_age(WHEAT, 0, 7);
        assert_eq!(
            classify(&host(), &state, &HarvestConfig::default()),
            Classification::Builtin(GrowableKind::GroundCrop)
        );
    }

    #[test]
    fn unlisted_objects_are_not_growables() {
        let config = allow_rice();
        let fence = GrowableState::new(FENCE);
        assert_eq!(classify(&host(), &fence, &config), Classification::NotAGrowable);
    }

    #[test]
    fn allow_listed_objects_are_growables() {
        let rice = GrowableState::with_age(RICE, 3, 3);
        assert_eq!(classify(&host(), &rice, &allow_rice()), Classification::AllowListed);
        assert!(!classify(&host(), &rice, &HarvestConfig::default()).is_growable());
    }

    #[test]
    fn unregistered_object_degrades_to_not_a_growable() {
        let mut config = allow_rice();
        config.allow_listed_growable_ids.insert("examplemod:ghost".to_owned());
        let ghost = GrowableState::with_age(ObjectType::plain(99), 1, 1);
        assert_eq!(classify(&host(), &ghost, &config), Classification::NotAGrowable);
    }

    #[test]
    fn maturity_compares_against_declared_max() {
        let young = GrowableState::with_age(WHEAT, 6, 7);
        let ripe = GrowableState::with_age(WHEAT, 7, 7);
        let property = maturity_property(&ripe).unwrap();
        assert_eq!((property.min, property.max), (0, 7));
        assert!(!is_mature(&young, &property));
        assert!(is_mature(&ripe, &property));
    }

    #[test]
    fn missing_property_is_reported() {
        let fence = GrowableState::new(FENCE);
        assert!(matches!(
            maturity_property(&fence),
            Err(GrowthError::PropertyMissing { .. })
        ));
    }

    #[test]
    fn non_integer_property_is_reported() {
        let odd = GrowableState::new(RICE).with_property(
            MATURITY_PROPERTY,
            PropertyKind::Boolean,
            PropertyValue::Boolean(true),
        );
        assert!(matches!(
            maturity_property(&odd),
            Err(GrowthError::PropertyNotInteger { .. })
        ));
    }

    #[test]
    fn empty_range_and_missing_value_are_reported() {
        let empty = GrowableState::new(RICE).with_property(
            MATURITY_PROPERTY,
            PropertyKind::Integer { min: 3, max: 0 },
            PropertyValue::Integer(0),
        );
        assert!(matches!(maturity_property(&empty), Err(GrowthError::EmptyRange { .. })));

        let valueless = GrowableState::new(RICE)
            .with_declared(MATURITY_PROPERTY, PropertyKind::Integer { min: 0, max: 3 });
        assert!(matches!(
            maturity_property(&valueless),
            Err(GrowthError::PropertyValueMissing { .. })
        ));
    }

    #[test]
    fn reset_sets_minimum_value() {
        let ripe = GrowableState::new(RICE).with_property(
            MATURITY_PROPERTY,
            PropertyKind::Integer { min: 1, max: 4 },
            PropertyValue::Integer(4),
        );
        let property = maturity_property(&ripe).unwrap();
        let reset = reset_to_minimum(&ripe, &property).unwrap();
        assert_eq!(
            reset.value(MATURITY_PROPERTY),
            Some(&PropertyValue::Integer(1))
        );
        assert!(reset_to_minimum(&GrowableState::new(FENCE), &property).is_err());
    }
}
