//! Base-segment resolution for stacked growables.
//!
//! Some growables are a base segment with decorative segments of the same
//! type stacked on top; only the base carries growth state. Clicking any
//! segment harvests the base.
//!
//! Objects in `tall_but_separate_ids` look stacked but every segment is an
//! independent growable, so they always resolve to themselves.

use harvest_types::{ObjectType, Position};

use crate::config::HarvestConfig;
use crate::host::{Registry, WorldAccess, registry_id_in};

/// Upper bound on segments walked when resolving a base.
pub const MAX_STACK_HEIGHT: u32 = 64;

/// Whether `object` is on the tall-but-separate exception list.
pub fn is_tall_but_separate<R>(registry: &R, object: ObjectType, config: &HarvestConfig) -> bool
where
    R: Registry + ?Sized,
{
    registry_id_in(registry, object, &config.tall_but_separate_ids)
}

/// The base position of the `object` growable clicked at `clicked`.
///
/// Walks down while the current cell is in the stacked category and the
/// cell below holds the same object type. The first cell where that chain
/// breaks is the base.
pub fn base_position<H>(
    host: &H,
    config: &HarvestConfig,
    object: ObjectType,
    clicked: Position,
) -> Position
where
    H: WorldAccess + Registry + ?Sized,
{
    if !object.stacked || is_tall_but_separate(host, object, config) {
        return clicked;
    }

    let mut base = clicked;
    for _ in 0..MAX_STACK_HEIGHT {
        let Some(below) = base.below() else {
            break;
        };
        let stacked_here = host.state_at(base).is_some_and(|state| state.object.stacked);
        let same_below = host.state_at(below).is_some_and(|state| state.object == object);
        if !(stacked_here && same_below) {
            break;
        }
        base = below;
    }
    base
}

#[cfg(test)]
mod tests {
    use harvest_types::{GrowableKind, GrowableState};

    use super::*;
    use crate::sandbox::SandboxHost;

    const PITCHER: ObjectType = ObjectType::builtin(3, GrowableKind::GroundCrop);
    const TOMATO: ObjectType = ObjectType::builtin(4, GrowableKind::GroundCrop);
    const WHEAT: ObjectType = ObjectType::builtin(1, GrowableKind::GroundCrop);
    const COCOA: ObjectType = ObjectType {
        raw_id: 5,
        builtin: Some(GrowableKind::PodCrop),
        stacked: false,
    };

    fn column(host: &mut SandboxHost, object: ObjectType, x: i32, heights: std::ops::RangeInclusive<i32>) {
        for y in heights {
            host.place(Position::new(x, y, 0), GrowableState::with_age(object, 4, 4));
        }
    }

    fn host() -> SandboxHost {
        let mut host = SandboxHost::new();
        host.register(PITCHER, "minecraft:pitcher_crop");
        host.register(TOMATO, "farmersdelight:tomatoes");
        host.register(WHEAT, "minecraft:wheat");
        host.register(COCOA, "minecraft:cocoa");
        host
    }

    #[test]
    fn top_segment_resolves_to_base() {
        let mut host = host();
        column(&mut host, PITCHER, 0, 64..=65);
        let base = base_position(&host, &HarvestConfig::default(), PITCHER, Position::new(0, 65, 0));
        assert_eq!(base, Position::new(0, 64, 0));
    }

    #[test]
    fn single_segment_is_its_own_base() {
        let mut host = host();
        column(&mut host, WHEAT, 0, 64..=64);
        let clicked = Position::new(0, 64, 0);
        assert_eq!(base_position(&host, &HarvestConfig::default(), WHEAT, clicked), clicked);
    }

    #[test]
    fn different_type_below_stops_the_walk() {
        let mut host = host();
        column(&mut host, WHEAT, 0, 63..=63);
        column(&mut host, PITCHER, 0, 64..=66);
        let base = base_position(&host, &HarvestConfig::default(), PITCHER, Position::new(0, 66, 0));
        assert_eq!(base, Position::new(0, 64, 0));
    }

    #[test]
    fn tall_but_separate_resolves_to_itself() {
        let mut host = host();
        column(&mut host, TOMATO, 0, 64..=65);
        let clicked = Position::new(0, 65, 0);
        assert_eq!(base_position(&host, &HarvestConfig::default(), TOMATO, clicked), clicked);

        let mut config = HarvestConfig::default();
        config.tall_but_separate_ids.clear();
        assert_eq!(base_position(&host, &config, TOMATO, clicked), Position::new(0, 64, 0));
    }

    #[test]
    fn non_stacked_types_never_walk() {
        let mut host = host();
        column(&mut host, COCOA, 0, 64..=65);
        let clicked = Position::new(0, 65, 0);
        assert_eq!(base_position(&host, &HarvestConfig::default(), COCOA, clicked), clicked);
    }

    #[test]
    fn walk_is_bounded() {
        let mut host = host();
        column(&mut host, PITCHER, 0, 0..=200);
        let base = base_position(&host, &HarvestConfig::default(), PITCHER, Position::new(0, 200, 0));
        assert_eq!(base, Position::new(0, 200 - 64, 0));
    }
}
