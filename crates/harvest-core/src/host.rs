//! Collaborator traits implemented by the host simulation.
//!
//! The engine reads and mutates the world only through these narrow
//! interfaces and never keeps a reference to the host past one interaction.
//! [`HarvestHost`] is blanket-implemented for anything that implements all
//! four traits, so hosts only write the four impls.

use std::collections::BTreeSet;

use harvest_types::{
    ActorId, ActorSnapshot, Face, GrowableState, Hand, ItemStack, ObjectType, Position,
    SoundDescriptor, ToolDescriptor, ToolTier,
};
use tracing::debug;

use crate::error::RegistryLookupFailure;

/// Grid reads and writes, drop emission, and sound playback.
pub trait WorldAccess {
    /// The state at `position`, or `None` for an empty cell.
    fn state_at(&self, position: Position) -> Option<GrowableState>;

    /// Overwrite the state at `position`.
    fn set_state(&mut self, position: Position, state: GrowableState);

    /// Clear `position` without side effects.
    fn remove_state(&mut self, position: Position);

    /// Break the object at `position` as `actor` would, generating its
    /// natural drops only when `natural_drops` is set.
    fn destroy_state(&mut self, position: Position, natural_drops: bool, actor: ActorId);

    /// Whether the object at `position` has a non-empty collision volume.
    fn has_collision(&self, position: Position, state: &GrowableState) -> bool;

    /// The drops breaking `state` would produce for `actor` using `hand`.
    fn default_drops(
        &self,
        position: Position,
        state: &GrowableState,
        actor: &ActorSnapshot,
        hand: Hand,
    ) -> Vec<ItemStack>;

    /// Pop `stacks` out of `face` of the cell at `position`.
    fn emit_drops_at_face(&mut self, position: Position, face: Face, stacks: &[ItemStack]);

    /// Pop `stacks` from the center of the cell at `position`.
    fn emit_drops_at_position(&mut self, position: Position, stacks: &[ItemStack]);

    /// The break sound of `state`, if it has one.
    fn break_sound(&self, position: Position, state: &GrowableState) -> Option<SoundDescriptor>;

    /// Play `sound` at `position`.
    fn play_sound(&mut self, position: Position, sound: &SoundDescriptor);
}

/// Actor inventory and progression.
pub trait ActorAccess {
    /// What `actor` holds in `hand`.
    fn held_item(&self, actor: ActorId, hand: Hand) -> ToolDescriptor;

    /// Whether `actor` may collect drops from `state` with what they hold.
    fn has_correct_tool_for_drops(&self, actor: ActorId, state: &GrowableState) -> bool {
        let _ = (actor, state);
        true
    }

    /// Grant `amount` reward (experience) to `actor`.
    fn grant_reward(&mut self, actor: ActorId, amount: u32);

    /// Remove `amount` durability from the tool in `actor`'s `hand`.
    fn damage_held_tool(&mut self, actor: ActorId, hand: Hand, amount: u32);
}

/// Tool capability tests.
pub trait ToolClassifier {
    /// Whether `item` counts as a harvesting tool (a hoe).
    fn is_harvesting_tool(&self, item: &ToolDescriptor) -> bool;

    /// The tier of `item`, or `None` for untiered items.
    fn tier_of(&self, item: &ToolDescriptor) -> Option<ToolTier>;
}

/// Registry identifier lookups.
pub trait Registry {
    /// The registry identifier (e.g. `minecraft:wheat`) of `object`.
    fn registry_id_of(&self, object: ObjectType) -> Option<String>;
}

/// Everything the engine needs from its host.
pub trait HarvestHost: WorldAccess + ActorAccess + ToolClassifier + Registry {}

impl<T> HarvestHost for T where T: WorldAccess + ActorAccess + ToolClassifier + Registry + ?Sized {}

/// Resolve the registry identifier of `object`.
pub fn registry_id<R>(registry: &R, object: ObjectType) -> Result<String, RegistryLookupFailure>
where
    R: Registry + ?Sized,
{
    registry
        .registry_id_of(object)
        .ok_or(RegistryLookupFailure(object))
}

/// Whether `object`'s registry identifier is in `ids`.
///
/// A failed lookup is logged and treated as "not in the set".
pub fn registry_id_in<R>(registry: &R, object: ObjectType, ids: &BTreeSet<String>) -> bool
where
    R: Registry + ?Sized,
{
    if ids.is_empty() {
        return false;
    }
    match registry_id(registry, object) {
        Ok(id) => ids.contains(&id),
        Err(error) => {
            debug!(%error, "Registry lookup failed, treating as not matching");
            false
        }
    }
}
