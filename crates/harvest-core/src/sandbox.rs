//! In-memory host.
//!
//! [`SandboxHost`] implements every collaborator trait over plain maps and
//! journals each side effect as an [`Effect`], in order. Tests assert on the
//! journal; the scenario runner prints it.

use std::collections::{BTreeMap, BTreeSet};

use harvest_types::{
    ActorId, ActorSnapshot, Face, GrowableState, Hand, ItemStack, ObjectType, Position,
    SoundDescriptor, ToolDescriptor, ToolTier,
};

use crate::host::{ActorAccess, Registry, ToolClassifier, WorldAccess};

/// Tool action every harvesting tool must support.
pub const HARVEST_ACTION: &str = "till";

/// Static facts about one object type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectProfile {
    /// Registry identifier; `None` makes lookups fail.
    pub registry_id: Option<String>,
    /// Drops produced when broken or harvested.
    pub drops: Vec<ItemStack>,
    /// Break sound.
    pub sound: Option<SoundDescriptor>,
    /// Whether the object has a collision volume.
    pub collision: bool,
}

/// One recorded side effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A cell's state was overwritten.
    StateSet {
        /// The cell.
        position: Position,
        /// The new state.
        state: GrowableState,
    },
    /// A cell was cleared without side effects.
    StateRemoved {
        /// The cell.
        position: Position,
    },
    /// A cell was broken.
    Destroyed {
        /// The cell.
        position: Position,
        /// Natural drops generated by breaking it (empty when suppressed).
        dropped: Vec<ItemStack>,
    },
    /// Stacks were popped out of a face.
    DropsAtFace {
        /// The cell.
        position: Position,
        /// The face.
        face: Face,
        /// The stacks.
        stacks: Vec<ItemStack>,
    },
    /// Stacks were popped from a cell center.
    DropsAtPosition {
        /// The cell.
        position: Position,
        /// The stacks.
        stacks: Vec<ItemStack>,
    },
    /// A sound was played.
    Sound {
        /// Where.
        position: Position,
        /// Which sound.
        sound_id: String,
    },
    /// An actor was rewarded.
    Reward {
        /// The actor.
        actor: ActorId,
        /// The amount.
        amount: u32,
    },
    /// A held tool lost durability.
    ToolDamaged {
        /// The actor.
        actor: ActorId,
        /// The hand holding the tool.
        hand: Hand,
        /// Durability removed.
        amount: u32,
    },
}

/// What one actor holds and has earned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ActorRecord {
    main_hand: ToolDescriptor,
    off_hand: ToolDescriptor,
    reward: u64,
}

impl ActorRecord {
    const fn hand_mut(&mut self, hand: Hand) -> &mut ToolDescriptor {
        match hand {
            Hand::MainHand => &mut self.main_hand,
            Hand::OffHand => &mut self.off_hand,
        }
    }
}

/// A deterministic in-memory world.
#[derive(Debug, Clone, Default)]
pub struct SandboxHost {
    states: BTreeMap<Position, GrowableState>,
    profiles: BTreeMap<u32, ObjectProfile>,
    actors: BTreeMap<ActorId, ActorRecord>,
    effects: Vec<Effect>,
}

impl SandboxHost {
    /// An empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tiered hoe with 250 durability.
    pub fn hoe(tier: ToolTier) -> ToolDescriptor {
        ToolDescriptor {
            item_id: format!("minecraft:{}_hoe", tier.name()),
            actions: BTreeSet::from([HARVEST_ACTION.to_owned()]),
            tier: Some(tier),
            durability: Some(250),
        }
    }

    /// The generic crop break sound.
    pub fn crop_break_sound() -> SoundDescriptor {
        SoundDescriptor {
            sound_id: "block.crop.break".to_owned(),
            volume: 1.0,
            pitch: 1.0,
        }
    }

    /// Register `object` under `registry_id` with the crop break sound and
    /// one stack of its own item as drops.
    pub fn register(&mut self, object: ObjectType, registry_id: &str) {
        self.register_profile(
            object,
            ObjectProfile {
                registry_id: Some(registry_id.to_owned()),
                drops: vec![ItemStack::new(registry_id, 1)],
                sound: Some(Self::crop_break_sound()),
                collision: false,
            },
        );
    }

    /// Register `object` with a full profile.
    pub fn register_profile(&mut self, object: ObjectType, profile: ObjectProfile) {
        self.profiles.insert(object.raw_id, profile);
    }

    /// Place `state` at `position` without journaling.
    pub fn place(&mut self, position: Position, state: GrowableState) {
        self.states.insert(position, state);
    }

    /// Add an actor holding `main_hand` and `off_hand`.
    pub fn add_actor(&mut self, actor: ActorId, main_hand: ToolDescriptor, off_hand: ToolDescriptor) {
        self.actors.insert(
            actor,
            ActorRecord {
                main_hand,
                off_hand,
                reward: 0,
            },
        );
    }

    /// The state at `position`.
    pub fn state(&self, position: Position) -> Option<&GrowableState> {
        self.states.get(&position)
    }

    /// What `actor` currently holds in `hand`.
    pub fn held(&self, actor: ActorId, hand: Hand) -> ToolDescriptor {
        self.held_item(actor, hand)
    }

    /// Total reward granted to `actor`.
    pub fn reward_of(&self, actor: ActorId) -> u64 {
        self.actors.get(&actor).map_or(0, |record| record.reward)
    }

    /// Every side effect so far, oldest first.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Forget the journal.
    pub fn clear_effects(&mut self) {
        self.effects.clear();
    }

    fn profile(&self, object: ObjectType) -> Option<&ObjectProfile> {
        self.profiles.get(&object.raw_id)
    }
}

impl WorldAccess for SandboxHost {
    fn state_at(&self, position: Position) -> Option<GrowableState> {
        self.states.get(&position).cloned()
    }

    fn set_state(&mut self, position: Position, state: GrowableState) {
        self.states.insert(position, state.clone());
        self.effects.push(Effect::StateSet { position, state });
    }

    fn remove_state(&mut self, position: Position) {
        self.states.remove(&position);
        self.effects.push(Effect::StateRemoved { position });
    }

    fn destroy_state(&mut self, position: Position, natural_drops: bool, _actor: ActorId) {
        let dropped = match self.states.remove(&position) {
            Some(state) if natural_drops => self
                .profile(state.object)
                .map(|profile| profile.drops.clone())
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        self.effects.push(Effect::Destroyed { position, dropped });
    }

    fn has_collision(&self, _position: Position, state: &GrowableState) -> bool {
        self.profile(state.object).is_some_and(|profile| profile.collision)
    }

    fn default_drops(
        &self,
        _position: Position,
        state: &GrowableState,
        _actor: &ActorSnapshot,
        _hand: Hand,
    ) -> Vec<ItemStack> {
        self.profile(state.object)
            .map(|profile| profile.drops.clone())
            .unwrap_or_default()
    }

    fn emit_drops_at_face(&mut self, position: Position, face: Face, stacks: &[ItemStack]) {
        self.effects.push(Effect::DropsAtFace {
            position,
            face,
            stacks: stacks.to_vec(),
        });
    }

    fn emit_drops_at_position(&mut self, position: Position, stacks: &[ItemStack]) {
        self.effects.push(Effect::DropsAtPosition {
            position,
            stacks: stacks.to_vec(),
        });
    }

    fn break_sound(&self, _position: Position, state: &GrowableState) -> Option<SoundDescriptor> {
        self.profile(state.object).and_then(|profile| profile.sound.clone())
    }

    fn play_sound(&mut self, position: Position, sound: &SoundDescriptor) {
        self.effects.push(Effect::Sound {
            position,
            sound_id: sound.sound_id.clone(),
        });
    }
}

impl ActorAccess for SandboxHost {
    fn held_item(&self, actor: ActorId, hand: Hand) -> ToolDescriptor {
        self.actors
            .get(&actor)
            .map(|record| match hand {
                Hand::MainHand => record.main_hand.clone(),
                Hand::OffHand => record.off_hand.clone(),
            })
            .unwrap_or_default()
    }

    fn grant_reward(&mut self, actor: ActorId, amount: u32) {
        let record = self.actors.entry(actor).or_default();
        record.reward = record.reward.saturating_add(u64::from(amount));
        self.effects.push(Effect::Reward { actor, amount });
    }

    fn damage_held_tool(&mut self, actor: ActorId, hand: Hand, amount: u32) {
        let Some(record) = self.actors.get_mut(&actor) else {
            return;
        };
        let tool = record.hand_mut(hand);
        if let Some(durability) = tool.durability {
            let remaining = durability.saturating_sub(amount);
            if remaining == 0 {
                // Broken.
                *tool = ToolDescriptor::empty();
            } else {
                tool.durability = Some(remaining);
            }
        }
        self.effects.push(Effect::ToolDamaged { actor, hand, amount });
    }
}

impl ToolClassifier for SandboxHost {
    fn is_harvesting_tool(&self, item: &ToolDescriptor) -> bool {
        !item.is_empty() && item.actions.contains(HARVEST_ACTION)
    }

    fn tier_of(&self, item: &ToolDescriptor) -> Option<ToolTier> {
        item.tier.clone()
    }
}

impl Registry for SandboxHost {
    fn registry_id_of(&self, object: ObjectType) -> Option<String> {
        self.profile(object).and_then(|profile| profile.registry_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use harvest_types::GrowableKind;

    use super::*;

    const WHEAT: ObjectType = ObjectType::builtin(1, GrowableKind::GroundCrop);

    #[test]
    fn tool_breaks_when_durability_runs_out() {
        let mut host = SandboxHost::new();
        let actor = ActorId::new();
        let mut hoe = SandboxHost::hoe(ToolTier::WOOD);
        hoe.durability = Some(2);
        host.add_actor(actor, hoe, ToolDescriptor::empty());

        host.damage_held_tool(actor, Hand::MainHand, 1);
        assert_eq!(host.held_item(actor, Hand::MainHand).durability, Some(1));
        host.damage_held_tool(actor, Hand::MainHand, 1);
        assert!(host.held_item(actor, Hand::MainHand).is_empty());
    }

    #[test]
    fn suppressed_destroy_drops_nothing() {
        let mut host = SandboxHost::new();
        host.register(WHEAT, "minecraft:wheat");
        let position = Position::new(0, 1, 0);
        host.place(position, GrowableState::with_age(WHEAT, 7, 7));
        host.destroy_state(position, false, ActorId::new());
        assert_eq!(
            host.effects(),
            &[Effect::Destroyed {
                position,
                dropped: Vec::new()
            }]
        );
        assert!(host.state(position).is_none());
    }

    #[test]
    fn unknown_actor_holds_nothing() {
        let host = SandboxHost::new();
        assert!(host.held_item(ActorId::new(), Hand::OffHand).is_empty());
        assert_eq!(host.reward_of(ActorId::new()), 0);
    }
}
