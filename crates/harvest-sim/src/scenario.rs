//! Scenario files: a small world, one actor, and the interactions to replay.
//!
//! ```yaml
//! objects:
//!   - id: minecraft:wheat
//!     kind: ground_crop
//!     drops: [{ item_id: minecraft:wheat, count: 1 }]
//! placements:
//!   - object: minecraft:wheat
//!     position: { x: 0, y: 64, z: 0 }
//!     age: 7
//!     max_age: 7
//! actor:
//!   main_hand: { item_id: minecraft:iron_hoe, tier: iron, durability: 250 }
//! interactions:
//!   - position: { x: 0, y: 64, z: 0 }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use harvest_core::sandbox::{HARVEST_ACTION, ObjectProfile, SandboxHost};
use harvest_types::{
    ActorId, ActorSnapshot, Face, GameMode, GrowableKind, GrowableState, Hand, HitData,
    InteractionEvent, InteractionId, ItemStack, ObjectType, Position, SoundDescriptor,
    ToolDescriptor, ToolTier,
};
use serde::Deserialize;

use crate::error::SimError;

// -----------------------------------------------------------------------
// File format
// -----------------------------------------------------------------------

/// A complete scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Object types known to the registry.
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,

    /// Initial world contents.
    #[serde(default)]
    pub placements: Vec<Placement>,

    /// The acting actor.
    #[serde(default)]
    pub actor: ActorSpec,

    /// Interactions to replay, in order.
    #[serde(default)]
    pub interactions: Vec<InteractionSpec>,
}

/// One object type.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectSpec {
    /// Registry identifier.
    pub id: String,

    /// Built-in growable kind; omit for allow-list candidates.
    #[serde(default)]
    pub kind: Option<GrowableKind>,

    /// Stacked-growable category. Defaults to `true` for built-in kinds.
    #[serde(default)]
    pub stacked: Option<bool>,

    /// Whether the object has a collision volume.
    #[serde(default)]
    pub collision: bool,

    /// Drops; defaults to one of the object itself.
    #[serde(default)]
    pub drops: Option<Vec<ItemStack>>,

    /// Break sound identifier.
    #[serde(default = "default_sound")]
    pub sound: Option<String>,
}

/// One placed object.
#[derive(Debug, Clone, Deserialize)]
pub struct Placement {
    /// Registry identifier of a declared object.
    pub object: String,

    /// Where to place it.
    pub position: Position,

    /// Current age; omit for objects without growth state.
    #[serde(default)]
    pub age: Option<i32>,

    /// Maximum age.
    #[serde(default = "default_max_age")]
    pub max_age: i32,
}

/// The acting actor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorSpec {
    /// Game mode.
    #[serde(default)]
    pub mode: GameMode,

    /// Sneaking stance.
    #[serde(default)]
    pub sneaking: bool,

    /// Main-hand item.
    #[serde(default)]
    pub main_hand: Option<HeldItem>,

    /// Off-hand item.
    #[serde(default)]
    pub off_hand: Option<HeldItem>,
}

/// A held item.
#[derive(Debug, Clone, Deserialize)]
pub struct HeldItem {
    /// Registry identifier.
    pub item_id: String,

    /// Material tier.
    #[serde(default)]
    pub tier: Option<ToolTier>,

    /// Whether the item is a harvesting tool.
    #[serde(default = "default_true")]
    pub harvesting: bool,

    /// Remaining durability.
    #[serde(default)]
    pub durability: Option<u32>,
}

/// One interaction to replay.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionSpec {
    /// Clicked position.
    pub position: Position,

    /// Hand the event fires for.
    #[serde(default = "default_hand")]
    pub hand: Hand,

    /// Clicked face.
    #[serde(default)]
    pub face: Face,

    /// Overrides the actor's stance for this interaction.
    #[serde(default)]
    pub sneaking: Option<bool>,

    /// Whether an outer permission layer denied the interaction.
    #[serde(default)]
    pub denied: bool,

    /// Whether to replay on the authoritative side.
    #[serde(default = "default_true")]
    pub authoritative: bool,
}

const fn default_true() -> bool {
    true
}

const fn default_max_age() -> i32 {
    7
}

const fn default_hand() -> Hand {
    Hand::MainHand
}

fn default_sound() -> Option<String> {
    Some(String::from("block.crop.break"))
}

// -----------------------------------------------------------------------
// Loading
// -----------------------------------------------------------------------

impl Scenario {
    /// Load a scenario from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a scenario from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, SimError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Build the in-memory host and the actor this scenario describes.
    pub fn build(&self) -> Result<(SandboxHost, ActorSnapshot), SimError> {
        let mut host = SandboxHost::new();
        let mut types = BTreeMap::new();
        for (index, spec) in self.objects.iter().enumerate() {
            let raw_id = u32::try_from(index)
                .ok()
                .and_then(|index| index.checked_add(1))
                .ok_or(SimError::TooManyObjects)?;
            let object = ObjectType {
                raw_id,
                builtin: spec.kind,
                stacked: spec.stacked.unwrap_or(spec.kind.is_some()),
            };
            host.register_profile(object, spec.profile());
            types.insert(spec.id.as_str(), object);
        }

        for placement in &self.placements {
            let object = types.get(placement.object.as_str()).copied().ok_or_else(|| {
                SimError::UnknownObject {
                    object: placement.object.clone(),
                    position: placement.position,
                }
            })?;
            let state = placement.age.map_or_else(
                || GrowableState::new(object),
                |age| GrowableState::with_age(object, age, placement.max_age),
            );
            host.place(placement.position, state);
        }

        let actor = ActorSnapshot {
            id: ActorId::new(),
            mode: self.actor.mode,
            sneaking: self.actor.sneaking,
        };
        host.add_actor(
            actor.id,
            held_descriptor(self.actor.main_hand.as_ref()),
            held_descriptor(self.actor.off_hand.as_ref()),
        );
        Ok((host, actor))
    }
}

impl ObjectSpec {
    fn profile(&self) -> ObjectProfile {
        ObjectProfile {
            registry_id: Some(self.id.clone()),
            drops: self
                .drops
                .clone()
                .unwrap_or_else(|| vec![ItemStack::new(self.id.as_str(), 1)]),
            sound: self.sound.as_ref().map(|sound_id| SoundDescriptor {
                sound_id: sound_id.clone(),
                volume: 1.0,
                pitch: 1.0,
            }),
            collision: self.collision,
        }
    }
}

impl InteractionSpec {
    /// The event this interaction fires for `actor`.
    pub fn to_event(&self, actor: ActorSnapshot) -> InteractionEvent {
        InteractionEvent {
            id: InteractionId::new(),
            actor: ActorSnapshot {
                sneaking: self.sneaking.unwrap_or(actor.sneaking),
                ..actor
            },
            hand: self.hand,
            position: self.position,
            face: self.face,
            hit: Some(HitData {
                x: f64::from(self.position.x) + 0.5,
                y: f64::from(self.position.y) + 1.0,
                z: f64::from(self.position.z) + 0.5,
                inside: false,
            }),
            denied: self.denied,
            authoritative: self.authoritative,
        }
    }
}

fn held_descriptor(item: Option<&HeldItem>) -> ToolDescriptor {
    item.map_or_else(ToolDescriptor::empty, |item| ToolDescriptor {
        item_id: item.item_id.clone(),
        tier: item.tier.clone(),
        actions: if item.harvesting {
            BTreeSet::from([HARVEST_ACTION.to_owned()])
        } else {
            BTreeSet::new()
        },
        durability: item.durability,
    })
}
