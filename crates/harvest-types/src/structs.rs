//! Core value structs: grid positions, item stacks, and descriptors the host
//! hands to the engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::Face;
use crate::tier::ToolTier;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// An integer location in the world grid. Exact equality; usable as a map key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// East-west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl Position {
    /// Create a position from its three coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset this position, returning `None` if any coordinate overflows.
    pub const fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        let Some(x) = self.x.checked_add(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add(dy) else {
            return None;
        };
        let Some(z) = self.z.checked_add(dz) else {
            return None;
        };
        Some(Self { x, y, z })
    }

    /// The position directly above, or `None` at the top of the grid.
    pub const fn above(self) -> Option<Self> {
        self.checked_offset(0, 1, 0)
    }

    /// The position directly below, or `None` at the bottom of the grid.
    pub const fn below(self) -> Option<Self> {
        self.checked_offset(0, -1, 0)
    }

    /// The neighbouring position across `face`.
    pub const fn relative(self, face: Face) -> Option<Self> {
        let (dx, dy, dz) = face.normal();
        self.checked_offset(dx, dy, dz)
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Item stacks
// ---------------------------------------------------------------------------

/// A stack of identical items emitted into the world as a drop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Registry identifier of the item, e.g. `minecraft:wheat`.
    pub item_id: String,
    /// Number of items in the stack.
    pub count: u32,
}

impl ItemStack {
    /// Create a stack of `count` items.
    pub fn new(item_id: impl Into<String>, count: u32) -> Self {
        Self {
            item_id: item_id.into(),
            count,
        }
    }
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// Whatever an actor holds in one hand, as far as the engine cares.
///
/// The engine never inspects these fields itself; the host's tool classifier
/// decides whether this is a harvesting tool and which tier it has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Registry identifier of the held item; empty for an empty hand.
    pub item_id: String,
    /// Material tier, for tiered tools.
    #[serde(default)]
    pub tier: Option<ToolTier>,
    /// Tool actions the item can perform (e.g. `till`).
    #[serde(default)]
    pub actions: BTreeSet<String>,
    /// Remaining durability, for items that wear.
    #[serde(default)]
    pub durability: Option<u32>,
}

impl ToolDescriptor {
    /// An empty hand.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the hand holds nothing.
    pub fn is_empty(&self) -> bool {
        self.item_id.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Sound and hit data
// ---------------------------------------------------------------------------

/// A sound the host can play at a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Registry identifier of the sound event.
    pub sound_id: String,
    /// Playback volume.
    pub volume: f32,
    /// Playback pitch.
    pub pitch: f32,
}

/// Raw hit payload of an interaction: where exactly the ray met the object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitData {
    /// Hit location, x.
    pub x: f64,
    /// Hit location, y.
    pub y: f64,
    /// Hit location, z.
    pub z: f64,
    /// Whether the ray started inside the object.
    pub inside: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_saturate_to_none() {
        let top = Position::new(0, i32::MAX, 0);
        assert_eq!(top.above(), None);
        assert_eq!(top.below(), Some(Position::new(0, i32::MAX - 1, 0)));
    }

    #[test]
    fn relative_follows_face_normal() {
        let origin = Position::new(1, 2, 3);
        assert_eq!(origin.relative(Face::East), Some(Position::new(2, 2, 3)));
        assert_eq!(origin.relative(Face::North), Some(Position::new(1, 2, 2)));
    }

    #[test]
    fn empty_tool_is_empty() {
        assert!(ToolDescriptor::empty().is_empty());
        let hoe = ToolDescriptor {
            item_id: "minecraft:iron_hoe".to_owned(),
            ..ToolDescriptor::default()
        };
        assert!(!hoe.is_empty());
    }
}
