//! Enumeration types shared by the harvest pipeline and its hosts.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Hands
// ---------------------------------------------------------------------------

/// The hand an actor uses for an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    /// The primary hand. Also the fallback when no tool is required.
    MainHand,
    /// The secondary hand.
    OffHand,
}

impl Hand {
    /// Both hands, in the order the eligibility gate inspects them.
    pub const ALL: [Self; 2] = [Self::MainHand, Self::OffHand];
}

// ---------------------------------------------------------------------------
// Faces
// ---------------------------------------------------------------------------

/// One of the six faces of a grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    /// Negative y.
    Down,
    /// Positive y.
    #[default]
    Up,
    /// Negative z.
    North,
    /// Positive z.
    South,
    /// Negative x.
    West,
    /// Positive x.
    East,
}

impl Face {
    /// Unit offset `(dx, dy, dz)` pointing out of this face.
    pub const fn normal(self) -> (i32, i32, i32) {
        match self {
            Self::Down => (0, -1, 0),
            Self::Up => (0, 1, 0),
            Self::North => (0, 0, -1),
            Self::South => (0, 0, 1),
            Self::West => (-1, 0, 0),
            Self::East => (1, 0, 0),
        }
    }
}

// ---------------------------------------------------------------------------
// Game modes
// ---------------------------------------------------------------------------

/// The rule set an actor currently plays under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Normal play: rewards, tool wear, and drops all apply.
    #[default]
    Survival,
    /// Consequence-free play: tools never wear.
    Creative,
    /// Restricted play. Harvesting behaves as in survival.
    Adventure,
    /// Observer mode: the actor can never interact with the world.
    Spectator,
}

impl GameMode {
    /// Whether this mode observes only and never interacts.
    pub const fn is_spectator(self) -> bool {
        matches!(self, Self::Spectator)
    }

    /// Whether actions in this mode are free of wear and cost.
    pub const fn is_consequence_free(self) -> bool {
        matches!(self, Self::Creative)
    }
}

// ---------------------------------------------------------------------------
// Built-in growable kinds
// ---------------------------------------------------------------------------

/// The small built-in set of object kinds that are always growables.
///
/// Anything else is only harvestable when its registry identifier is
/// allow-listed in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowableKind {
    /// A crop planted in tilled ground (wheat, carrots, beetroots).
    GroundCrop,
    /// A crop that grows upward in place (nether wart style).
    VerticalCrop,
    /// A pod attached to the side of a wall or trunk (cocoa style).
    PodCrop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spectator_is_not_consequence_free() {
        assert!(GameMode::Spectator.is_spectator());
        assert!(!GameMode::Spectator.is_consequence_free());
        assert!(GameMode::Creative.is_consequence_free());
        assert!(!GameMode::Survival.is_spectator());
    }

    #[test]
    fn opposite_faces_have_opposite_normals() {
        let (ux, uy, uz) = Face::Up.normal();
        let (dx, dy, dz) = Face::Down.normal();
        assert_eq!((ux, uy, uz), (-dx, -dy, -dz));
    }

    #[test]
    fn hand_serializes_snake_case() {
        let json = serde_json::to_string(&Hand::OffHand).ok();
        assert_eq!(json.as_deref(), Some("\"off_hand\""));
    }
}
