//! The interaction event delivered by the host and the outcome reported back.

use serde::{Deserialize, Serialize};

use crate::enums::{Face, GameMode, Hand};
use crate::ids::{ActorId, InteractionId};
use crate::structs::{HitData, Position};

/// What the engine needs to know about the acting actor at event time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// The actor's identifier.
    pub id: ActorId,
    /// The actor's current game mode.
    #[serde(default)]
    pub mode: GameMode,
    /// Whether the actor is crouching/sneaking.
    #[serde(default)]
    pub sneaking: bool,
}

impl ActorSnapshot {
    /// A standing survival-mode actor.
    pub const fn survival(id: ActorId) -> Self {
        Self {
            id,
            mode: GameMode::Survival,
            sneaking: false,
        }
    }
}

/// One "use item on object" interaction, as fired by the host.
///
/// Hosts fire the event once per hand; the engine only acts on the event
/// whose `hand` matches the hand it would harvest with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Correlation identifier for logs.
    pub id: InteractionId,
    /// The acting actor.
    pub actor: ActorSnapshot,
    /// The hand this event was fired for.
    pub hand: Hand,
    /// The clicked position.
    pub position: Position,
    /// The clicked face.
    pub face: Face,
    /// Raw hit payload, when the host has one.
    #[serde(default)]
    pub hit: Option<HitData>,
    /// Whether an outer permission system already denied this interaction.
    #[serde(default)]
    pub denied: bool,
    /// Whether this side owns the world state. Non-authoritative replicas
    /// recognise harvests but never mutate.
    #[serde(default = "default_true")]
    pub authoritative: bool,
}

impl InteractionEvent {
    /// An authoritative, undenied main-hand click on `position`'s top face.
    pub fn main_hand(actor: ActorSnapshot, position: Position) -> Self {
        Self {
            id: InteractionId::new(),
            actor,
            hand: Hand::MainHand,
            position,
            face: Face::Up,
            hit: None,
            denied: false,
            authoritative: true,
        }
    }
}

/// The engine's verdict on one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionOutcome {
    /// Not a harvest. The host continues with its default "use" behavior.
    Pass,
    /// A harvest on a non-authoritative replica: the default behavior is
    /// suppressed but nothing was mutated here.
    Acknowledged,
    /// A harvest was performed. The default behavior must be suppressed.
    Consumed,
}

impl InteractionOutcome {
    /// Whether the host should suppress its default behavior.
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::Pass)
    }
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pass_is_unhandled() {
        assert!(!InteractionOutcome::Pass.is_handled());
        assert!(InteractionOutcome::Acknowledged.is_handled());
        assert!(InteractionOutcome::Consumed.is_handled());
    }

    #[test]
    fn events_default_to_authoritative() {
        let json = format!(
            r#"{{"id":"{}","actor":{{"id":"{}"}},"hand":"main_hand","position":{{"x":0,"y":64,"z":0}},"face":"up"}}"#,
            InteractionId::new(),
            ActorId::new()
        );
        let event: Option<InteractionEvent> = serde_json::from_str(&json).ok();
        assert!(event.is_some_and(|e| e.authoritative && !e.denied && e.hit.is_none()));
    }
}
