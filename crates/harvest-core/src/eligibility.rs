//! Which hand, if any, an interaction harvests with.
//!
//! Spectators never get a hand. Sneaking reserves the interaction for normal
//! placement, so a sneaking actor never harvests, not even with
//! `require_tool` off. Otherwise a harvesting tool in the main hand wins,
//! then one in the off hand, then the bare main hand when no tool is
//! required.

use harvest_types::{ActorSnapshot, Hand};

use crate::config::HarvestConfig;
use crate::host::{ActorAccess, ToolClassifier};

/// The hand to harvest with, or `None` if no hand qualifies.
pub fn interaction_hand<H>(host: &H, actor: &ActorSnapshot, config: &HarvestConfig) -> Option<Hand>
where
    H: ActorAccess + ToolClassifier + ?Sized,
{
    if actor.sneaking || actor.mode.is_spectator() {
        return None;
    }
    Hand::ALL
        .into_iter()
        .find(|&hand| host.is_harvesting_tool(&host.held_item(actor.id, hand)))
        .or(if config.require_tool {
            None
        } else {
            Some(Hand::MainHand)
        })
}

/// Whether `actor` may interact at all. Spectators never do, and neither
/// does anyone whose interaction an outer permission layer `denied`.
pub const fn can_interact(actor: &ActorSnapshot, denied: bool) -> bool {
    !actor.mode.is_spectator() && !denied
}

#[cfg(test)]
mod tests {
    use harvest_types::{ActorId, GameMode, ToolDescriptor, ToolTier};

    use super::*;
    use crate::sandbox::SandboxHost;

    fn requiring_tool() -> HarvestConfig {
        HarvestConfig {
            require_tool: true,
            ..HarvestConfig::default()
        }
    }

    fn actor_with(host: &mut SandboxHost, main: ToolDescriptor, off: ToolDescriptor) -> ActorSnapshot {
        let id = ActorId::new();
        host.add_actor(id, main, off);
        ActorSnapshot::survival(id)
    }

    #[test]
    fn main_hand_tool_wins() {
        let mut host = SandboxHost::new();
        let actor = actor_with(
            &mut host,
            SandboxHost::hoe(ToolTier::WOOD),
            SandboxHost::hoe(ToolTier::IRON),
        );
        assert_eq!(interaction_hand(&host, &actor, &requiring_tool()), Some(Hand::MainHand));
    }

    #[test]
    fn off_hand_tool_is_second_choice() {
        let mut host = SandboxHost::new();
        let actor = actor_with(&mut host, ToolDescriptor::empty(), SandboxHost::hoe(ToolTier::STONE));
        assert_eq!(interaction_hand(&host, &actor, &requiring_tool()), Some(Hand::OffHand));
    }

    #[test]
    fn bare_hand_falls_back_only_without_tool_requirement() {
        let mut host = SandboxHost::new();
        let actor = actor_with(&mut host, ToolDescriptor::empty(), ToolDescriptor::empty());
        assert_eq!(interaction_hand(&host, &actor, &requiring_tool()), None);
        assert_eq!(
            interaction_hand(&host, &actor, &HarvestConfig::default()),
            Some(Hand::MainHand)
        );
    }

    #[test]
    fn sneaking_short_circuits_everything() {
        let mut host = SandboxHost::new();
        let mut actor = actor_with(
            &mut host,
            SandboxHost::hoe(ToolTier::DIAMOND),
            ToolDescriptor::empty(),
        );
        actor.sneaking = true;
        assert_eq!(interaction_hand(&host, &actor, &requiring_tool()), None);
        assert_eq!(interaction_hand(&host, &actor, &HarvestConfig::default()), None);
    }

    #[test]
    fn spectators_never_get_a_hand() {
        let mut host = SandboxHost::new();
        let mut actor = actor_with(
            &mut host,
            SandboxHost::hoe(ToolTier::NETHERITE),
            SandboxHost::hoe(ToolTier::NETHERITE),
        );
        actor.mode = GameMode::Spectator;
        assert_eq!(interaction_hand(&host, &actor, &requiring_tool()), None);
        assert_eq!(interaction_hand(&host, &actor, &HarvestConfig::default()), None);
    }

    #[test]
    fn spectators_and_denied_interactions_are_rejected() {
        let mut actor = ActorSnapshot::survival(ActorId::new());
        assert!(can_interact(&actor, false));
        assert!(!can_interact(&actor, true));
        actor.mode = GameMode::Spectator;
        assert!(!can_interact(&actor, false));
        actor.mode = GameMode::Creative;
        assert!(can_interact(&actor, false));
    }
}
