//! The interaction entry point.
//!
//! [`HarvestEngine`] owns the hook listeners and turns one
//! [`InteractionEvent`] into an [`InteractionOutcome`]:
//!
//! - [`Pass`](InteractionOutcome::Pass) when the interaction is not a harvest
//!   (wrong hand, not a growable, vetoed, immature, base cannot be reset); the
//!   host runs its default behavior.
//! - [`Acknowledged`](InteractionOutcome::Acknowledged) when a
//!   non-authoritative replica recognises a harvest it must not perform.
//! - [`Consumed`](InteractionOutcome::Consumed) when the harvest ran and the
//!   host's default behavior must be suppressed.
//!
//! Nothing here returns an error. Classification and maturity failures are
//! logged and degrade to `Pass`. An abandoned harvest leaves the world
//! untouched, so on the clicked growable it also degrades to `Pass`; during
//! an area harvest it only skips that neighbor.

use harvest_events::{EventBus, HarvestSite};
use harvest_types::{Hand, HitData, InteractionEvent, InteractionOutcome, Position};
use tracing::{debug, trace};

use crate::area;
use crate::config::HarvestConfig;
use crate::eligibility;
use crate::executor::{self, HarvestContext};
use crate::growth;
use crate::host::HarvestHost;
use crate::multiblock;

/// The right-click harvest engine.
#[derive(Debug, Default)]
pub struct HarvestEngine {
    events: EventBus,
}

impl HarvestEngine {
    /// An engine with no hook listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// The hook bus, for registering listeners.
    pub const fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Process one interaction against `host` using the `config` snapshot.
    pub fn handle_interaction<H>(
        &mut self,
        host: &mut H,
        config: &HarvestConfig,
        event: &InteractionEvent,
    ) -> InteractionOutcome
    where
        H: HarvestHost + ?Sized,
    {
        if !eligibility::can_interact(&event.actor, event.denied) {
            trace!(interaction = %event.id, "Actor cannot interact");
            return InteractionOutcome::Pass;
        }
        let Some(hand) = eligibility::interaction_hand(&*host, &event.actor, config) else {
            trace!(interaction = %event.id, "No harvesting hand");
            return InteractionOutcome::Pass;
        };
        if hand != event.hand {
            trace!(
                interaction = %event.id,
                event_hand = ?event.hand,
                harvest_hand = ?hand,
                "Interaction fired for the other hand"
            );
            return InteractionOutcome::Pass;
        }
        let Some(ctx) = self.prepare(&*host, config, event, hand, event.position, event.hit, true)
        else {
            return InteractionOutcome::Pass;
        };
        if !event.authoritative {
            debug!(interaction = %event.id, "Harvest recognised on non-authoritative side");
            return InteractionOutcome::Acknowledged;
        }

        let base = multiblock::base_position(&*host, config, ctx.state.object, ctx.position);
        if !executor::harvest(host, &mut self.events, config, &ctx) {
            return InteractionOutcome::Pass;
        }

        let tool = host.held_item(event.actor.id, hand);
        let neighbors = area::expand(&*host, &tool, base, config);
        if !neighbors.is_empty() {
            debug!(
                interaction = %event.id,
                base = %base,
                candidates = neighbors.len(),
                "Area harvest"
            );
        }
        for position in neighbors {
            self.harvest_neighbor(host, config, event, hand, position);
        }

        InteractionOutcome::Consumed
    }

    /// Re-validate and harvest one area neighbor.
    fn harvest_neighbor<H>(
        &mut self,
        host: &mut H,
        config: &HarvestConfig,
        event: &InteractionEvent,
        hand: Hand,
        position: Position,
    ) where
        H: HarvestHost + ?Sized,
    {
        if eligibility::interaction_hand(&*host, &event.actor, config) != Some(hand) {
            trace!(position = %position, "Harvesting hand changed, skipping neighbor");
            return;
        }
        let Some(ctx) = self.prepare(&*host, config, event, hand, position, None, false) else {
            return;
        };
        if !executor::harvest(host, &mut self.events, config, &ctx) {
            trace!(interaction = %event.id, position = %position, "Skipping failed neighbor");
        }
    }

    /// Classification, `harvest_check`, and maturity for one candidate.
    ///
    /// Returns the context to harvest with, or `None` if the candidate does
    /// not qualify this time.
    #[allow(clippy::too_many_arguments)]
    fn prepare<H>(
        &mut self,
        host: &H,
        config: &HarvestConfig,
        event: &InteractionEvent,
        hand: Hand,
        position: Position,
        hit: Option<HitData>,
        first: bool,
    ) -> Option<HarvestContext>
    where
        H: HarvestHost + ?Sized,
    {
        let state = host.state_at(position)?;
        if !growth::classify(host, &state, config).is_growable() {
            trace!(position = %position, "Not a growable");
            return None;
        }
        if !host.has_correct_tool_for_drops(event.actor.id, &state) {
            trace!(position = %position, "Held item cannot collect drops");
            return None;
        }
        let site = HarvestSite {
            interaction: event.id,
            actor: event.actor,
            hand,
            position,
            face: event.face,
            hit,
            state: state.clone(),
        };
        if !self.events.post_harvest_check(site, first) {
            debug!(interaction = %event.id, position = %position, first, "Harvest vetoed by listener");
            return None;
        }
        let maturity = match growth::maturity_property(&state) {
            Ok(maturity) => maturity,
            Err(error) => {
                debug!(position = %position, %error, "Growable has no usable maturity property");
                return None;
            }
        };
        if !growth::is_mature(&state, &maturity) {
            trace!(position = %position, "Growable is not mature");
            return None;
        }
        Some(HarvestContext {
            interaction: event.id,
            actor: event.actor,
            hand,
            position,
            face: event.face,
            hit,
            state,
            maturity,
        })
    }
}

#[cfg(test)]
mod tests {
    use harvest_types::{ActorId, ActorSnapshot, GrowableKind, GrowableState, ObjectType, ToolDescriptor};

    use super::*;
    use crate::sandbox::SandboxHost;

    const WHEAT: ObjectType = ObjectType::builtin(1, GrowableKind::GroundCrop);

    fn setup(main: ToolDescriptor, off: ToolDescriptor) -> (SandboxHost, InteractionEvent) {
        let mut host = SandboxHost::new();
        host.register(WHEAT, "minecraft:wheat");
        let actor = ActorId::new();
        host.add_actor(actor, main, off);
        let position = Position::new(0, 64, 0);
        host.place(position, GrowableState::with_age(WHEAT, 7, 7));
        (host, InteractionEvent::main_hand(ActorSnapshot::survival(actor), position))
    }

    #[test]
    fn off_hand_tool_ignores_main_hand_event() {
        let (mut host, mut event) = setup(
            ToolDescriptor::empty(),
            SandboxHost::hoe(harvest_types::ToolTier::WOOD),
        );
        let mut engine = HarvestEngine::new();
        let config = HarvestConfig::default();

        assert_eq!(
            engine.handle_interaction(&mut host, &config, &event),
            InteractionOutcome::Pass
        );
        event.hand = Hand::OffHand;
        assert_eq!(
            engine.handle_interaction(&mut host, &config, &event),
            InteractionOutcome::Consumed
        );
    }

    #[test]
    fn denied_interactions_pass() {
        let (mut host, mut event) = setup(ToolDescriptor::empty(), ToolDescriptor::empty());
        event.denied = true;
        let outcome = HarvestEngine::new().handle_interaction(&mut host, &HarvestConfig::default(), &event);
        assert_eq!(outcome, InteractionOutcome::Pass);
        assert!(host.effects().is_empty());
    }

    #[test]
    fn empty_cell_passes() {
        let (mut host, mut event) = setup(ToolDescriptor::empty(), ToolDescriptor::empty());
        event.position = Position::new(5, 64, 5);
        let outcome = HarvestEngine::new().handle_interaction(&mut host, &HarvestConfig::default(), &event);
        assert_eq!(outcome, InteractionOutcome::Pass);
    }
}
