//! One full harvest of one resolved growable.
//!
//! The sequence is fixed:
//!
//! 1. `before_harvest` hook
//! 2. reward, if `reward_amount > 0`
//! 3. tool wear, if a tool is required, wear is configured, and the actor is
//!    not in a consequence-free mode
//! 4. base position resolution
//! 5. `harvest_drops` hook and drop emission
//! 6. reset of the base's maturity (or removal, for remove-on-harvest types)
//! 7. destruction of the stacked segment directly above the base, dropping
//!    nothing when the base was removed or the drops were customized
//! 8. break sound, if enabled
//! 9. `after_harvest` hook
//!
//! The base, its reset state, and the segment above are resolved before
//! step 1. If any of that fails the harvest is abandoned untouched, so a
//! crop whose base cannot be reset never pays out. Sibling harvests of an
//! area expansion are unaffected.

use harvest_events::{EventBus, HarvestSite};
use harvest_types::{
    ActorSnapshot, Face, GrowableState, Hand, HitData, InteractionId, Position,
};
use tracing::{debug, trace};

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::growth::{self, MaturityProperty};
use crate::host::{HarvestHost, registry_id_in};
use crate::multiblock;

// ---------------------------------------------------------------------------
// HarvestContext
// ---------------------------------------------------------------------------

/// Everything one harvest needs. Built per harvest and dropped at its end.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestContext {
    /// Interaction this harvest belongs to.
    pub interaction: InteractionId,
    /// The harvesting actor.
    pub actor: ActorSnapshot,
    /// Hand holding the tool (or bare hand).
    pub hand: Hand,
    /// Position of the growable: the clicked cell or an area neighbor.
    pub position: Position,
    /// Face drops are emitted from.
    pub face: Face,
    /// Raw hit data; `None` for area neighbors.
    pub hit: Option<HitData>,
    /// State at `position` when the harvest was decided.
    pub state: GrowableState,
    /// The validated maturity property of `state`.
    pub maturity: MaturityProperty,
}

impl HarvestContext {
    /// Hook payload describing the harvested cell.
    pub fn site(&self) -> HarvestSite {
        self.site_at(self.position, self.state.clone())
    }

    fn site_at(&self, position: Position, state: GrowableState) -> HarvestSite {
        HarvestSite {
            interaction: self.interaction,
            actor: self.actor,
            hand: self.hand,
            position,
            face: self.face,
            hit: self.hit,
            state,
        }
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Run one harvest.
///
/// Returns `false` if the harvest was abandoned. The failure is logged here.
/// Everything that can fail is resolved before the first hook fires, so an
/// abandoned harvest has no side effects.
pub fn harvest<H>(
    host: &mut H,
    bus: &mut EventBus,
    config: &HarvestConfig,
    ctx: &HarvestContext,
) -> bool
where
    H: HarvestHost + ?Sized,
{
    match run(host, bus, config, ctx) {
        Ok(_) => true,
        Err(error) => {
            debug!(
                interaction = %ctx.interaction,
                position = %ctx.position,
                %error,
                "Harvest aborted"
            );
            false
        }
    }
}

/// What step 6 does to the base.
#[derive(Debug)]
enum BaseOutcome {
    Reset(GrowableState),
    Remove,
}

/// The harvest sequence. Returns the base position that was harvested.
fn run<H>(
    host: &mut H,
    bus: &mut EventBus,
    config: &HarvestConfig,
    ctx: &HarvestContext,
) -> Result<Position, HarvestError>
where
    H: HarvestHost + ?Sized,
{
    // Resolution is read-only; the numbered steps below are the observable order.
    let base = multiblock::base_position(&*host, config, ctx.state.object, ctx.position);
    let base_state = host
        .state_at(base)
        .ok_or(HarvestError::BaseVanished(base))?;
    let outcome = if registry_id_in(&*host, ctx.state.object, &config.remove_on_harvest_ids) {
        BaseOutcome::Remove
    } else {
        let reset = growth::reset_to_minimum(&base_state, &ctx.maturity)
            .map_err(|source| HarvestError::Reset { position: base, source })?;
        BaseOutcome::Reset(reset)
    };
    let above = segment_above(&*host, config, base, &base_state);

    // 1. BeforeHarvest
    let site = ctx.site();
    bus.post_before_harvest(&site);

    // 2. Reward
    if config.reward_amount > 0 {
        host.grant_reward(ctx.actor.id, config.reward_amount);
    }

    // 3. Tool wear
    if config.require_tool
        && config.tool_damage_per_harvest > 0
        && !ctx.actor.mode.is_consequence_free()
    {
        host.damage_held_tool(ctx.actor.id, ctx.hand, config.tool_damage_per_harvest);
    }

    // 4-5. Drops from the base
    let defaults = host.default_drops(base, &base_state, &ctx.actor, ctx.hand);
    let drops = bus.post_harvest_drops(ctx.site_at(base, base_state.clone()), defaults);
    if !drops.stacks.is_empty() {
        if host.has_collision(base, &base_state) {
            host.emit_drops_at_face(base, ctx.face, &drops.stacks);
        } else {
            host.emit_drops_at_position(base, &drops.stacks);
        }
    }

    // 6-7. Base and the segment above it. A removed plant already dropped
    // as a whole, so its upper segment goes without drops of its own.
    let natural_drops = match outcome {
        BaseOutcome::Reset(reset) => {
            host.set_state(base, reset);
            !drops.customized
        }
        BaseOutcome::Remove => {
            host.remove_state(base);
            false
        }
    };
    if let Some(above) = above {
        debug!(position = %above, natural_drops, "Destroying segment above harvested base");
        host.destroy_state(above, natural_drops, ctx.actor.id);
    }

    // 8. Sound
    let sound = config
        .play_feedback_sound
        .then(|| host.break_sound(ctx.position, &ctx.state))
        .flatten();
    if let Some(sound) = sound {
        host.play_sound(ctx.position, &sound);
    }

    // 9. AfterHarvest
    bus.post_after_harvest(&site);
    trace!(
        interaction = %ctx.interaction,
        position = %ctx.position,
        base = %base,
        stacks = drops.stacks.len(),
        customized = drops.customized,
        "Harvest complete"
    );
    Ok(base)
}

/// The stacked segment resting on `base`, if one goes with it.
fn segment_above<H>(
    host: &H,
    config: &HarvestConfig,
    base: Position,
    base_state: &GrowableState,
) -> Option<Position>
where
    H: HarvestHost + ?Sized,
{
    if !base_state.object.stacked
        || multiblock::is_tall_but_separate(host, base_state.object, config)
    {
        return None;
    }
    let above = base.above()?;
    host.state_at(above)
        .is_some_and(|state| state.is_same_type(base_state))
        .then_some(above)
}
