//! Scenario runner for the harvest engine.
//!
//! Loads a harvest configuration and a scenario, builds an in-memory world
//! from the scenario, replays every interaction through [`HarvestEngine`],
//! and logs a summary of the resulting side effects.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `HARVEST_CONFIG` (default `harvest-config.yaml`)
//! 2. Initialize structured logging (tracing), `RUST_LOG` overriding the
//!    configured level
//! 3. Load the scenario from `HARVEST_SCENARIO` (default `scenario.yaml`)
//! 4. Build the world and register one logging listener per hook stage
//! 5. Replay the interactions
//! 6. Log the side-effect summary
//!
//! [`HarvestEngine`]: harvest_core::HarvestEngine

mod error;
mod scenario;

use std::path::{Path, PathBuf};

use harvest_core::sandbox::Effect;
use harvest_core::{ConfigStore, HarvestConfig, HarvestEngine};
use harvest_events::EventBus;
use harvest_types::InteractionOutcome;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::SimError;
use crate::scenario::Scenario;

/// Application entry point for the scenario runner.
///
/// # Errors
///
/// Returns an error if the configuration or scenario cannot be loaded.
fn main() -> Result<(), SimError> {
    // 1. Load configuration.
    let config = load_config(&env_path("HARVEST_CONFIG", "harvest-config.yaml"))?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        require_tool = config.require_tool,
        reward_amount = config.reward_amount,
        tool_damage_per_harvest = config.tool_damage_per_harvest,
        multi_harvest_starting_tier = %config.multi_harvest_starting_tier,
        area_starting_size = config.area_starting_size,
        area_increment_per_tier = config.area_increment_per_tier,
        "Configuration loaded"
    );

    // 3. Load the scenario.
    let scenario_path = env_path("HARVEST_SCENARIO", "scenario.yaml");
    let scenario = Scenario::from_file(&scenario_path)?;
    info!(
        path = %scenario_path.display(),
        objects = scenario.objects.len(),
        placements = scenario.placements.len(),
        interactions = scenario.interactions.len(),
        "Scenario loaded"
    );

    // 4. Build the world and the engine.
    let (mut host, actor) = scenario.build()?;
    let store = ConfigStore::new(config);
    let mut engine = HarvestEngine::new();
    register_logging_listeners(engine.events_mut());

    // 5. Replay.
    let mut consumed: usize = 0;
    for (index, spec) in scenario.interactions.iter().enumerate() {
        let event = spec.to_event(actor);
        let outcome = engine.handle_interaction(&mut host, &store.snapshot(), &event);
        if outcome == InteractionOutcome::Consumed {
            consumed = consumed.saturating_add(1);
        }
        info!(index, position = %event.position, hand = ?event.hand, ?outcome, "Interaction replayed");
    }

    // 6. Summary.
    for effect in host.effects() {
        log_effect(effect);
    }
    info!(
        interactions = scenario.interactions.len(),
        consumed,
        effects = host.effects().len(),
        reward = host.reward_of(actor.id),
        "Scenario complete"
    );
    Ok(())
}

/// The path in environment variable `key`, or `default`.
fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var_os(key).map_or_else(|| PathBuf::from(default), PathBuf::from)
}

/// Load configuration from `path`, falling back to defaults if it is absent.
fn load_config(path: &Path) -> Result<HarvestConfig, SimError> {
    if path.exists() {
        Ok(HarvestConfig::from_file(path)?)
    } else {
        Ok(HarvestConfig::default())
    }
}

/// One `info` line per hook dispatch.
fn register_logging_listeners(events: &mut EventBus) {
    events.on_harvest_check(|check| {
        info!(
            position = %check.site.position,
            first = check.first,
            allowed = check.allowed(),
            "harvest_check"
        );
    });
    events.on_before_harvest(|site| {
        info!(position = %site.position, hand = ?site.hand, "before_harvest");
    });
    events.on_harvest_drops(|drops| {
        info!(
            position = %drops.site.position,
            stacks = drops.drops().len(),
            "harvest_drops"
        );
    });
    events.on_after_harvest(|site| {
        info!(position = %site.position, "after_harvest");
    });
}

fn log_effect(effect: &Effect) {
    match effect {
        Effect::StateSet { position, state } => {
            info!(%position, object = state.object.raw_id, "state set");
        }
        Effect::StateRemoved { position } => info!(%position, "state removed"),
        Effect::Destroyed { position, dropped } => {
            info!(%position, dropped = dropped.len(), "segment destroyed");
        }
        Effect::DropsAtFace {
            position,
            face,
            stacks,
        } => info!(%position, ?face, stacks = stacks.len(), "drops emitted at face"),
        Effect::DropsAtPosition { position, stacks } => {
            info!(%position, stacks = stacks.len(), "drops emitted");
        }
        Effect::Sound { position, sound_id } => info!(%position, sound_id, "sound played"),
        Effect::Reward { actor, amount } => info!(%actor, amount, "reward granted"),
        Effect::ToolDamaged {
            actor,
            hand,
            amount,
        } => info!(%actor, ?hand, amount, "tool damaged"),
    }
}
