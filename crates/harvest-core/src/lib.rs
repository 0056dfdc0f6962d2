//! Right-click harvest engine.
//!
//! When an actor uses a tool on a mature growable, the engine short-circuits
//! the host's default "use" behavior and harvests instead: it resets the
//! growable to its first stage, emits its drops, rewards the actor, wears the
//! tool, and (for high-tier tools) repeats the harvest over a square
//! neighborhood.
//!
//! The pipeline for one interaction:
//!
//! ```text
//! InteractionEvent
//!   -> eligibility  (mode, stance, hand)
//!   -> growth       (classification, harvest_check hook, maturity)
//!   -> executor     (before -> reward -> wear -> base -> drops -> reset -> sound -> after)
//!   -> area         (tier-gated neighborhood, each neighbor re-validated)
//! ```
//!
//! # Modules
//!
//! - [`config`] -- Read-only configuration snapshot, YAML loader, hot-swap store
//! - [`error`] -- Recoverable failure taxonomy
//! - [`host`] -- Collaborator traits the host simulation implements
//! - [`eligibility`] -- Which hand (if any) harvests
//! - [`growth`] -- Growable classification and maturity detection
//! - [`multiblock`] -- Base-segment resolution for stacked growables
//! - [`area`] -- Tier-gated neighborhood enumeration
//! - [`executor`] -- One full harvest of one resolved growable
//! - [`controller`] -- [`HarvestEngine`], the single entry point
//! - [`sandbox`] -- In-memory host used by tests and the scenario runner
//!
//! [`HarvestEngine`]: controller::HarvestEngine

pub mod area;
pub mod config;
pub mod controller;
pub mod eligibility;
pub mod error;
pub mod executor;
pub mod growth;
pub mod host;
pub mod multiblock;
pub mod sandbox;

pub use config::{ConfigError, ConfigStore, HarvestConfig};
pub use controller::HarvestEngine;
pub use error::{GrowthError, HarvestError, RegistryLookupFailure};
pub use host::HarvestHost;
