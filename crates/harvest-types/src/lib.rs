//! Shared type definitions for the right-click harvest engine.
//!
//! This crate is the single source of truth for the data that flows between
//! the host simulation, the hook chain, and the harvest pipeline.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for actors and interactions
//! - [`enums`] -- Hands, faces, game modes, and built-in growable kinds
//! - [`tier`] -- Ordered tool tiers used for area-harvest gating
//! - [`structs`] -- Grid positions, item stacks, tool and sound descriptors
//! - [`state`] -- Object types, declared properties, and growable state
//! - [`interaction`] -- The interaction event and its tri-state outcome

pub mod enums;
pub mod ids;
pub mod interaction;
pub mod state;
pub mod structs;
pub mod tier;

// Re-export all public types at crate root for convenience.
pub use enums::{Face, GameMode, GrowableKind, Hand};
pub use ids::{ActorId, InteractionId};
pub use interaction::{ActorSnapshot, InteractionEvent, InteractionOutcome};
pub use state::{GrowableState, MATURITY_PROPERTY, ObjectType, PropertyKind, PropertyValue};
pub use structs::{HitData, ItemStack, Position, SoundDescriptor, ToolDescriptor};
pub use tier::{ToolTier, UnknownTier};
