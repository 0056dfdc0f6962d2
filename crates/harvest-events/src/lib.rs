//! Hook chain for the right-click harvest engine.
//!
//! External code extends a harvest at four fixed points. Each point is an
//! ordered list of callables, dispatched synchronously in registration order
//! on the thread that is processing the interaction:
//!
//! | Stage            | Payload            | Contract |
//! |------------------|--------------------|----------|
//! | `harvest_check`  | [`HarvestCheck`]   | Many listeners, all run; any may clear `allowed`. The only veto point. |
//! | `before_harvest` | [`HarvestSite`]    | Observational. Fired before any mutation. |
//! | `harvest_drops`  | [`HarvestDrops`]   | Mutable aggregate over the pending drop list. |
//! | `after_harvest`  | [`HarvestSite`]    | Observational. Fired after every effect. |
//!
//! # Modules
//!
//! - [`hooks`] -- Payload types for each stage and the [`DropsResult`]
//! - [`bus`] -- The [`EventBus`] listener registry and dispatcher

pub mod bus;
pub mod hooks;

pub use bus::{EventBus, HookStage};
pub use hooks::{DropsResult, HarvestCheck, HarvestDrops, HarvestSite};
