//! Ordered listener registry for the four harvest hook stages.

use tracing::trace;

use crate::hooks::{DropsResult, HarvestCheck, HarvestDrops, HarvestSite};

type CheckListener = Box<dyn FnMut(&mut HarvestCheck) + Send>;
type SiteListener = Box<dyn FnMut(&HarvestSite) + Send>;
type DropsListener = Box<dyn FnMut(&mut HarvestDrops) + Send>;

/// The four hook stages, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookStage {
    /// Veto point before anything happens.
    HarvestCheck,
    /// Observational, before mutation.
    BeforeHarvest,
    /// Drop computation.
    HarvestDrops,
    /// Observational, after every effect.
    AfterHarvest,
}

impl HookStage {
    /// Stable name used in log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HarvestCheck => "harvest_check",
            Self::BeforeHarvest => "before_harvest",
            Self::HarvestDrops => "harvest_drops",
            Self::AfterHarvest => "after_harvest",
        }
    }
}

/// Listener registry for one harvest engine.
///
/// Listeners are plain closures kept in registration order. Dispatch is
/// synchronous and sequential; a listener never runs concurrently with
/// another listener of the same harvest.
#[derive(Default)]
pub struct EventBus {
    check: Vec<CheckListener>,
    before: Vec<SiteListener>,
    drops: Vec<DropsListener>,
    after: Vec<SiteListener>,
}

impl EventBus {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a `harvest_check` listener.
    pub fn on_harvest_check<F>(&mut self, listener: F)
    where
        F: FnMut(&mut HarvestCheck) + Send + 'static,
    {
        self.check.push(Box::new(listener));
    }

    /// Register a `before_harvest` listener.
    pub fn on_before_harvest<F>(&mut self, listener: F)
    where
        F: FnMut(&HarvestSite) + Send + 'static,
    {
        self.before.push(Box::new(listener));
    }

    /// Register a `harvest_drops` listener.
    pub fn on_harvest_drops<F>(&mut self, listener: F)
    where
        F: FnMut(&mut HarvestDrops) + Send + 'static,
    {
        self.drops.push(Box::new(listener));
    }

    /// Register an `after_harvest` listener.
    pub fn on_after_harvest<F>(&mut self, listener: F)
    where
        F: FnMut(&HarvestSite) + Send + 'static,
    {
        self.after.push(Box::new(listener));
    }

    /// Number of listeners registered for `stage`.
    pub fn listener_count(&self, stage: HookStage) -> usize {
        match stage {
            HookStage::HarvestCheck => self.check.len(),
            HookStage::BeforeHarvest => self.before.len(),
            HookStage::HarvestDrops => self.drops.len(),
            HookStage::AfterHarvest => self.after.len(),
        }
    }

    /// Run every `harvest_check` listener and return the final verdict.
    ///
    /// No short-circuit: listeners after a denial still run and may read or
    /// overturn it.
    pub fn post_harvest_check(&mut self, site: HarvestSite, first: bool) -> bool {
        let mut check = HarvestCheck::new(site, first);
        for listener in &mut self.check {
            listener(&mut check);
        }
        trace!(
            stage = HookStage::HarvestCheck.as_str(),
            listeners = self.check.len(),
            position = %check.site.position,
            first,
            allowed = check.allowed(),
            "Hook dispatched"
        );
        check.allowed()
    }

    /// Notify `before_harvest` listeners.
    pub fn post_before_harvest(&mut self, site: &HarvestSite) {
        for listener in &mut self.before {
            listener(site);
        }
        trace!(
            stage = HookStage::BeforeHarvest.as_str(),
            listeners = self.before.len(),
            position = %site.position,
            "Hook dispatched"
        );
    }

    /// Let `harvest_drops` listeners shape the drop list.
    pub fn post_harvest_drops(
        &mut self,
        site: HarvestSite,
        default_drops: Vec<harvest_types::ItemStack>,
    ) -> DropsResult {
        let mut event = HarvestDrops::new(site, default_drops);
        for listener in &mut self.drops {
            listener(&mut event);
        }
        let result = event.into_result();
        trace!(
            stage = HookStage::HarvestDrops.as_str(),
            listeners = self.drops.len(),
            stacks = result.stacks.len(),
            customized = result.customized,
            "Hook dispatched"
        );
        result
    }

    /// Notify `after_harvest` listeners.
    pub fn post_after_harvest(&mut self, site: &HarvestSite) {
        for listener in &mut self.after {
            listener(site);
        }
        trace!(
            stage = HookStage::AfterHarvest.as_str(),
            listeners = self.after.len(),
            position = %site.position,
            "Hook dispatched"
        );
    }
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("harvest_check", &self.check.len())
            .field("before_harvest", &self.before.len())
            .field("harvest_drops", &self.drops.len())
            .field("after_harvest", &self.after.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use harvest_types::{
        ActorId, ActorSnapshot, Face, GrowableKind, GrowableState, Hand, InteractionId,
        ItemStack, ObjectType, Position,
    };

    use super::*;

    fn site() -> HarvestSite {
        HarvestSite {
            interaction: InteractionId::new(),
            actor: ActorSnapshot::survival(ActorId::new()),
            hand: Hand::MainHand,
            position: Position::new(4, 70, -2),
            face: Face::North,
            hit: None,
            state: GrowableState::with_age(
                ObjectType::builtin(9, GrowableKind::GroundCrop),
                7,
                7,
            ),
        }
    }

    #[test]
    fn empty_bus_allows_and_keeps_defaults() {
        let mut bus = EventBus::new();
        assert!(bus.post_harvest_check(site(), true));
        let result = bus.post_harvest_drops(site(), vec![ItemStack::new("minecraft:potato", 2)]);
        assert!(!result.customized);
        assert_eq!(result.stacks, vec![ItemStack::new("minecraft:potato", 2)]);
    }

    #[test]
    fn check_runs_every_listener_after_a_denial() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let log = Arc::clone(&calls);
        bus.on_harvest_check(move |check| {
            log.lock().unwrap().push("deny");
            check.deny();
        });
        let log = Arc::clone(&calls);
        bus.on_harvest_check(move |check| {
            log.lock().unwrap().push(if check.allowed() { "saw-allowed" } else { "saw-denied" });
        });

        assert!(!bus.post_harvest_check(site(), true));
        assert_eq!(*calls.lock().unwrap(), vec!["deny", "saw-denied"]);
    }

    #[test]
    fn later_check_listener_can_overturn() {
        let mut bus = EventBus::new();
        bus.on_harvest_check(HarvestCheck::deny);
        bus.on_harvest_check(|check| check.set_allowed(true));
        assert!(bus.post_harvest_check(site(), false));
    }

    #[test]
    fn check_listeners_see_first_flag() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let log = Arc::clone(&seen);
        bus.on_harvest_check(move |check| log.lock().unwrap().push(check.first));
        bus.post_harvest_check(site(), true);
        bus.post_harvest_check(site(), false);
        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn drops_listeners_chain_in_registration_order() {
        let mut bus = EventBus::new();
        bus.on_harvest_drops(|drops| drops.set_drops(vec![ItemStack::new("a", 1)]));
        bus.on_harvest_drops(|drops| drops.drops_mut().push(ItemStack::new("b", 1)));
        let result = bus.post_harvest_drops(site(), vec![ItemStack::new("default", 1)]);
        assert!(result.customized);
        assert_eq!(
            result.stacks,
            vec![ItemStack::new("a", 1), ItemStack::new("b", 1)]
        );
    }

    #[test]
    fn observational_stages_fire_in_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let log = Arc::clone(&order);
        bus.on_before_harvest(move |_| log.lock().unwrap().push(1));
        let log = Arc::clone(&order);
        bus.on_before_harvest(move |_| log.lock().unwrap().push(2));
        let log = Arc::clone(&order);
        bus.on_after_harvest(move |_| log.lock().unwrap().push(3));

        let site = site();
        bus.post_before_harvest(&site);
        bus.post_after_harvest(&site);
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(bus.listener_count(HookStage::BeforeHarvest), 2);
        assert_eq!(bus.listener_count(HookStage::AfterHarvest), 1);
    }
}
