//! Payloads handed to hook listeners.

use harvest_types::{
    ActorSnapshot, Face, GrowableState, Hand, HitData, InteractionId, ItemStack, Position,
};

// ---------------------------------------------------------------------------
// HarvestSite
// ---------------------------------------------------------------------------

/// Everything a listener may want to know about one harvest target.
///
/// Built fresh for every harvest (the clicked growable and each neighbor of
/// an area harvest get their own) and dropped when that harvest ends.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestSite {
    /// The interaction this harvest belongs to.
    pub interaction: InteractionId,
    /// The harvesting actor.
    pub actor: ActorSnapshot,
    /// The hand used to harvest.
    pub hand: Hand,
    /// Position of the harvested object (clicked or neighbor).
    pub position: Position,
    /// The clicked face.
    pub face: Face,
    /// Raw hit data; `None` for neighbors of an area harvest.
    pub hit: Option<HitData>,
    /// State of the object at `position` when the harvest was decided.
    pub state: GrowableState,
}

// ---------------------------------------------------------------------------
// HarvestCheck
// ---------------------------------------------------------------------------

/// Payload of the `harvest_check` stage.
///
/// Every registered listener runs even after one of them has denied; the
/// value of [`allowed`](Self::allowed) after the last listener is final.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestCheck {
    /// The candidate harvest.
    pub site: HarvestSite,
    /// `true` for the clicked growable, `false` for area-expansion neighbors.
    pub first: bool,
    allowed: bool,
}

impl HarvestCheck {
    /// A check that starts out allowed.
    pub const fn new(site: HarvestSite, first: bool) -> Self {
        Self {
            site,
            first,
            allowed: true,
        }
    }

    /// Whether the harvest may proceed.
    pub const fn allowed(&self) -> bool {
        self.allowed
    }

    /// Veto the harvest.
    pub const fn deny(&mut self) {
        self.allowed = false;
    }

    /// Set the verdict explicitly. A later listener may overturn an earlier
    /// denial this way.
    pub const fn set_allowed(&mut self, allowed: bool) {
        self.allowed = allowed;
    }
}

// ---------------------------------------------------------------------------
// HarvestDrops
// ---------------------------------------------------------------------------

/// Payload of the `harvest_drops` stage.
///
/// Starts from the host's default drops for the object; each listener may
/// extend or replace the pending list.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestDrops {
    /// The harvest producing these drops.
    pub site: HarvestSite,
    default_drops: Vec<ItemStack>,
    drops: Vec<ItemStack>,
}

impl HarvestDrops {
    /// Start from the default drop computation.
    pub fn new(site: HarvestSite, default_drops: Vec<ItemStack>) -> Self {
        Self {
            site,
            drops: default_drops.clone(),
            default_drops,
        }
    }

    /// The drops the host would have produced with no listeners.
    pub fn default_drops(&self) -> &[ItemStack] {
        &self.default_drops
    }

    /// The pending drop list.
    pub fn drops(&self) -> &[ItemStack] {
        &self.drops
    }

    /// Mutable access to the pending drop list.
    pub const fn drops_mut(&mut self) -> &mut Vec<ItemStack> {
        &mut self.drops
    }

    /// Replace the pending drop list.
    pub fn set_drops(&mut self, drops: Vec<ItemStack>) {
        self.drops = drops;
    }

    /// Whether the pending list differs from the defaults.
    pub fn have_drops_changed(&self) -> bool {
        self.drops != self.default_drops
    }

    /// Finish the stage.
    pub fn into_result(self) -> DropsResult {
        let customized = self.have_drops_changed();
        DropsResult {
            stacks: self.drops,
            customized,
        }
    }
}

/// The final drop set of one harvest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropsResult {
    /// Stacks to emit.
    pub stacks: Vec<ItemStack>,
    /// Whether a listener altered the default set. When set, destroying a
    /// stacked segment must not generate that segment's natural drops.
    pub customized: bool,
}
