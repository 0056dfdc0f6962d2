//! Tier-gated area expansion.
//!
//! A harvesting tool at or above `multi_harvest_starting_tier` harvests a
//! horizontal square centered on the base growable. The half-width is
//!
//! ```text
//! r = ((level(tool) - level(start)) * area_increment_per_tier + area_starting_size - 1) / 2
//! ```
//!
//! with truncating integer division. Candidates are listed in raster order
//! (z rows, x within a row) so repeated runs over an unchanged world harvest
//! in the same order.

use harvest_types::{Position, ToolDescriptor, ToolTier};
use tracing::debug;

use crate::config::HarvestConfig;
use crate::host::ToolClassifier;

/// Half-widths above this are clamped (a 33x33 square).
pub const MAX_AREA_HALF_WIDTH: i32 = 16;

/// The tier of `tool` if it qualifies for area harvesting.
pub fn qualifying_tier<H>(host: &H, tool: &ToolDescriptor, config: &HarvestConfig) -> Option<ToolTier>
where
    H: ToolClassifier + ?Sized,
{
    if !host.is_harvesting_tool(tool) {
        return None;
    }
    host.tier_of(tool)
        .filter(|tier| *tier >= config.multi_harvest_starting_tier)
}

/// Half-width of the square harvested by a tool of `tier`.
///
/// Returns `None` if the computation overflows.
pub fn half_width(tier: &ToolTier, config: &HarvestConfig) -> Option<i32> {
    let steps = tier.levels_above(&config.multi_harvest_starting_tier);
    let side = steps
        .checked_mul(config.area_increment_per_tier)?
        .checked_add(config.area_starting_size)?
        .checked_sub(1)?;
    let r = side.checked_div(2)?.max(0);
    if r > MAX_AREA_HALF_WIDTH {
        debug!(half_width = r, max = MAX_AREA_HALF_WIDTH, "Area half-width clamped");
    }
    Some(r.min(MAX_AREA_HALF_WIDTH))
}

/// Every position of the `(2r+1)`-sided square around `center`, in raster
/// order, without `center` itself.
pub fn square_around(center: Position, r: i32) -> Vec<Position> {
    let r = r.clamp(0, MAX_AREA_HALF_WIDTH);
    let mut positions = Vec::new();
    for dz in r.saturating_neg()..=r {
        for dx in r.saturating_neg()..=r {
            if dx == 0 && dz == 0 {
                continue;
            }
            if let Some(position) = center.checked_offset(dx, 0, dz) {
                positions.push(position);
            }
        }
    }
    positions
}

/// Neighbor candidates for an area harvest with `tool` around `base`.
///
/// Empty when the tool does not qualify. Candidates are not yet validated;
/// the caller runs each through the full harvest checks.
pub fn expand<H>(host: &H, tool: &ToolDescriptor, base: Position, config: &HarvestConfig) -> Vec<Position>
where
    H: ToolClassifier + ?Sized,
{
    let Some(tier) = qualifying_tier(host, tool, config) else {
        return Vec::new();
    };
    let Some(r) = half_width(&tier, config) else {
        debug!(tier = %tier, "Area half-width overflowed, skipping area harvest");
        return Vec::new();
    };
    square_around(base, r)
}
