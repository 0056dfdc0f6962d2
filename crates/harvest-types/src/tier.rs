//! Ordered tool tiers.
//!
//! A tier is only ever compared against another tier (see
//! [`ToolTier::levels_above`]); two tiers with the same level are equal even
//! when their names differ. Hosts with extra materials extend the ladder
//! through [`ToolTier::custom`].

use std::borrow::Cow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// An ordered tool tier: `none < wood = gold < stone < iron < diamond < netherite`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolTier {
    name: Cow<'static, str>,
    level: i32,
}

/// Returned when a tier name does not match any built-in tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool tier '{0}' (expected one of none, wood, gold, stone, iron, diamond, netherite)")]
pub struct UnknownTier(pub String);

impl ToolTier {
    /// No tier at all (bare hands, untiered items).
    pub const NONE: Self = Self::builtin("none", 0);
    /// Wooden tools.
    pub const WOOD: Self = Self::builtin("wood", 1);
    /// Golden tools. Same level as wood.
    pub const GOLD: Self = Self::builtin("gold", 1);
    /// Stone tools.
    pub const STONE: Self = Self::builtin("stone", 2);
    /// Iron tools.
    pub const IRON: Self = Self::builtin("iron", 3);
    /// Diamond tools.
    pub const DIAMOND: Self = Self::builtin("diamond", 4);
    /// Netherite tools.
    pub const NETHERITE: Self = Self::builtin("netherite", 5);

    /// Built-in tiers, lowest first.
    pub const BUILTIN: [Self; 7] = [
        Self::NONE,
        Self::WOOD,
        Self::GOLD,
        Self::STONE,
        Self::IRON,
        Self::DIAMOND,
        Self::NETHERITE,
    ];

    const fn builtin(name: &'static str, level: i32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            level,
        }
    }

    /// A host-defined tier slotted into the ladder at `level`.
    pub fn custom(name: impl Into<String>, level: i32) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            level,
        }
    }

    /// Look up a built-in tier by name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, UnknownTier> {
        Self::BUILTIN
            .iter()
            .find(|tier| tier.name.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .ok_or_else(|| UnknownTier(name.to_owned()))
    }

    /// The tier's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tier's position on the ladder.
    pub const fn level(&self) -> i32 {
        self.level
    }

    /// `level(self) - level(other)`, saturating at the `i32` bounds.
    pub const fn levels_above(&self, other: &Self) -> i32 {
        self.level.saturating_sub(other.level)
    }
}

impl PartialEq for ToolTier {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level
    }
}

impl Eq for ToolTier {}

impl PartialOrd for ToolTier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ToolTier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level.cmp(&other.level)
    }
}

impl Hash for ToolTier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.level.hash(state);
    }
}

impl core::fmt::Display for ToolTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<String> for ToolTier {
    type Error = UnknownTier;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name)
    }
}

impl From<ToolTier> for String {
    fn from(tier: ToolTier) -> Self {
        tier.name.into_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ladder_is_ordered() {
        assert!(ToolTier::NONE < ToolTier::WOOD);
        assert!(ToolTier::WOOD < ToolTier::STONE);
        assert!(ToolTier::STONE < ToolTier::IRON);
        assert!(ToolTier::IRON < ToolTier::DIAMOND);
        assert!(ToolTier::DIAMOND < ToolTier::NETHERITE);
    }

    #[test]
    fn equal_levels_compare_equal() {
        assert_eq!(ToolTier::WOOD, ToolTier::GOLD);
        assert_eq!(ToolTier::custom("copper", 2), ToolTier::STONE);
    }

    #[test]
    fn levels_above_is_a_difference() {
        assert_eq!(ToolTier::NETHERITE.levels_above(&ToolTier::IRON), 2);
        assert_eq!(ToolTier::WOOD.levels_above(&ToolTier::IRON), -2);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(ToolTier::from_name("Diamond").unwrap(), ToolTier::DIAMOND);
        assert!(ToolTier::from_name("mythril").is_err());
    }

    #[test]
    fn deserializes_from_name() {
        let tier: ToolTier = serde_json::from_str("\"stone\"").unwrap();
        assert_eq!(tier, ToolTier::STONE);
        assert_eq!(tier.name(), "stone");
        assert!(serde_json::from_str::<ToolTier>("\"bronze\"").is_err());
    }
}
