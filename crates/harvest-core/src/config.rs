//! Configuration loading and the per-interaction configuration snapshot.
//!
//! The engine never reads configuration from shared state. Each call to
//! [`HarvestEngine::handle_interaction`] receives an immutable
//! [`HarvestConfig`]; hosts that hot-reload keep the current snapshot in a
//! [`ConfigStore`] and hand out one `Arc` per interaction, so a reload never
//! lands in the middle of a harvest.
//!
//! [`HarvestEngine::handle_interaction`]: crate::controller::HarvestEngine::handle_interaction

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, RwLock};

use harvest_types::ToolTier;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The content parsed but holds out-of-range values.
    #[error("invalid config:\n{message}")]
    Invalid {
        /// One line per rejected field.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Harvest configuration. Mirrors `harvest-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HarvestConfig {
    /// Only actors holding a harvesting tool may harvest.
    #[serde(default)]
    pub require_tool: bool,

    /// Reward granted to the actor per harvested growable.
    #[serde(default)]
    pub reward_amount: u32,

    /// Durability removed from the tool per harvested growable. Only applies
    /// when `require_tool` is set.
    #[serde(default)]
    pub tool_damage_per_harvest: u32,

    /// Play the growable's break sound on harvest.
    #[serde(default = "default_true")]
    pub play_feedback_sound: bool,

    /// Registry identifiers harvested in addition to the built-in kinds.
    #[serde(default)]
    pub allow_listed_growable_ids: BTreeSet<String>,

    /// Lowest tool tier that harvests an area instead of a single growable.
    #[serde(default = "default_multi_harvest_starting_tier")]
    pub multi_harvest_starting_tier: ToolTier,

    /// Side of the square harvested by a tool exactly at the starting tier.
    #[serde(default = "default_area_starting_size")]
    pub area_starting_size: i32,

    /// Growth of the square's side per tier above the starting tier.
    #[serde(default = "default_area_increment_per_tier")]
    pub area_increment_per_tier: i32,

    /// Objects that look stacked but are independent single segments.
    #[serde(default = "default_tall_but_separate_ids")]
    pub tall_but_separate_ids: BTreeSet<String>,

    /// Objects removed on harvest because their first growth stage is not a
    /// valid placed state.
    #[serde(default = "default_remove_on_harvest_ids")]
    pub remove_on_harvest_ids: BTreeSet<String>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            require_tool: false,
            reward_amount: 0,
            tool_damage_per_harvest: 0,
            play_feedback_sound: true,
            allow_listed_growable_ids: BTreeSet::new(),
            multi_harvest_starting_tier: default_multi_harvest_starting_tier(),
            area_starting_size: default_area_starting_size(),
            area_increment_per_tier: default_area_increment_per_tier(),
            tall_but_separate_ids: default_tall_but_separate_ids(),
            remove_on_harvest_ids: default_remove_on_harvest_ids(),
            logging: LoggingConfig::default(),
        }
    }
}

impl HarvestConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges, reporting every offending field at once.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing each rejected field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.area_starting_size < 1 {
            errors.push(format!(
                "area_starting_size must be >= 1, got {}. Example: area_starting_size: 3",
                self.area_starting_size
            ));
        }

        if self.area_increment_per_tier < 0 {
            errors.push(format!(
                "area_increment_per_tier must be >= 0, got {}. Example: area_increment_per_tier: 2",
                self.area_increment_per_tier
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            errors.push(format!(
                "logging.level must be one of {valid_levels:?}, got '{}'",
                self.logging.level
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid {
                message: errors.join("\n"),
            })
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigStore
// ---------------------------------------------------------------------------

/// Holds the current configuration snapshot for hosts that hot-reload.
///
/// Readers take an `Arc` snapshot and keep it for the whole interaction;
/// writers swap the `Arc`. A snapshot taken before a swap is unaffected.
#[derive(Debug, Default)]
pub struct ConfigStore {
    current: RwLock<Arc<HarvestConfig>>,
}

impl ConfigStore {
    /// Create a store holding `config`.
    pub fn new(config: HarvestConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<HarvestConfig> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Swap in a new snapshot.
    pub fn replace(&self, config: HarvestConfig) {
        let next = Arc::new(config);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Reload from a YAML file. On error the current snapshot is kept.
    ///
    /// # Errors
    ///
    /// Propagates any [`ConfigError`] from [`HarvestConfig::from_file`].
    pub fn reload_from(&self, path: &Path) -> Result<(), ConfigError> {
        let config = HarvestConfig::from_file(path)?;
        self.replace(config);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_true() -> bool {
    true
}

const fn default_multi_harvest_starting_tier() -> ToolTier {
    ToolTier::IRON
}

const fn default_area_starting_size() -> i32 {
    3
}

const fn default_area_increment_per_tier() -> i32 {
    2
}

fn default_tall_but_separate_ids() -> BTreeSet<String> {
    BTreeSet::from(["farmersdelight:tomatoes".to_owned()])
}

fn default_remove_on_harvest_ids() -> BTreeSet<String> {
    BTreeSet::from(["minecraft:pitcher_crop".to_owned()])
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HarvestConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.require_tool);
        assert!(config.play_feedback_sound);
        assert_eq!(config.multi_harvest_starting_tier, ToolTier::IRON);
        assert_eq!(config.area_starting_size, 3);
        assert!(config.tall_but_separate_ids.contains("farmersdelight:tomatoes"));
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
require_tool: true
reward_amount: 5
tool_damage_per_harvest: 1
play_feedback_sound: false
allow_listed_growable_ids:
  - "examplemod:rice"
  - "examplemod:pepper"
multi_harvest_starting_tier: diamond
area_starting_size: 5
area_increment_per_tier: 4
tall_but_separate_ids:
  - "examplemod:vine_tomato"
remove_on_harvest_ids: []
logging:
  level: "debug"
"#;
        let config = HarvestConfig::parse(yaml).unwrap();
        assert!(config.require_tool);
        assert_eq!(config.reward_amount, 5);
        assert_eq!(config.tool_damage_per_harvest, 1);
        assert!(!config.play_feedback_sound);
        assert_eq!(config.allow_listed_growable_ids.len(), 2);
        assert_eq!(config.multi_harvest_starting_tier, ToolTier::DIAMOND);
        assert_eq!(config.area_starting_size, 5);
        assert_eq!(config.area_increment_per_tier, 4);
        assert!(config.tall_but_separate_ids.contains("examplemod:vine_tomato"));
        assert!(config.remove_on_harvest_ids.is_empty());
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = HarvestConfig::parse("reward_amount: 2\n").unwrap();
        assert_eq!(config.reward_amount, 2);
        assert_eq!(config.area_increment_per_tier, 2);
        assert!(config.remove_on_harvest_ids.contains("minecraft:pitcher_crop"));
    }

    #[test]
    fn parse_empty_yaml() {
        assert_eq!(HarvestConfig::parse("").unwrap(), HarvestConfig::default());
    }

    #[test]
    fn unknown_tier_is_rejected() {
        let result = HarvestConfig::parse("multi_harvest_starting_tier: mythril\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn out_of_range_values_are_all_reported() {
        let result = HarvestConfig::parse(
            "area_starting_size: 0\narea_increment_per_tier: -1\nlogging:\n  level: loud\n",
        );
        let Err(ConfigError::Invalid { message }) = result else {
            panic!("expected Invalid, got {result:?}");
        };
        assert_eq!(message.lines().count(), 3);
    }

    #[test]
    fn store_snapshots_survive_replacement() {
        let store = ConfigStore::new(HarvestConfig::default());
        let before = store.snapshot();
        store.replace(HarvestConfig {
            reward_amount: 9,
            ..HarvestConfig::default()
        });
        assert_eq!(before.reward_amount, 0);
        assert_eq!(store.snapshot().reward_amount, 9);
    }

    #[test]
    fn failed_reload_keeps_current_snapshot() {
        let store = ConfigStore::new(HarvestConfig::default());
        let missing = Path::new("/nonexistent/harvest-config.yaml");
        assert!(matches!(store.reload_from(missing), Err(ConfigError::Io { .. })));
        assert_eq!(*store.snapshot(), HarvestConfig::default());
    }
}
