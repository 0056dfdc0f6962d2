//! Error types for the scenario runner binary.
//!
//! [`SimError`] wraps every failure that can stop a run before the first
//! interaction is replayed. Nothing after that point fails: the engine
//! itself never returns errors.

/// Top-level error for the `harvest-sim` binary.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: harvest_core::ConfigError,
    },

    /// The scenario file could not be read.
    #[error("failed to read scenario file: {source}")]
    ScenarioIo {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The scenario file is not valid YAML for a scenario.
    #[error("failed to parse scenario YAML: {source}")]
    ScenarioYaml {
        /// The underlying YAML error.
        #[from]
        source: serde_yml::Error,
    },

    /// A placement names an object the scenario never declared.
    #[error("placement at {position} names undeclared object '{object}'")]
    UnknownObject {
        /// The undeclared registry identifier.
        object: String,
        /// Where the placement was.
        position: harvest_types::Position,
    },

    /// More objects were declared than the raw id space holds.
    #[error("too many object types declared")]
    TooManyObjects,
}
