//! Error types for setgrid-core.

use crate::card::CardId;
use std::path::PathBuf;
use thiserror::Error;

/// Inconsistencies between a [`BoardState`](crate::BoardState) and its card universe.
///
/// A correct game-state controller never produces these; the layout engine
/// asserts on them in debug builds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A card is referenced by the board but missing from the universe.
    #[error("card {0} is not part of the card universe")]
    UnknownCard(CardId),

    /// A card appears in more than one partition (or twice in one).
    #[error("card {0} appears more than once across board, deck and chain prefix")]
    DuplicateCard(CardId),
}

/// Invalid configuration values, raised where configuration enters the engine.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No keyboard layout is registered under this identifier.
    #[error("unknown keyboard layout: {0}")]
    UnknownKeyboardLayout(String),

    /// Unrecognised value for an orientation setting.
    #[error("invalid value {value:?} for setting {key:?}")]
    InvalidSetting {
        /// Setting key
        key: String,
        /// Rejected value
        value: String,
    },

    /// A keyboard layout table failed validation.
    #[error("invalid keyboard layout {name:?}: {reason}")]
    InvalidKeyboardLayout {
        /// Layout name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Layout parameters out of range.
    #[error("invalid layout parameters: {0}")]
    InvalidLayoutParams(String),

    /// TOML could not be parsed.
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML could not be parsed.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Errors from a persisted settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read or write the settings file.
    #[error("settings file {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The settings file is not valid TOML.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
