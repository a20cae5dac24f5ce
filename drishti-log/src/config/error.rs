//! Configuration errors.

use thiserror::Error;

/// Field configuration error. Always fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("settings file has no `game` entry")]
    MissingGame,

    #[error("no settings section for game `{0}`")]
    MissingProfile(String),

    #[error("axis direction must be 0..=3, got {0}")]
    InvalidAxisDirection(i64),

    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("cannot resolve alliance from `{0}`")]
    UnknownAlliance(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
