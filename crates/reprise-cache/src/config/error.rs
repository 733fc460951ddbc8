//! Configuration error types.

use thiserror::Error;

use crate::cache::UnknownMatchUnits;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Match units string was not a recognized unit name.
    #[error("failed to parse match units '{value}': {source}")]
    InvalidMatchUnits {
        value: String,
        #[source]
        source: UnknownMatchUnits,
    },

    /// A required environment variable was not set.
    ///
    /// The Azure OpenAI and Azure AI Search settings have no usable
    /// defaults; [`Config::validate`](super::Config::validate) reports the
    /// first one that is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },
}
