//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `REPRISE_*` environment
//! variables. The Azure OpenAI and Azure AI Search settings have no
//! defaults; [`Config::validate`] enforces their presence before startup.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::cache::MatchUnits;
use crate::vectordb::DEFAULT_COLLECTION_NAME;

/// Default Qdrant URL used when `REPRISE_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `REPRISE_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `0.0.0.0`.
    pub bind_addr: IpAddr,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Collection holding cached answers. Default: `reprise_answers`.
    pub collection_name: String,

    /// Admission filter units. Default: `chars`.
    pub match_units: MatchUnits,

    /// Azure OpenAI resource endpoint. Required.
    pub aoai_endpoint: String,

    /// Azure OpenAI API key. Required.
    pub aoai_api_key: String,

    /// Chat completions deployment name. Required.
    pub aoai_deployment: String,

    /// Embeddings deployment name. Required.
    pub aoai_embedding_deployment: String,

    /// Azure AI Search endpoint used to ground generation. Required.
    pub search_endpoint: String,

    /// Azure AI Search API key. Required.
    pub search_api_key: String,

    /// Azure AI Search index name. Required.
    pub search_index: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field("qdrant_url", &self.qdrant_url)
            .field("collection_name", &self.collection_name)
            .field("match_units", &self.match_units)
            .field("aoai_endpoint", &self.aoai_endpoint)
            .field("aoai_deployment", &self.aoai_deployment)
            .field("aoai_embedding_deployment", &self.aoai_embedding_deployment)
            .field("search_endpoint", &self.search_endpoint)
            .field("search_index", &self.search_index)
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            match_units: MatchUnits::default(),
            aoai_endpoint: String::new(),
            aoai_api_key: String::new(),
            aoai_deployment: String::new(),
            aoai_embedding_deployment: String::new(),
            search_endpoint: String::new(),
            search_api_key: String::new(),
            search_index: String::new(),
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "REPRISE_PORT";
    pub const ENV_BIND_ADDR: &'static str = "REPRISE_BIND_ADDR";
    pub const ENV_QDRANT_URL: &'static str = "REPRISE_QDRANT_URL";
    pub const ENV_COLLECTION: &'static str = "REPRISE_COLLECTION";
    pub const ENV_MATCH_UNITS: &'static str = "REPRISE_MATCH_UNITS";
    pub const ENV_AOAI_ENDPOINT: &'static str = "REPRISE_AOAI_ENDPOINT";
    pub const ENV_AOAI_API_KEY: &'static str = "REPRISE_AOAI_API_KEY";
    pub const ENV_AOAI_DEPLOYMENT: &'static str = "REPRISE_AOAI_DEPLOYMENT";
    pub const ENV_AOAI_EMBEDDING_DEPLOYMENT: &'static str = "REPRISE_AOAI_EMBEDDING_DEPLOYMENT";
    pub const ENV_SEARCH_ENDPOINT: &'static str = "REPRISE_SEARCH_ENDPOINT";
    pub const ENV_SEARCH_API_KEY: &'static str = "REPRISE_SEARCH_API_KEY";
    pub const ENV_SEARCH_INDEX: &'static str = "REPRISE_SEARCH_INDEX";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection_name =
            Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection_name);
        let match_units = Self::parse_match_units_from_env(defaults.match_units)?;

        let aoai_endpoint =
            Self::parse_string_from_env(Self::ENV_AOAI_ENDPOINT, defaults.aoai_endpoint);
        let aoai_api_key =
            Self::parse_string_from_env(Self::ENV_AOAI_API_KEY, defaults.aoai_api_key);
        let aoai_deployment =
            Self::parse_string_from_env(Self::ENV_AOAI_DEPLOYMENT, defaults.aoai_deployment);
        let aoai_embedding_deployment = Self::parse_string_from_env(
            Self::ENV_AOAI_EMBEDDING_DEPLOYMENT,
            defaults.aoai_embedding_deployment,
        );
        let search_endpoint =
            Self::parse_string_from_env(Self::ENV_SEARCH_ENDPOINT, defaults.search_endpoint);
        let search_api_key =
            Self::parse_string_from_env(Self::ENV_SEARCH_API_KEY, defaults.search_api_key);
        let search_index =
            Self::parse_string_from_env(Self::ENV_SEARCH_INDEX, defaults.search_index);

        Ok(Self {
            port,
            bind_addr,
            qdrant_url,
            collection_name,
            match_units,
            aoai_endpoint,
            aoai_api_key,
            aoai_deployment,
            aoai_embedding_deployment,
            search_endpoint,
            search_api_key,
            search_index,
        })
    }

    /// Checks that every required Azure setting is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require(&self.aoai_endpoint, Self::ENV_AOAI_ENDPOINT)?;
        Self::require(&self.aoai_api_key, Self::ENV_AOAI_API_KEY)?;
        Self::require(&self.aoai_deployment, Self::ENV_AOAI_DEPLOYMENT)?;
        Self::require(
            &self.aoai_embedding_deployment,
            Self::ENV_AOAI_EMBEDDING_DEPLOYMENT,
        )?;
        Self::require(&self.search_endpoint, Self::ENV_SEARCH_ENDPOINT)?;
        Self::require(&self.search_api_key, Self::ENV_SEARCH_API_KEY)?;
        Self::require(&self.search_index, Self::ENV_SEARCH_INDEX)?;

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn require(value: &str, name: &'static str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar { name });
        }
        Ok(())
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_match_units_from_env(default: MatchUnits) -> Result<MatchUnits, ConfigError> {
        match env::var(Self::ENV_MATCH_UNITS) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidMatchUnits { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
