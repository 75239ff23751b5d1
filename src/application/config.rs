/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS,
    DEFAULT_WRITE_TIMEOUT_SECS,
};
use crate::utils::config::{get_env_or_default, get_env_secs_or_default, get_env_string};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Configuration for the Auth Service session client
///
/// Fixed once the client is built; there is no runtime reconfiguration.
pub struct Config {
    /// Base URL of the Auth Service, without trailing slash
    pub base_url: String,
    /// Static API key sent as `X-API-Key` on every request when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Tenant used by calls that do not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Time allowed to establish the TCP/TLS connection
    pub connect_timeout: Duration,
    /// Time allowed between reads of the response
    pub read_timeout: Duration,
    /// Time allowed to send the request
    pub write_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            tenant_id: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
            write_timeout: Duration::from_secs(DEFAULT_WRITE_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Creates a configuration with every option at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fluent builder seeded with the defaults
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Creates a configuration from the environment
    ///
    /// Loads a `.env` file when one exists, then reads `AUTH_BASE_URL`,
    /// `AUTH_API_KEY`, `AUTH_TENANT_ID`, `AUTH_CONNECT_TIMEOUT_SECS`,
    /// `AUTH_READ_TIMEOUT_SECS` and `AUTH_WRITE_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        Config {
            base_url: normalize_base_url(&get_env_or_default(
                "AUTH_BASE_URL",
                DEFAULT_BASE_URL.to_string(),
            )),
            api_key: get_env_string("AUTH_API_KEY"),
            tenant_id: get_env_string("AUTH_TENANT_ID"),
            connect_timeout: get_env_secs_or_default(
                "AUTH_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
            read_timeout: get_env_secs_or_default(
                "AUTH_READ_TIMEOUT_SECS",
                DEFAULT_READ_TIMEOUT_SECS,
            ),
            write_timeout: get_env_secs_or_default(
                "AUTH_WRITE_TIMEOUT_SECS",
                DEFAULT_WRITE_TIMEOUT_SECS,
            ),
        }
    }

    /// Overall bound for one request: reqwest has no distinct write timeout, so the
    /// write allowance is added on top of the read allowance
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.read_timeout + self.write_timeout
    }

    /// Joins an endpoint path onto the base URL
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Picks the per-call tenant when given, otherwise the configured default
    #[must_use]
    pub fn resolve_tenant<'a>(&'a self, tenant_id: Option<&'a str>) -> Option<&'a str> {
        tenant_id.or(self.tenant_id.as_deref())
    }
}

/// Fluent builder for [`Config`]
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = normalize_base_url(&base_url.into());
        self
    }

    /// Sets the static API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Sets the default tenant id
    pub fn tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.config.tenant_id = Some(tenant_id.into());
        self
    }

    /// Sets the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Sets the read timeout
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    /// Sets the write timeout
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.config.write_timeout = timeout;
        self
    }

    /// Finishes the builder
    pub fn build(self) -> Config {
        self.config
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
