//! Configuration for the region loader and its backend client
//!
//! Presets cover a local backend with stale responses discarded and a legacy
//! setup that applies every response as it arrives. Custom configurations
//! can be loaded from JSON or the environment.

use crate::core::constants::{
    DEFAULT_API_BASE, DEFAULT_BASE_STYLE_URL, ENV_API_URL, ENV_INITIAL_REGION, TILE_MAX_ZOOM,
    TILE_MIN_ZOOM,
};
use crate::core::region::RegionId;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// What happens to a covered-geometry GeoJSON source that is already registered
/// when the region is activated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoveredDataPolicy {
    /// The first fetched payload stays for the whole session.
    #[default]
    KeepFirst,
    /// Every successful fetch replaces the source data.
    Refresh,
}

/// What happens to a fetch response that arrives after another activation has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Responses tagged with an outdated activation are dropped.
    #[default]
    Discard,
    /// Responses are applied whenever they arrive.
    Apply,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientProfile {
    Local,
    Legacy,
    Custom(ClientConfig),
}

impl ClientProfile {
    pub fn resolve(&self) -> ClientConfig {
        match self {
            Self::Local => ClientConfig::default(),
            Self::Legacy => ClientConfig {
                covered_data_policy: CoveredDataPolicy::KeepFirst,
                stale_response_policy: StaleResponsePolicy::Apply,
                ..ClientConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for ClientProfile {
    fn default() -> Self {
        Self::Local
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub api_base: String,
    /// Style document of the base map drawn under the overlays
    pub base_style_url: String,
    /// Region activated once the map has finished loading
    pub initial_region: RegionId,
    /// Zoom range advertised for vector tile sources
    pub tile_zoom_range: (u8, u8),
    pub covered_data_policy: CoveredDataPolicy,
    pub stale_response_policy: StaleResponsePolicy,
    /// Per-request timeout; `None` leaves requests unbounded
    pub request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn local() -> Self {
        ClientProfile::Local.resolve()
    }

    pub fn legacy() -> Self {
        ClientProfile::Legacy.resolve()
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config.normalized())
    }

    /// Starts from the local preset and applies `ROADCHASER_*` overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::local();
        if let Ok(api_base) = std::env::var(ENV_API_URL) {
            config = config.with_api_base(api_base);
        }
        if let Ok(token) = std::env::var(ENV_INITIAL_REGION) {
            config.initial_region = token.parse()?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(MapError::Config("api_base must not be empty".to_string()));
        }
        let (min_zoom, max_zoom) = self.tile_zoom_range;
        if min_zoom > max_zoom {
            return Err(MapError::Config(format!(
                "tile zoom range {}..={} is empty",
                min_zoom, max_zoom
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(MapError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.api_base = self.api_base.trim_end_matches('/').to_string();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            base_style_url: DEFAULT_BASE_STYLE_URL.to_string(),
            initial_region: RegionId::Wanderweg,
            tile_zoom_range: (TILE_MIN_ZOOM, TILE_MAX_ZOOM),
            covered_data_policy: CoveredDataPolicy::default(),
            stale_response_policy: StaleResponsePolicy::default(),
            request_timeout_secs: None,
        }
    }
}
