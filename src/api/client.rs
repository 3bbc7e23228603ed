//! Backend client abstraction for testability

use super::endpoints;
use super::fetch::{FetchKind, FetchPayload, FetchRequest};
use crate::core::config::ClientConfig;
use crate::core::region::RegionId;
use crate::data::coverage::CoverageDto;
use crate::data::geojson::GeoJson;
use crate::{MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Shared async HTTP client for requests without a timeout. Building the
/// client once avoids TLS and connection pool setup per backend instance.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// The data endpoints of the coverage backend.
///
/// Implemented over HTTP by [`HttpBackend`]; tests substitute in-memory
/// implementations.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Covered network geometry of a region
    async fn fetch_covered(&self, region: RegionId) -> Result<GeoJson>;

    /// Intersection density of a region
    async fn fetch_heatmap(&self, region: RegionId) -> Result<GeoJson>;

    /// Coverage statistics of a region
    async fn fetch_coverage(&self, region: RegionId) -> Result<CoverageDto>;

    /// Performs a request issued by the loader
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchPayload> {
        let region = request.ticket.region;
        Ok(match request.kind {
            FetchKind::CoveredGeometry => FetchPayload::Geometry(self.fetch_covered(region).await?),
            FetchKind::Heatmap => FetchPayload::Geometry(self.fetch_heatmap(region).await?),
            FetchKind::CoverageStats => {
                FetchPayload::Coverage(self.fetch_coverage(region).await?)
            }
        })
    }
}

/// Real backend client using reqwest.
pub struct HttpBackend {
    client: reqwest::Client,
    api_base: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = match config.request_timeout_secs {
            Some(secs) => reqwest::Client::builder()
                .timeout(Duration::from_secs(secs))
                .build()?,
            None => HTTP_CLIENT.clone(),
        };

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        // Check HTTP status
        let status = response.status();
        if !status.is_success() {
            return Err(MapError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| MapError::Fetch {
            url: url.to_string(),
            reason: format!("invalid response body: {}", e),
        })
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn fetch_covered(&self, region: RegionId) -> Result<GeoJson> {
        self.get_json(&endpoints::covered_geometry_url(&self.api_base, region.code()))
            .await
    }

    async fn fetch_heatmap(&self, region: RegionId) -> Result<GeoJson> {
        self.get_json(&endpoints::heatmap_url(&self.api_base, region.code()))
            .await
    }

    async fn fetch_coverage(&self, region: RegionId) -> Result<CoverageDto> {
        self.get_json(&endpoints::coverage_url(&self.api_base, region.code()))
            .await
    }
}
