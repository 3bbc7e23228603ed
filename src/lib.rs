//! # RoadChaser
//!
//! Client-side orchestration for a trail coverage map.
//!
//! A user picks one of a fixed set of regions; the [`RegionLoader`] swaps
//! the renderer's layers over to that region, fetches its covered network
//! and coverage statistics, and turns clicks on covered trails into a popup
//! listing the contributing tracks. The renderer is abstracted behind
//! [`MapRenderer`] so the same state machine drives a real map engine or
//! the in-memory [`RecordingRenderer`].

pub mod api;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{ClientConfig, ClientProfile, CoveredDataPolicy, StaleResponsePolicy},
    geo::LatLng,
    loader::{CompletionStatus, RegionLoader},
    region::{Region, RegionId, RegionRegistry},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::core::map::RoadChaser;

pub use api::{BackendApi, FetchKind, FetchOutcome, FetchPayload, FetchRequest, HttpBackend};

#[cfg(feature = "tokio-runtime")]
pub use api::FetchDispatcher;

pub use data::{coverage::CoverageDto, geojson::GeoJson};

pub use input::events::{ClickEvent, MapEvent};

pub use layers::manager::SourceLedger;

pub use rendering::{MapRenderer, RecordingRenderer};

pub use ui::{coverage_panel::CoveragePanel, inspector::FeatureInspector, popup::Popup};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Malformed feature metadata: {0}")]
    MalformedFeatureMetadata(String),

    #[error("Fetch of {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;
