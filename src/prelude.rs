//! Prelude module for common roadchaser types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use roadchaser::prelude::*;`

pub use crate::core::{
    config::{ClientConfig, ClientProfile, CoveredDataPolicy, StaleResponsePolicy},
    geo::LatLng,
    loader::{CompletionStatus, RegionLoader},
    region::{Region, RegionId, RegionLayers, RegionRegistry},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::core::map::RoadChaser;

pub use crate::api::{
    client::{BackendApi, HttpBackend},
    fetch::{FetchKind, FetchOutcome, FetchPayload, FetchRequest, Ticket},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::api::dispatcher::FetchDispatcher;

pub use crate::data::{
    coverage::CoverageDto,
    geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
};

pub use crate::layers::{
    descriptor::{LayerDescriptor, SourceDescriptor, SourceKind},
    manager::SourceLedger,
    style::{LinePaint, Rgb, StyleInput, StyleValue},
};

pub use crate::input::events::{ClickEvent, MapEvent};

pub use crate::rendering::{Camera, MapRenderer, RecordingRenderer, RenderOp};

pub use crate::ui::{
    coverage_panel::CoveragePanel,
    inspector::FeatureInspector,
    popup::{Popup, PopupContent, TrackLink},
};

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};

#[cfg(feature = "tokio-runtime")]
pub use futures::Future;
