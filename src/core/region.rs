//! Catalog of the datasets a user can select.
//!
//! Every region owns a fixed set of renderer identifiers. The registry is
//! built once at startup and never mutated; its table of layer identifiers
//! drives the blanket sweep performed before each activation.

use crate::api::endpoints;
use crate::core::constants::{
    COVERED_LINE_COLOR, HEATMAP_HIGH_COLOR, HEATMAP_LOW_COLOR, HEATMAP_MID_COLOR,
    INTERSECTION_COUNT_PROPERTY, NETWORK_LINE_COLOR, NETWORK_LINE_WIDTH,
};
use crate::core::geo::LatLng;
use crate::layers::descriptor::{LayerDescriptor, SourceDescriptor};
use crate::layers::style::{LinePaint, StyleInput, StyleValue};
use crate::prelude::HashMap;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const LIECHTENSTEIN: LatLng = LatLng {
    lat: 47.165517853530986,
    lng: 9.512414314597644,
};
const SWITZERLAND: LatLng = LatLng {
    lat: 46.76931689104032,
    lng: 8.414885671372303,
};
const EASTERN_SWITZERLAND: LatLng = LatLng {
    lat: 47.24951226677899,
    lng: 9.569950768098238,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegionId {
    #[serde(rename = "NETWORK")]
    Network,
    #[serde(rename = "WANDERWEG")]
    Wanderweg,
    #[serde(rename = "SWITZERLAND")]
    Switzerland,
    #[serde(rename = "STGALLEN")]
    StGallen,
    #[serde(rename = "GRISONS")]
    Grisons,
    #[serde(rename = "TRAIL_HEATMAP")]
    TrailHeatmap,
}

impl RegionId {
    pub const ALL: [RegionId; 6] = [
        RegionId::Network,
        RegionId::Wanderweg,
        RegionId::Switzerland,
        RegionId::StGallen,
        RegionId::Grisons,
        RegionId::TrailHeatmap,
    ];

    /// Token emitted by the region selector
    pub fn token(&self) -> &'static str {
        match self {
            RegionId::Network => "NETWORK",
            RegionId::Wanderweg => "WANDERWEG",
            RegionId::Switzerland => "SWITZERLAND",
            RegionId::StGallen => "STGALLEN",
            RegionId::Grisons => "GRISONS",
            RegionId::TrailHeatmap => "TRAIL_HEATMAP",
        }
    }

    /// Path segment used in backend routes; the heatmap is computed over the network
    pub fn code(&self) -> &'static str {
        match self {
            RegionId::TrailHeatmap => RegionId::Network.token(),
            other => other.token(),
        }
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for RegionId {
    type Err = MapError;

    /// Accepts `SWITZERLAND` as well as the quoted `'SWITZERLAND'` form, in any case.
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().trim_matches(|c| c == '\'' || c == '"').trim();
        RegionId::ALL
            .into_iter()
            .find(|id| id.token().eq_ignore_ascii_case(token))
            .ok_or_else(|| MapError::UnknownRegion(s.to_string()))
    }
}

/// A region backed by a vector tile network plus a covered overlay
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkLayers {
    /// Identifier shared by the vector source and its layer
    pub base_id: &'static str,
    pub source_layer: &'static str,
    /// Identifier shared by the covered GeoJSON source and its layer
    pub covered_id: &'static str,
    pub tile_url_template: String,
    pub base_paint: LinePaint,
    pub covered_paint: LinePaint,
}

/// The density overlay: one GeoJSON source and one gradient layer
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapLayers {
    pub source_id: &'static str,
    pub layer_id: &'static str,
    pub paint: LinePaint,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegionLayers {
    Network(NetworkLayers),
    Heatmap(HeatmapLayers),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub layers: RegionLayers,
    pub center: LatLng,
    pub zoom: f64,
}

impl Region {
    fn network(
        id: RegionId,
        api_base: &str,
        ids: (&'static str, &'static str, &'static str),
        center: LatLng,
        zoom: f64,
    ) -> Self {
        let (base_id, source_layer, covered_id) = ids;
        Self {
            id,
            layers: RegionLayers::Network(NetworkLayers {
                base_id,
                source_layer,
                covered_id,
                tile_url_template: endpoints::tile_url_template(api_base, id.code()),
                base_paint: LinePaint::solid(NETWORK_LINE_COLOR, NETWORK_LINE_WIDTH),
                covered_paint: LinePaint::solid(COVERED_LINE_COLOR, NETWORK_LINE_WIDTH),
            }),
            center,
            zoom,
        }
    }

    fn heatmap(center: LatLng, zoom: f64) -> Self {
        let color = StyleValue::linear(
            StyleInput::Property(INTERSECTION_COUNT_PROPERTY.to_string()),
            vec![
                (1.0, HEATMAP_LOW_COLOR),
                (50.0, HEATMAP_MID_COLOR),
                (100.0, HEATMAP_HIGH_COLOR),
            ],
        );
        let width = StyleValue::linear(StyleInput::Zoom, vec![(5.0, 0.5), (10.0, 2.0), (15.0, 6.0)]);
        let opacity =
            StyleValue::linear(StyleInput::Zoom, vec![(5.0, 0.3), (10.0, 0.6), (15.0, 1.0)]);

        Self {
            id: RegionId::TrailHeatmap,
            layers: RegionLayers::Heatmap(HeatmapLayers {
                source_id: "trails-heatmap",
                layer_id: "lines-heatmap",
                paint: LinePaint {
                    color,
                    width,
                    opacity: Some(opacity),
                },
            }),
            center,
            zoom,
        }
    }

    /// Layer identifiers present once this region is fully loaded
    pub fn layer_ids(&self) -> Vec<&'static str> {
        match &self.layers {
            RegionLayers::Network(network) => vec![network.base_id, network.covered_id],
            RegionLayers::Heatmap(heatmap) => vec![heatmap.layer_id],
        }
    }

    /// Source backing the fetched GeoJSON overlay
    pub fn overlay_source_id(&self) -> &'static str {
        match &self.layers {
            RegionLayers::Network(network) => network.covered_id,
            RegionLayers::Heatmap(heatmap) => heatmap.source_id,
        }
    }

    /// Layer drawn over the fetched GeoJSON overlay
    pub fn overlay_layer(&self) -> LayerDescriptor {
        match &self.layers {
            RegionLayers::Network(network) => LayerDescriptor::line(
                network.covered_id,
                network.covered_id,
                network.covered_paint.clone(),
            ),
            RegionLayers::Heatmap(heatmap) => {
                LayerDescriptor::line(heatmap.layer_id, heatmap.source_id, heatmap.paint.clone())
            }
        }
    }

    /// Vector tile source and line layer of the full network, if the region has one
    pub fn base_layer(&self, zoom_range: (u8, u8)) -> Option<(SourceDescriptor, LayerDescriptor)> {
        match &self.layers {
            RegionLayers::Network(network) => Some((
                SourceDescriptor::vector(network.tile_url_template.clone(), zoom_range),
                LayerDescriptor::line(network.base_id, network.base_id, network.base_paint.clone())
                    .with_source_layer(network.source_layer),
            )),
            RegionLayers::Heatmap(_) => None,
        }
    }

    pub fn is_heatmap(&self) -> bool {
        matches!(self.layers, RegionLayers::Heatmap(_))
    }
}

/// Immutable lookup table `RegionId -> Region`
#[derive(Debug, Clone)]
pub struct RegionRegistry {
    regions: HashMap<RegionId, Region>,
}

impl RegionRegistry {
    /// The supported datasets, with tile templates rooted at `api_base`
    pub fn new(api_base: &str) -> Self {
        Self::from_regions(vec![
            Region::network(
                RegionId::Network,
                api_base,
                ("network-liechtenstein", "network_liechtenstein", "network-covered"),
                LIECHTENSTEIN,
                11.0,
            ),
            Region::network(
                RegionId::Wanderweg,
                api_base,
                ("trails-liechtenstein", "trails_liechtenstein", "trails-covered"),
                LIECHTENSTEIN,
                10.5,
            ),
            Region::network(
                RegionId::Switzerland,
                api_base,
                ("trails-switzerland", "trails_switzerland", "switzerland-covered"),
                SWITZERLAND,
                7.7,
            ),
            Region::network(
                RegionId::StGallen,
                api_base,
                ("trails-stgallen", "trails_stgallen", "stgallen-covered"),
                EASTERN_SWITZERLAND,
                9.0,
            ),
            Region::network(
                RegionId::Grisons,
                api_base,
                ("trails-grisons", "trails_grisons", "grisons-covered"),
                EASTERN_SWITZERLAND,
                9.0,
            ),
            Region::heatmap(LIECHTENSTEIN, 10.5),
        ])
    }

    pub fn from_regions(regions: Vec<Region>) -> Self {
        Self {
            regions: regions.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    pub fn get(&self, id: RegionId) -> Result<&Region> {
        self.regions
            .get(&id)
            .ok_or_else(|| MapError::UnknownRegion(id.to_string()))
    }

    /// Resolves a selector token
    pub fn resolve(&self, token: &str) -> Result<&Region> {
        self.get(token.parse()?)
    }

    /// Every layer identifier owned by any region, in a stable order
    pub fn known_layer_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.iter().flat_map(|r| r.layer_ids()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Whether a layer shows covered geometry with track metadata
    pub fn is_covered_layer(&self, layer_id: &str) -> bool {
        self.regions.values().any(|region| match &region.layers {
            RegionLayers::Network(network) => network.covered_id == layer_id,
            RegionLayers::Heatmap(_) => false,
        })
    }

    /// Regions ordered by identifier
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        let mut regions: Vec<&Region> = self.regions.values().collect();
        regions.sort_by_key(|r| r.id);
        regions.into_iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const API: &str = "http://localhost:8080/api";

    #[test]
    fn test_token_parsing() {
        assert_eq!("SWITZERLAND".parse::<RegionId>().unwrap(), RegionId::Switzerland);
        assert_eq!("'STGALLEN'".parse::<RegionId>().unwrap(), RegionId::StGallen);
        assert_eq!("trail_heatmap".parse::<RegionId>().unwrap(), RegionId::TrailHeatmap);
        assert!(matches!(
            "'ZURICH'".parse::<RegionId>(),
            Err(MapError::UnknownRegion(token)) if token == "'ZURICH'"
        ));
    }

    #[test]
    fn test_heatmap_reuses_network_code() {
        assert_eq!(RegionId::TrailHeatmap.code(), "NETWORK");
        assert_eq!(RegionId::TrailHeatmap.token(), "TRAIL_HEATMAP");
        assert_eq!(RegionId::Grisons.code(), "GRISONS");
    }

    #[test]
    fn test_registry_contents() {
        let registry = RegionRegistry::new(API);
        assert_eq!(registry.len(), 6);

        let switzerland = registry.get(RegionId::Switzerland).unwrap();
        assert_eq!(switzerland.zoom, 7.7);
        assert_eq!(switzerland.layer_ids(), vec!["trails-switzerland", "switzerland-covered"]);

        let (source, layer) = switzerland.base_layer((0, 14)).unwrap();
        assert_eq!(
            source,
            SourceDescriptor::vector("http://localhost:8080/api/tiles/SWITZERLAND/{z}/{x}/{y}.pbf", (0, 14))
        );
        assert_eq!(layer.source_layer.as_deref(), Some("trails_switzerland"));

        let heatmap = registry.get(RegionId::TrailHeatmap).unwrap();
        assert!(heatmap.is_heatmap());
        assert!(heatmap.base_layer((0, 14)).is_none());
        assert_eq!(heatmap.layer_ids(), vec!["lines-heatmap"]);
        assert_eq!(heatmap.overlay_source_id(), "trails-heatmap");
    }

    #[test]
    fn test_known_layer_ids_cover_every_region() {
        let registry = RegionRegistry::new(API);
        let known = registry.known_layer_ids();

        assert_eq!(known.len(), 11);
        for region in registry.iter() {
            for id in region.layer_ids() {
                assert!(known.contains(&id));
            }
        }
        assert!(registry.is_covered_layer("trails-covered"));
        assert!(!registry.is_covered_layer("trails-liechtenstein"));
        assert!(!registry.is_covered_layer("lines-heatmap"));
    }

    #[test]
    fn test_unregistered_region() {
        let registry = RegionRegistry::from_regions(vec![Region::heatmap(LIECHTENSTEIN, 10.5)]);
        assert!(matches!(
            registry.get(RegionId::Grisons),
            Err(MapError::UnknownRegion(_))
        ));
        assert!(registry.resolve("TRAIL_HEATMAP").is_ok());
    }
}
