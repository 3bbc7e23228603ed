//! Engine-wide defaults for the coverage map.
//! Keeping them in a single place makes it easier to tweak backend and styling conventions.

use crate::layers::style::Rgb;

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// Base map style drawn underneath every region overlay.
pub const DEFAULT_BASE_STYLE_URL: &str =
    "https://vectortiles.geo.admin.ch/styles/ch.swisstopo.lightbasemap.vt/style.json";

/// Zoom range advertised for the backend vector tile sources.
pub const TILE_MIN_ZOOM: u8 = 0;
pub const TILE_MAX_ZOOM: u8 = 14;

/// Colour of a region's full network.
pub const NETWORK_LINE_COLOR: Rgb = Rgb::new(0xff, 0x66, 0x00);

/// Colour of the already-traversed part of a network.
pub const COVERED_LINE_COLOR: Rgb = Rgb::new(0x00, 0x66, 0x00);

/// Heatmap colour ramp over `intersection_count`: low, medium, high.
pub const HEATMAP_LOW_COLOR: Rgb = Rgb::new(0x00, 0xff, 0x00);
pub const HEATMAP_MID_COLOR: Rgb = Rgb::new(0xff, 0xff, 0x00);
pub const HEATMAP_HIGH_COLOR: Rgb = Rgb::new(0xff, 0x00, 0x00);

pub const NETWORK_LINE_WIDTH: f64 = 3.0;

/// Feature property carrying the track files that cover a segment.
pub const FILENAMES_PROPERTY: &str = "filenames";

/// Feature property carrying the heatmap density.
pub const INTERSECTION_COUNT_PROPERTY: &str = "intersection_count";

/// Environment variables read by `ClientConfig::from_env`.
pub const ENV_API_URL: &str = "ROADCHASER_API_URL";
pub const ENV_INITIAL_REGION: &str = "ROADCHASER_INITIAL_REGION";
