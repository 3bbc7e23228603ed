pub mod coverage;
pub mod geojson;

pub use coverage::CoverageDto;
pub use geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};
