use crate::prelude::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GeoJSON position: longitude, latitude and an optional elevation
pub type Position = Vec<f64>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<HashMap<String, Value>>,
}

impl GeoJsonFeature {
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(name)
    }
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
    /// A bare geometry carries its own `type`
    #[serde(untagged)]
    Geometry(GeoJsonGeometry),
}

impl GeoJson {
    /// Parses a GeoJSON document
    pub fn parse(geojson_str: &str) -> crate::Result<Self> {
        serde_json::from_str(geojson_str)
            .map_err(|e| crate::Error::ParseError(format!("Invalid GeoJSON: {}", e)))
    }

    pub fn empty() -> Self {
        GeoJson::FeatureCollection {
            features: Vec::new(),
        }
    }

    /// Gets all features in the document
    pub fn features(&self) -> Vec<&GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features.iter().collect(),
            GeoJson::Geometry(_) => Vec::new(),
        }
    }

    pub fn feature_count(&self) -> usize {
        self.features().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COVERED: &str = r#"
    {
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"filenames": "[\"tracks/12\", \"tracks/3\"]"},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[9.50, 47.10, 455.0], [9.55, 47.20, 610.5]]
                }
            },
            {
                "type": "Feature",
                "properties": {"filenames": ["tracks/7"], "intersection_count": 42},
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [[[9.40, 47.05], [9.45, 47.08]]]
                }
            }
        ]
    }
    "#;

    #[test]
    fn test_feature_collection_parsing() {
        let geojson = GeoJson::parse(COVERED).unwrap();
        assert_eq!(geojson.feature_count(), 2);

        let first = geojson.features()[0];
        assert!(first.property("filenames").unwrap().is_string());
        assert!(first.property("missing").is_none());
    }

    #[test]
    fn test_positions_keep_elevation() {
        let geojson = GeoJson::parse(COVERED).unwrap();
        let second = geojson.features()[1];

        assert_eq!(second.property("intersection_count").and_then(Value::as_u64), Some(42));
        match &geojson.features()[0].geometry {
            Some(GeoJsonGeometry::LineString { coordinates }) => {
                assert_eq!(coordinates[1], vec![9.55, 47.20, 610.5]);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_bare_geometry() {
        let geojson =
            GeoJson::parse(r#"{"type": "Point", "coordinates": [9.52, 47.14]}"#).unwrap();
        assert_eq!(geojson.feature_count(), 0);
        assert_eq!(
            geojson,
            GeoJson::Geometry(GeoJsonGeometry::Point {
                coordinates: vec![9.52, 47.14]
            })
        );
    }

    #[test]
    fn test_invalid_document() {
        assert!(GeoJson::parse(r#"{"type": "Nope"}"#).is_err());
    }
}
