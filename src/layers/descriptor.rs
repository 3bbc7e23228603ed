use crate::data::geojson::GeoJson;
use crate::layers::style::LinePaint;
use crate::Result;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Vector,
    GeoJson,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Vector => write!(f, "vector"),
            SourceKind::GeoJson => write!(f, "geojson"),
        }
    }
}

/// A data source as handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDescriptor {
    /// Backend vector tiles, referenced by URL template only
    Vector {
        tiles: Vec<String>,
        min_zoom: u8,
        max_zoom: u8,
    },
    GeoJson {
        data: GeoJson,
    },
}

impl SourceDescriptor {
    pub fn vector(tile_url_template: impl Into<String>, zoom_range: (u8, u8)) -> Self {
        SourceDescriptor::Vector {
            tiles: vec![tile_url_template.into()],
            min_zoom: zoom_range.0,
            max_zoom: zoom_range.1,
        }
    }

    pub fn geojson(data: GeoJson) -> Self {
        SourceDescriptor::GeoJson { data }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            SourceDescriptor::Vector { .. } => SourceKind::Vector,
            SourceDescriptor::GeoJson { .. } => SourceKind::GeoJson,
        }
    }

    /// MapLibre style-spec form of the source
    pub fn to_json(&self) -> Result<Value> {
        Ok(match self {
            SourceDescriptor::Vector {
                tiles,
                min_zoom,
                max_zoom,
            } => json!({
                "type": "vector",
                "tiles": tiles,
                "minzoom": min_zoom,
                "maxzoom": max_zoom,
            }),
            SourceDescriptor::GeoJson { data } => json!({
                "type": "geojson",
                "data": serde_json::to_value(data)?,
            }),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Line,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Line => write!(f, "line"),
        }
    }
}

/// A styled layer bound to a named source
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDescriptor {
    pub id: String,
    pub layer_type: LayerType,
    pub source: String,
    /// Layer inside a vector tile source; `None` for GeoJSON sources
    pub source_layer: Option<String>,
    pub paint: LinePaint,
}

impl LayerDescriptor {
    pub fn line(id: impl Into<String>, source: impl Into<String>, paint: LinePaint) -> Self {
        Self {
            id: id.into(),
            layer_type: LayerType::Line,
            source: source.into(),
            source_layer: None,
            paint,
        }
    }

    pub fn with_source_layer(mut self, source_layer: impl Into<String>) -> Self {
        self.source_layer = Some(source_layer.into());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut layer = json!({
            "id": self.id,
            "type": self.layer_type.to_string(),
            "source": self.source,
            "paint": self.paint.to_json(),
        });
        if let (Some(source_layer), Value::Object(map)) = (&self.source_layer, &mut layer) {
            map.insert("source-layer".to_string(), json!(source_layer));
        }
        layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::style::Rgb;

    #[test]
    fn test_vector_source_json() {
        let source = SourceDescriptor::vector(
            "http://localhost:8080/api/tiles/GRISONS/{z}/{x}/{y}.pbf",
            (0, 14),
        );
        assert_eq!(source.kind(), SourceKind::Vector);
        assert_eq!(
            source.to_json().unwrap(),
            json!({
                "type": "vector",
                "tiles": ["http://localhost:8080/api/tiles/GRISONS/{z}/{x}/{y}.pbf"],
                "minzoom": 0,
                "maxzoom": 14,
            })
        );
    }

    #[test]
    fn test_layer_json_includes_source_layer() {
        let layer = LayerDescriptor::line(
            "trails-grisons",
            "trails-grisons",
            LinePaint::solid(Rgb::new(255, 102, 0), 3.0),
        )
        .with_source_layer("trails_grisons");

        let value = layer.to_json();
        assert_eq!(value["type"], "line");
        assert_eq!(value["source-layer"], "trails_grisons");

        let covered = LayerDescriptor::line(
            "grisons-covered",
            "grisons-covered",
            LinePaint::solid(Rgb::new(0, 102, 0), 3.0),
        );
        assert!(covered.to_json().get("source-layer").is_none());
    }
}
