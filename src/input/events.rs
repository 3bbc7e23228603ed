use crate::core::geo::LatLng;
use crate::prelude::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A click on a rendered feature, as delivered by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Layer the clicked feature belongs to
    pub layer_id: String,
    /// Geographic coordinate of the click
    pub lng_lat: LatLng,
    /// Properties of the topmost clicked feature
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

impl ClickEvent {
    pub fn new(layer_id: impl Into<String>, lng_lat: LatLng) -> Self {
        Self {
            layer_id: layer_id.into(),
            lng_lat,
            properties: HashMap::default(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Events emitted by the region loader while it works
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// A region became the active selection
    RegionActivated { token: String, generation: u64 },
    /// Layer was added to the map
    LayerAdd { layer_id: String },
    /// Layer was removed from the map
    LayerRemove { layer_id: String },
    /// Coverage statistics were replaced
    CoverageUpdated { token: String },
}
