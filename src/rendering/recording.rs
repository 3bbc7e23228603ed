//! Headless renderer that keeps the map state in memory.
//!
//! It enforces the same identifier rules as a real map engine (unique
//! sources and layers, layers need a registered source) and records every
//! call, which makes it usable both for tests and for dry runs.

use super::{Camera, MapRenderer};
use crate::core::geo::LatLng;
use crate::data::geojson::GeoJson;
use crate::layers::descriptor::{LayerDescriptor, SourceDescriptor, SourceKind};
use crate::prelude::HashMap;
use crate::ui::popup::Popup;
use crate::{MapError, Result};

/// One call received by the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    AddSource { id: String, kind: SourceKind },
    SetSourceData { id: String, features: usize },
    AddLayer { id: String, source: String },
    RemoveLayer { id: String },
    SetCenter(LatLng),
    SetZoom(f64),
    ShowPopup { header: String, links: usize },
}

impl std::fmt::Display for RenderOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderOp::AddSource { id, kind } => write!(f, "add source {} ({})", id, kind),
            RenderOp::SetSourceData { id, features } => {
                write!(f, "set data of {} ({} features)", id, features)
            }
            RenderOp::AddLayer { id, source } => write!(f, "add layer {} <- {}", id, source),
            RenderOp::RemoveLayer { id } => write!(f, "remove layer {}", id),
            RenderOp::SetCenter(center) => write!(f, "center {}", center),
            RenderOp::SetZoom(zoom) => write!(f, "zoom {}", zoom),
            RenderOp::ShowPopup { header, links } => {
                write!(f, "popup \"{}\" ({} links)", header, links)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    sources: HashMap<String, SourceDescriptor>,
    layers: Vec<LayerDescriptor>,
    camera: Camera,
    popup: Option<Popup>,
    ops: Vec<RenderOp>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self, id: &str) -> Option<&SourceDescriptor> {
        self.sources.get(id)
    }

    pub fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn layer(&self, id: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The popup currently on screen
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Every call received so far, oldest first
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Returns and forgets the recorded calls
    pub fn take_ops(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.ops)
    }

    /// How many times a source was registered
    pub fn add_source_calls(&self, id: &str) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, RenderOp::AddSource { id: op_id, .. } if op_id == id))
            .count()
    }
}

impl MapRenderer for RecordingRenderer {
    fn add_source(&mut self, id: &str, source: &SourceDescriptor) -> Result<()> {
        if self.sources.contains_key(id) {
            return Err(MapError::Source(format!(
                "There is already a source with ID \"{}\"",
                id
            )));
        }
        self.sources.insert(id.to_string(), source.clone());
        self.ops.push(RenderOp::AddSource {
            id: id.to_string(),
            kind: source.kind(),
        });
        Ok(())
    }

    fn set_source_data(&mut self, id: &str, data: &GeoJson) -> Result<()> {
        match self.sources.get_mut(id) {
            Some(SourceDescriptor::GeoJson { data: current }) => {
                *current = data.clone();
                self.ops.push(RenderOp::SetSourceData {
                    id: id.to_string(),
                    features: data.feature_count(),
                });
                Ok(())
            }
            Some(SourceDescriptor::Vector { .. }) => Err(MapError::Source(format!(
                "source \"{}\" is not a GeoJSON source",
                id
            ))),
            None => Err(MapError::Source(format!("source \"{}\" does not exist", id))),
        }
    }

    fn add_layer(&mut self, layer: &LayerDescriptor) -> Result<()> {
        if self.layers.iter().any(|l| l.id == layer.id) {
            return Err(MapError::Layer(format!(
                "Layer with id \"{}\" already exists on this map",
                layer.id
            )));
        }
        if !self.sources.contains_key(&layer.source) {
            return Err(MapError::Layer(format!(
                "Source \"{}\" not found for layer \"{}\"",
                layer.source, layer.id
            )));
        }
        self.layers.push(layer.clone());
        self.ops.push(RenderOp::AddLayer {
            id: layer.id.clone(),
            source: layer.source.clone(),
        });
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> Result<()> {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        if self.layers.len() == before {
            return Err(MapError::Layer(format!(
                "Cannot remove non-existing layer \"{}\"",
                id
            )));
        }
        self.ops.push(RenderOp::RemoveLayer { id: id.to_string() });
        Ok(())
    }

    fn layer_order(&self) -> Vec<String> {
        self.layers.iter().map(|l| l.id.clone()).collect()
    }

    fn set_center(&mut self, center: LatLng) {
        self.camera.set_center(center);
        self.ops.push(RenderOp::SetCenter(center));
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.camera.set_zoom(zoom);
        self.ops.push(RenderOp::SetZoom(zoom));
    }

    fn show_popup(&mut self, popup: &Popup) -> Result<()> {
        self.ops.push(RenderOp::ShowPopup {
            header: popup.content.header.clone(),
            links: popup.content.links.len(),
        });
        self.popup = Some(popup.clone());
        Ok(())
    }
}
