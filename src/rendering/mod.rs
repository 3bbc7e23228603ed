pub mod camera;
pub mod recording;

// Re-export main types
pub use camera::Camera;
pub use recording::{RecordingRenderer, RenderOp};

use crate::core::geo::LatLng;
use crate::data::geojson::GeoJson;
use crate::layers::descriptor::{LayerDescriptor, SourceDescriptor};
use crate::ui::popup::Popup;
use crate::Result;

/// The map engine the loader drives.
///
/// Sources and layers are keyed by unique string identifiers. Adding an
/// identifier twice is an error; callers keep their own ledger to avoid it.
pub trait MapRenderer {
    /// Register a named data source
    fn add_source(&mut self, id: &str, source: &SourceDescriptor) -> Result<()>;

    /// Replace the data of a registered GeoJSON source
    fn set_source_data(&mut self, id: &str, data: &GeoJson) -> Result<()>;

    /// Attach a styled layer bound to a registered source
    fn add_layer(&mut self, layer: &LayerDescriptor) -> Result<()>;

    /// Detach a layer; its source stays registered
    fn remove_layer(&mut self, id: &str) -> Result<()>;

    /// Identifiers of the attached layers, bottom to top
    fn layer_order(&self) -> Vec<String>;

    fn set_center(&mut self, center: LatLng);

    fn set_zoom(&mut self, zoom: f64);

    /// Display the popup, replacing whatever popup is currently shown
    fn show_popup(&mut self, popup: &Popup) -> Result<()>;
}
