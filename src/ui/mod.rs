pub mod coverage_panel;
pub mod inspector;
pub mod popup;

pub use coverage_panel::CoveragePanel;
pub use inspector::{
    numeric_track_id, parse_filenames, popup_content, sort_by_track_id, track_id,
    FeatureInspector, TrackNumber,
};
pub use popup::{Popup, PopupContent, TrackLink};
