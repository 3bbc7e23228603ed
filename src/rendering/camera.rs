use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Lowest and highest zoom a renderer accepts
pub const MIN_CAMERA_ZOOM: f64 = 0.0;
pub const MAX_CAMERA_ZOOM: f64 = 24.0;

/// Camera state of the map: where it looks and how close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub center: LatLng,
    pub zoom: f64,
}

impl Camera {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_CAMERA_ZOOM, MAX_CAMERA_ZOOM),
        }
    }

    /// Update camera center
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Update camera zoom, clamped to the supported range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_CAMERA_ZOOM, MAX_CAMERA_ZOOM);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(LatLng::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new(LatLng::new(47.0, 9.5), 30.0);
        assert_eq!(camera.zoom, MAX_CAMERA_ZOOM);

        camera.set_zoom(-2.0);
        assert_eq!(camera.zoom, MIN_CAMERA_ZOOM);

        camera.set_zoom(10.5);
        assert_eq!(camera.zoom, 10.5);
    }
}
