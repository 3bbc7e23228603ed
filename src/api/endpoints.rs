//! URL builders for the backend routes the map consumes.

/// `{api}/tiles/{REGION}/{z}/{x}/{y}.pbf`; placeholders are filled in by the renderer
pub fn tile_url_template(api_base: &str, region_code: &str) -> String {
    format!("{}/tiles/{}/{{z}}/{{x}}/{{y}}.pbf", api_base, region_code)
}

/// Covered geometry as a GeoJSON FeatureCollection
pub fn covered_geometry_url(api_base: &str, region_code: &str) -> String {
    format!("{}/data-result/{}", api_base, region_code)
}

/// Precomputed intersection density as a GeoJSON FeatureCollection
pub fn heatmap_url(api_base: &str, region_code: &str) -> String {
    format!("{}/heatmap/{}", api_base, region_code)
}

/// Coverage statistics
pub fn coverage_url(api_base: &str, region_code: &str) -> String {
    format!("{}/data/{}", api_base, region_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        let api = "http://localhost:8080/api";
        assert_eq!(
            tile_url_template(api, "STGALLEN"),
            "http://localhost:8080/api/tiles/STGALLEN/{z}/{x}/{y}.pbf"
        );
        assert_eq!(
            covered_geometry_url(api, "WANDERWEG"),
            "http://localhost:8080/api/data-result/WANDERWEG"
        );
        assert_eq!(heatmap_url(api, "NETWORK"), "http://localhost:8080/api/heatmap/NETWORK");
        assert_eq!(coverage_url(api, "GRISONS"), "http://localhost:8080/api/data/GRISONS");
    }
}
