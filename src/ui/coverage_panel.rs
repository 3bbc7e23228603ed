use crate::data::coverage::CoverageDto;

/// Holds the latest coverage statistics and whether they are on screen.
///
/// Dismissal lasts until the next region activation, which calls
/// [`CoveragePanel::reset_visibility`]. Receiving new statistics does not
/// re-show a dismissed panel.
#[derive(Debug, Clone)]
pub struct CoveragePanel {
    coverage: Option<CoverageDto>,
    visible: bool,
}

impl CoveragePanel {
    pub fn new() -> Self {
        Self {
            coverage: None,
            visible: true,
        }
    }

    /// Replaces the statistics wholesale
    pub fn set_coverage(&mut self, dto: CoverageDto) {
        self.coverage = Some(dto);
    }

    pub fn coverage(&self) -> Option<&CoverageDto> {
        self.coverage.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn reset_visibility(&mut self) {
        self.visible = true;
    }

    /// Whether the panel is drawn: not dismissed and holding statistics
    pub fn is_visible(&self) -> bool {
        self.visible && self.coverage.is_some()
    }

    /// Label/value rows for display
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let Some(dto) = &self.coverage else {
            return Vec::new();
        };

        let last_calculated = dto
            .last_calculated_at()
            .map(|at| at.format("%d.%m.%Y %H:%M").to_string())
            .unwrap_or_else(|| dto.last_calculated.clone());

        vec![
            ("Coverage", format!("{:.2} %", dto.coverage_percent())),
            ("Trail length", format_km(dto.total_trail_length)),
            ("Trails checked", dto.number_of_trails_checked.to_string()),
            ("Tracks checked", dto.number_of_tracks_checked.to_string()),
            ("Total distance", format_km(dto.total_distance)),
            ("Elevation gain", format!("{:.0} m", dto.total_elevation_gain)),
            ("Last calculated", last_calculated),
        ]
    }
}

impl Default for CoveragePanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Metres rendered as kilometres with one decimal
fn format_km(metres: f64) -> String {
    format!("{:.1} km", metres / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(coverage: f64) -> CoverageDto {
        CoverageDto {
            coverage,
            total_trail_length: 402_311.5,
            number_of_tracks_checked: 311,
            number_of_trails_checked: 5120,
            last_calculated: "2025-06-14T08:30:12".to_string(),
            total_elevation_gain: 85_211.4,
            total_distance: 2_311_020.0,
        }
    }

    #[test]
    fn test_dismiss_is_not_undone_by_new_data() {
        let mut panel = CoveragePanel::new();
        assert!(!panel.is_visible());

        panel.set_coverage(dto(0.25));
        assert!(panel.is_visible());

        panel.dismiss();
        assert!(!panel.is_visible());

        panel.set_coverage(dto(0.30));
        assert!(!panel.is_visible());
        assert_eq!(panel.coverage().unwrap().coverage, 0.30);

        panel.reset_visibility();
        assert!(panel.is_visible());
    }

    #[test]
    fn test_summary_rows() {
        let mut panel = CoveragePanel::new();
        assert!(panel.summary().is_empty());

        panel.set_coverage(dto(0.4213));
        let rows = panel.summary();
        assert_eq!(rows[0], ("Coverage", "42.13 %".to_string()));
        assert_eq!(rows[1], ("Trail length", "402.3 km".to_string()));
        assert_eq!(rows[5], ("Elevation gain", "85211 m".to_string()));
        assert_eq!(rows[6], ("Last calculated", "14.06.2025 08:30".to_string()));
    }
}
