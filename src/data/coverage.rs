use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate coverage statistics served by `GET /data/{REGION}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CoverageDto {
    /// Covered share, either a fraction (0..=1) or a percentage
    pub coverage: f64,
    pub total_trail_length: f64,
    pub number_of_tracks_checked: u64,
    pub number_of_trails_checked: u64,
    /// Timestamp exactly as sent by the backend
    pub last_calculated: String,
    pub total_elevation_gain: f64,
    pub total_distance: f64,
}

impl CoverageDto {
    /// Covered share as a percentage; values up to 1.0 are read as fractions
    pub fn coverage_percent(&self) -> f64 {
        if self.coverage <= 1.0 {
            self.coverage * 100.0
        } else {
            self.coverage
        }
    }

    /// Parses `last_calculated` as RFC 3339, falling back to a zone-less ISO
    /// timestamp interpreted as UTC.
    pub fn last_calculated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_calculated.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_backend_payload() {
        let dto: CoverageDto = serde_json::from_str(
            r#"{
                "coverage": 0.4213,
                "totalTrailLength": 402311.5,
                "numberOfTracksChecked": 311,
                "numberOfTrailsChecked": 5120,
                "lastCalculated": "2025-06-14T08:30:12.123",
                "totalElevationGain": 85211.0,
                "totalDistance": 2311020.0
            }"#,
        )
        .unwrap();

        assert_eq!(dto.number_of_tracks_checked, 311);
        assert!((dto.coverage_percent() - 42.13).abs() < 1e-9);

        let at = dto.last_calculated_at().unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2025, 6, 14));
        assert_eq!(at.hour(), 8);
    }

    #[test]
    fn test_percentage_and_offset_timestamp() {
        let dto = CoverageDto {
            coverage: 57.5,
            last_calculated: "2025-06-14T10:30:00+02:00".to_string(),
            ..CoverageDto::default()
        };

        assert_eq!(dto.coverage_percent(), 57.5);
        assert_eq!(dto.last_calculated_at().unwrap().hour(), 8);
    }

    #[test]
    fn test_unparseable_timestamp() {
        let dto = CoverageDto {
            last_calculated: "yesterday".to_string(),
            ..CoverageDto::default()
        };
        assert!(dto.last_calculated_at().is_none());
    }
}
