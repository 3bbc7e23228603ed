use crate::core::region::RegionId;
use crate::data::coverage::CoverageDto;
use crate::data::geojson::GeoJson;
use crate::Result;

/// Identifies the activation a request was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub region: RegionId,
    /// Activation counter at dispatch time
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    /// `GET /data-result/{REGION}`
    CoveredGeometry,
    /// `GET /heatmap/{REGION}`
    Heatmap,
    /// `GET /data/{REGION}`
    CoverageStats,
}

impl std::fmt::Display for FetchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchKind::CoveredGeometry => write!(f, "covered geometry"),
            FetchKind::Heatmap => write!(f, "heatmap"),
            FetchKind::CoverageStats => write!(f, "coverage statistics"),
        }
    }
}

/// A backend request the loader wants performed
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub kind: FetchKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchPayload {
    Geometry(GeoJson),
    Coverage(CoverageDto),
}

/// A finished request, handed back to the loader
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: Ticket,
    pub kind: FetchKind,
    pub result: Result<FetchPayload>,
}

impl FetchOutcome {
    pub fn new(request: &FetchRequest, result: Result<FetchPayload>) -> Self {
        Self {
            ticket: request.ticket,
            kind: request.kind,
            result,
        }
    }
}
