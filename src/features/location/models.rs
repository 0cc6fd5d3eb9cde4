use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Device position with its best-effort address
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResolvedLocation {
    pub formatted: String,
    pub full: String,
    pub coordinates: Coordinates,
    pub accuracy: Option<f64>,
}
