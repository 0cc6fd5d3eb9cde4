pub mod geocoding_service;
mod location_service;
pub mod position;

pub use geocoding_service::GeocodingService;
pub use location_service::LocationService;
pub use position::{ClientReportedPosition, LocationError, Position};
