use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::location::services::{LocationError, Position};

/// What the device reported: either a fix or the reason it could not get one
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResolveLocationDto {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: Option<f64>,

    #[validate(range(min = 0.0, message = "Accuracy must not be negative"))]
    pub accuracy: Option<f64>,

    /// permission_denied, position_unavailable or timeout
    pub error: Option<LocationError>,
}

impl ResolveLocationDto {
    /// The reported outcome; a request with neither a fix nor an error is malformed
    pub fn into_reported(self) -> Result<std::result::Result<Position, LocationError>> {
        if let Some(error) = self.error {
            return Ok(Err(error));
        }

        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Ok(Position {
                latitude,
                longitude,
                accuracy: self.accuracy,
            })),
            _ => Err(AppError::BadRequest(
                "latitude and longitude are required".to_string(),
            )),
        }
    }
}
