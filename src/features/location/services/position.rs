use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::shared::constants::GEOLOCATION_TIMEOUT_SECS;

/// A single device fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in metres, when the device reports one
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LocationError {
    #[error("Location access denied. Please enable location in your browser settings.")]
    PermissionDenied,

    #[error("Location information unavailable.")]
    PositionUnavailable,

    #[error("Location request timed out.")]
    Timeout,
}

impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => AppError::BadRequest(err.to_string()),
            LocationError::PositionUnavailable | LocationError::Timeout => {
                AppError::ServiceUnavailable(err.to_string())
            }
        }
    }
}

/// How a fix must be taken
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix that may be reused
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(GEOLOCATION_TIMEOUT_SECS),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Source of one-shot device positions
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, LocationError>;
}

/// Position taken on the client and sent along with the request
pub struct ClientReportedPosition(Result<Position, LocationError>);

impl ClientReportedPosition {
    pub fn new(reported: Result<Position, LocationError>) -> Self {
        Self(reported)
    }
}

#[async_trait]
impl PositionProvider for ClientReportedPosition {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, LocationError> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};

    #[test]
    fn test_default_options_never_reuse_cached_fix() {
        let options = PositionOptions::default();
        assert!(options.enable_high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.maximum_age, Duration::ZERO);
    }

    #[test]
    fn test_error_wire_names() {
        let parsed: LocationError = serde_json::from_str("\"permission_denied\"").unwrap();
        assert_eq!(parsed, LocationError::PermissionDenied);
        let parsed: LocationError = serde_json::from_str("\"position_unavailable\"").unwrap();
        assert_eq!(parsed, LocationError::PositionUnavailable);
        assert!(serde_json::from_str::<LocationError>("\"unknown\"").is_err());
    }

    #[test]
    fn test_error_status_mapping() {
        let status = |e: LocationError| AppError::from(e).into_response().status();
        assert_eq!(status(LocationError::PermissionDenied), StatusCode::BAD_REQUEST);
        assert_eq!(status(LocationError::Timeout), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_client_reported_position() {
        let fix = Position {
            latitude: 1.0,
            longitude: 2.0,
            accuracy: Some(12.5),
        };
        let provider = ClientReportedPosition::new(Ok(fix));
        assert_eq!(
            provider.current_position(&PositionOptions::default()).await,
            Ok(fix)
        );

        let provider = ClientReportedPosition::new(Err(LocationError::Timeout));
        assert_eq!(
            provider.current_position(&PositionOptions::default()).await,
            Err(LocationError::Timeout)
        );
    }
}
