use crate::features::location::models::{Coordinates, ResolvedLocation};
use crate::features::location::services::geocoding_service::GeocodingService;
use crate::features::location::services::position::{
    LocationError, PositionOptions, PositionProvider,
};

/// Current position plus a readable address for it
pub struct LocationService {
    geocoder: GeocodingService,
    options: PositionOptions,
}

impl LocationService {
    pub fn new(geocoder: GeocodingService) -> Self {
        Self {
            geocoder,
            options: PositionOptions::default(),
        }
    }

    #[cfg(test)]
    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    /// Fails only when no position can be had; geocoding problems fall
    /// back to plain coordinates.
    pub async fn resolve(
        &self,
        provider: &dyn PositionProvider,
    ) -> Result<ResolvedLocation, LocationError> {
        let position = tokio::time::timeout(
            self.options.timeout,
            provider.current_position(&self.options),
        )
        .await
        .map_err(|_| LocationError::Timeout)??;

        let address = self
            .geocoder
            .reverse(position.latitude, position.longitude)
            .await;

        Ok(ResolvedLocation {
            formatted: address.formatted,
            full: address.full,
            coordinates: Coordinates {
                latitude: position.latitude,
                longitude: position.longitude,
            },
            accuracy: position.accuracy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GeocodingConfig;
    use crate::features::location::services::position::{ClientReportedPosition, Position};
    use async_trait::async_trait;
    use axum::{routing::get, Json, Router};
    use serde_json::json;
    use std::time::Duration;

    async fn nominatim() -> GeocodingService {
        let app = Router::new().route(
            "/reverse",
            get(|| async {
                Json(json!({
                    "display_name": "12, Elm St, Springfield, USA",
                    "address": { "house_number": "12", "road": "Elm St", "city": "Springfield" }
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        GeocodingService::new(&GeocodingConfig {
            base_url: format!("http://{}", addr),
            user_agent: "SafeSpotTest/1.0".to_string(),
        })
        .unwrap()
    }

    fn unreachable_geocoder() -> GeocodingService {
        GeocodingService::new(&GeocodingConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            user_agent: "SafeSpotTest/1.0".to_string(),
        })
        .unwrap()
    }

    struct StalledProvider;

    #[async_trait]
    impl PositionProvider for StalledProvider {
        async fn current_position(
            &self,
            _options: &PositionOptions,
        ) -> Result<Position, LocationError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Err(LocationError::PositionUnavailable)
        }
    }

    #[tokio::test]
    async fn test_resolve_with_address() {
        let service = LocationService::new(nominatim().await);
        let provider = ClientReportedPosition::new(Ok(Position {
            latitude: 39.78,
            longitude: -89.65,
            accuracy: Some(20.0),
        }));

        let location = service.resolve(&provider).await.unwrap();
        assert_eq!(location.formatted, "12 Elm St, Springfield");
        assert_eq!(location.full, "12, Elm St, Springfield, USA");
        assert_eq!(location.coordinates.latitude, 39.78);
        assert_eq!(location.accuracy, Some(20.0));
    }

    #[tokio::test]
    async fn test_resolve_geocoder_down_uses_coordinates() {
        let service = LocationService::new(unreachable_geocoder());
        let provider = ClientReportedPosition::new(Ok(Position {
            latitude: -33.8688,
            longitude: 151.2093,
            accuracy: None,
        }));

        let location = service.resolve(&provider).await.unwrap();
        assert_eq!(location.formatted, "-33.868800, 151.209300");
        assert_eq!(location.full, "Coordinates: -33.868800, 151.209300");
    }

    #[tokio::test]
    async fn test_resolve_propagates_position_error() {
        let service = LocationService::new(unreachable_geocoder());
        let provider = ClientReportedPosition::new(Err(LocationError::PermissionDenied));

        assert_eq!(
            service.resolve(&provider).await,
            Err(LocationError::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn test_resolve_times_out() {
        let service = LocationService::new(unreachable_geocoder()).with_options(PositionOptions {
            timeout: Duration::from_millis(50),
            ..PositionOptions::default()
        });

        assert_eq!(
            service.resolve(&StalledProvider).await,
            Err(LocationError::Timeout)
        );
    }
}
