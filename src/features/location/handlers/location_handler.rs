use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::Session;
use crate::features::location::dtos::ResolveLocationDto;
use crate::features::location::models::ResolvedLocation;
use crate::features::location::services::{ClientReportedPosition, LocationService};
use crate::shared::types::ApiResponse;

/// Resolve the device position to an address
///
/// Geocoding failures still succeed, with the coordinates as the address.
#[utoipa::path(
    post,
    path = "/api/location/resolve",
    request_body = ResolveLocationDto,
    responses(
        (status = 200, description = "Address and coordinates", body = ApiResponse<ResolvedLocation>),
        (status = 400, description = "Invalid coordinates or location permission denied"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Position unavailable or timed out")
    ),
    tag = "location",
    security(("bearer_auth" = []))
)]
pub async fn resolve_location(
    _session: Session,
    State(service): State<Arc<LocationService>>,
    AppJson(dto): AppJson<ResolveLocationDto>,
) -> Result<Json<ApiResponse<ResolvedLocation>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let provider = ClientReportedPosition::new(dto.into_reported()?);
    let location = service.resolve(&provider).await?;

    Ok(Json(ApiResponse::success(Some(location), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GeocodingConfig;
    use crate::features::location::routes::routes;
    use crate::features::location::services::GeocodingService;
    use crate::shared::test_helpers::with_session;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let geocoder = GeocodingService::new(&GeocodingConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            user_agent: "SafeSpotTest/1.0".to_string(),
        })
        .unwrap();
        let service = Arc::new(LocationService::new(geocoder));

        TestServer::new(with_session(routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_coordinates() {
        let response = server()
            .post("/api/location/resolve")
            .json(&json!({ "latitude": 48.8566, "longitude": 2.3522, "accuracy": 15.0 }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["formatted"], "48.856600, 2.352200");
        assert_eq!(body["data"]["full"], "Coordinates: 48.856600, 2.352200");
        assert_eq!(body["data"]["coordinates"]["latitude"], 48.8566);
        assert_eq!(body["data"]["accuracy"], 15.0);
    }

    #[tokio::test]
    async fn test_resolve_reported_errors() {
        let server = server();

        let response = server
            .post("/api/location/resolve")
            .json(&json!({ "error": "permission_denied" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            "Location access denied. Please enable location in your browser settings."
        );

        server
            .post("/api/location/resolve")
            .json(&json!({ "error": "timeout" }))
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_resolve_rejects_bad_input() {
        let server = server();

        server
            .post("/api/location/resolve")
            .json(&json!({ "latitude": 120.0, "longitude": 0.0 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/api/location/resolve")
            .json(&json!({ "latitude": 10.0 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
