use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::ai::dtos::{AiStatusDto, KeywordsDto, SuggestionDto, TextInputDto};
use crate::features::ai::models::{Classification, Sentiment};
use crate::features::ai::services::ClassificationService;
use crate::features::auth::model::Session;
use crate::shared::types::ApiResponse;

fn validated(dto: TextInputDto) -> Result<String> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(dto.text)
}

/// Suggest a category and urgency for a report description
#[utoipa::path(
    post,
    path = "/api/ai/classify",
    request_body = TextInputDto,
    responses(
        (status = 200, description = "Suggested classification", body = ApiResponse<Classification>),
        (status = 400, description = "Description too short"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Model call failed or replied in an unexpected format"),
        (status = 503, description = "No API key configured")
    ),
    tag = "ai",
    security(("bearer_auth" = []))
)]
pub async fn classify(
    _session: Session,
    State(service): State<Arc<ClassificationService>>,
    AppJson(dto): AppJson<TextInputDto>,
) -> Result<Json<ApiResponse<Classification>>> {
    let text = validated(dto)?;
    let classification = service.classify(&text).await?;

    Ok(Json(ApiResponse::success(Some(classification), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/ai/keywords",
    request_body = TextInputDto,
    responses(
        (status = 200, description = "Up to five key terms, empty when unavailable", body = ApiResponse<KeywordsDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "ai",
    security(("bearer_auth" = []))
)]
pub async fn extract_keywords(
    _session: Session,
    State(service): State<Arc<ClassificationService>>,
    AppJson(dto): AppJson<TextInputDto>,
) -> Result<Json<ApiResponse<KeywordsDto>>> {
    let text = validated(dto)?;
    let keywords = service.extract_keywords(&text).await;

    Ok(Json(ApiResponse::success(
        Some(KeywordsDto { keywords }),
        None,
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/ai/sentiment",
    request_body = TextInputDto,
    responses(
        (status = 200, description = "Sentiment label and intensity", body = ApiResponse<Sentiment>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "ai",
    security(("bearer_auth" = []))
)]
pub async fn analyze_sentiment(
    _session: Session,
    State(service): State<Arc<ClassificationService>>,
    AppJson(dto): AppJson<TextInputDto>,
) -> Result<Json<ApiResponse<Sentiment>>> {
    let text = validated(dto)?;
    let sentiment = service.analyze_sentiment(&text).await;

    Ok(Json(ApiResponse::success(Some(sentiment), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/ai/suggestions",
    request_body = TextInputDto,
    responses(
        (status = 200, description = "Improvement hint, if any", body = ApiResponse<SuggestionDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "ai",
    security(("bearer_auth" = []))
)]
pub async fn get_suggestions(
    _session: Session,
    State(service): State<Arc<ClassificationService>>,
    AppJson(dto): AppJson<TextInputDto>,
) -> Result<Json<ApiResponse<SuggestionDto>>> {
    let text = validated(dto)?;
    let suggestion = service.get_suggestions(&text).await;

    Ok(Json(ApiResponse::success(
        Some(SuggestionDto { suggestion }),
        None,
        None,
    )))
}

/// Whether AI assistance is switched on
#[utoipa::path(
    get,
    path = "/api/ai/status",
    responses(
        (status = 200, description = "AI availability", body = ApiResponse<AiStatusDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "ai",
    security(("bearer_auth" = []))
)]
pub async fn get_status(
    _session: Session,
    State(service): State<Arc<ClassificationService>>,
) -> Result<Json<ApiResponse<AiStatusDto>>> {
    Ok(Json(ApiResponse::success(
        Some(AiStatusDto {
            available: service.is_available(),
            model: service.model().to_string(),
        }),
        None,
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AiConfig;
    use crate::features::ai::clients::ChatCompletionError;
    use crate::features::ai::routes::routes;
    use crate::shared::test_helpers::{with_session, StubChatCompletion};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server_with(
        api_key: Option<&str>,
        reply: std::result::Result<&str, ChatCompletionError>,
    ) -> TestServer {
        let config = AiConfig {
            api_key: api_key.map(String::from),
            api_url: "http://127.0.0.1:1/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
        };
        let stub = Arc::new(StubChatCompletion::new(reply.map(String::from)));
        let service = Arc::new(ClassificationService::new(&config, stub));

        TestServer::new(with_session(routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_classify_ok() {
        let server = server_with(
            Some("sk-test"),
            Ok(r#"{"category": "vandalism", "urgency": "critical"}"#),
        );

        let response = server
            .post("/api/ai/classify")
            .json(&json!({ "text": "Someone is breaking into cars" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["category"], "vandalism");
        assert_eq!(body["data"]["urgency"], "critical");
        assert_eq!(body["data"]["confidence"], 0.9);
        assert_eq!(body["data"]["source"], "ai");
    }

    #[tokio::test]
    async fn test_classify_error_statuses() {
        let server = server_with(None, Ok("{}"));
        server
            .post("/api/ai/classify")
            .json(&json!({ "text": "Someone is breaking into cars" }))
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let server = server_with(Some("sk-test"), Ok("{}"));
        server
            .post("/api/ai/classify")
            .json(&json!({ "text": "car" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let server = server_with(Some("sk-test"), Ok("no json here"));
        let response = server
            .post("/api/ai/classify")
            .json(&json!({ "text": "Someone is breaking into cars" }))
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid AI response format");
    }

    #[tokio::test]
    async fn test_classify_rejects_missing_text() {
        let server = server_with(Some("sk-test"), Ok("{}"));
        server
            .post("/api/ai/classify")
            .json(&json!({ "description": "wrong field" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_auxiliary_endpoints_degrade_without_key() {
        let server = server_with(None, Ok("[\"unused\"]"));
        let body = json!({ "text": "Loud music every night" });

        let keywords: Value = server.post("/api/ai/keywords").json(&body).await.json();
        assert_eq!(keywords["data"]["keywords"], json!([]));

        let sentiment: Value = server.post("/api/ai/sentiment").json(&body).await.json();
        assert_eq!(sentiment["data"]["sentiment"], "neutral");
        assert_eq!(sentiment["data"]["intensity"], 0.5);

        let suggestion: Value = server.post("/api/ai/suggestions").json(&body).await.json();
        assert_eq!(suggestion["data"]["suggestion"], Value::Null);
    }

    #[tokio::test]
    async fn test_keywords_ok() {
        let server = server_with(Some("sk-test"), Ok(r#"["music", "night"]"#));

        let response = server
            .post("/api/ai/keywords")
            .json(&json!({ "text": "Loud music every night" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["keywords"], json!(["music", "night"]));
    }

    #[tokio::test]
    async fn test_status() {
        let server = server_with(Some("sk-test"), Ok(""));
        let body: Value = server.get("/api/ai/status").await.json();
        assert_eq!(body["data"]["available"], true);
        assert_eq!(body["data"]["model"], "gpt-4o-mini");

        let server = server_with(Some("not-a-key"), Ok(""));
        let body: Value = server.get("/api/ai/status").await.json();
        assert_eq!(body["data"]["available"], false);
    }
}
