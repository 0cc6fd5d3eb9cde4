use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart, Query, State,
    },
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive},
        Sse,
    },
    Json,
};
use chrono::Utc;
use futures::stream::Stream;
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Session;
use crate::features::reports::dtos::{
    FeedQuery, FeedResponseDto, ReportResponseDto, SubmitReportFormDto, SubmitReportResponseDto,
};
use crate::features::reports::models::{ReportCategory, ReportUrgency};
use crate::features::reports::services::feed::parse_selection;
use crate::features::reports::services::{
    ImageAttachment, LiveQuery, ReportDraft, ReportFeed, SubmissionService,
    IMAGE_TOO_LARGE_MESSAGE,
};
use crate::shared::types::{ApiResponse, Meta};

pub const SUBMITTED_MESSAGE: &str = "Report Submitted!";
pub const NEXT_VIEW_AFTER_SUBMIT: &str = "feed";

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub submission_service: Arc<SubmissionService>,
    pub live_query: Arc<LiveQuery>,
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| multipart_error(e, &format!("{} field", name)))
}

/// A body over the request limit can only come from the photo part
fn multipart_error(e: MultipartError, what: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        debug!("Multipart body over limit: {}", e);
        return AppError::Validation(IMAGE_TOO_LARGE_MESSAGE.to_string());
    }
    debug!("Failed to read {}: {}", what, e);
    AppError::BadRequest(format!("Failed to read {}: {}", what, e))
}

fn parse_coordinate(value: &str, name: &str) -> Result<Option<f64>> {
    match value.trim() {
        "" => Ok(None),
        v => v
            .parse::<f64>()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {}: {}", name, v))),
    }
}

/// Build a draft from the submitted form. The photo is checked as soon as
/// its part is read.
async fn read_draft(multipart: &mut Multipart) -> Result<ReportDraft> {
    let mut draft = ReportDraft::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "multipart data"))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "description" => draft.description = read_text(field, "description").await?,
            "location" => draft.location = read_text(field, "location").await?,
            "reporterName" => draft.reporter_name = read_text(field, "reporterName").await?,
            "category" => {
                let text = read_text(field, "category").await?;
                draft.category = match text.trim() {
                    "" => None,
                    v => Some(v.parse::<ReportCategory>().map_err(AppError::BadRequest)?),
                };
            }
            "urgency" => {
                let text = read_text(field, "urgency").await?;
                draft.urgency = match text.trim() {
                    "" => ReportUrgency::default(),
                    v => v.parse::<ReportUrgency>().map_err(AppError::BadRequest)?,
                };
            }
            "latitude" => {
                draft.latitude = parse_coordinate(&read_text(field, "latitude").await?, "latitude")?
            }
            "longitude" => {
                draft.longitude =
                    parse_coordinate(&read_text(field, "longitude").await?, "longitude")?
            }
            "image" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let filename = field.file_name().unwrap_or("photo").to_string();

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, "image data"))?;

                // Browsers send an empty part when no file was picked
                if data.is_empty() {
                    continue;
                }

                draft.attach_image(ImageAttachment {
                    filename,
                    content_type,
                    data: data.to_vec(),
                })?;
            }
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    Ok(draft)
}

/// Submit a report
///
/// Accepts multipart/form-data. Required: `description`, `location`, `category`.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = SubmitReportFormDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<SubmitReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Upload or store write failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_report(
    session: Session,
    State(state): State<ReportState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SubmitReportResponseDto>>)> {
    let mut draft = read_draft(&mut multipart).await?;

    let mut confirmation: Option<(String, String)> = None;
    let report = state
        .submission_service
        .submit(&session, &mut draft, |_| {
            confirmation = Some((
                SUBMITTED_MESSAGE.to_string(),
                NEXT_VIEW_AFTER_SUBMIT.to_string(),
            ));
        })
        .await?;

    let (message, next_view) = confirmation.unwrap_or_default();
    let dto = SubmitReportResponseDto {
        report: ReportResponseDto::from_report(&report, Utc::now()),
        message: message.clone(),
        next_view,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(dto), Some(message), None)),
    ))
}

/// List the report feed
#[utoipa::path(
    get,
    path = "/api/reports",
    params(FeedQuery),
    responses(
        (status = 200, description = "Filtered and sorted feed", body = ApiResponse<FeedResponseDto>),
        (status = 400, description = "Unknown filter or sort"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_reports(
    _session: Session,
    State(state): State<ReportState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<ApiResponse<FeedResponseDto>>> {
    let (filter, sort) = parse_selection(&query)?;

    let mut snapshot = state.live_query.current();
    if snapshot.loading {
        state.live_query.refresh().await;
        snapshot = state.live_query.current();
    }

    let mut feed = ReportFeed::new(filter, sort);
    feed.apply_snapshot(&snapshot);
    let dto = feed.project(Utc::now());
    let total = dto.total as i64;

    Ok(Json(ApiResponse::success(
        Some(dto),
        None,
        Some(Meta { total }),
    )))
}

/// Stream the report feed
///
/// Emits a `feed` event with the full projection on connect and after every change.
#[utoipa::path(
    get,
    path = "/api/reports/stream",
    params(FeedQuery),
    responses(
        (status = 200, description = "SSE stream of feed projections", content_type = "text/event-stream"),
        (status = 400, description = "Unknown filter or sort"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn stream_reports(
    _session: Session,
    State(state): State<ReportState>,
    Query(query): Query<FeedQuery>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    let (filter, sort) = parse_selection(&query)?;
    let mut feed = ReportFeed::new(filter, sort);

    let stream = WatchStream::new(state.live_query.subscribe()).map(move |snapshot| {
        feed.apply_snapshot(&snapshot);
        let projection = feed.project(Utc::now());

        let event = Event::default()
            .event("feed")
            .json_data(&projection)
            .unwrap_or_else(|e| {
                tracing::error!("Failed to encode feed event: {}", e);
                Event::default().event("error").data("encoding failed")
            });

        Ok::<_, Infallible>(event)
    });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportStatus;
    use crate::shared::test_helpers::{
        sample_report, with_session, FakeBlobStore, InMemoryReportStore,
    };
    use axum::body::{Body, BodyDataStream};
    use axum::extract::DefaultBodyLimit;
    use axum::routing::get;
    use axum::Router;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(store: Arc<InMemoryReportStore>, blobs: Arc<FakeBlobStore>) -> Router {
        let live_query = Arc::new(LiveQuery::new(store.clone()));
        let state = ReportState {
            submission_service: Arc::new(SubmissionService::new(
                store,
                blobs,
                live_query.clone(),
            )),
            live_query,
        };

        with_session(
            Router::new()
                .route("/api/reports", get(list_reports).post(submit_report))
                .with_state(state),
        )
    }

    fn server() -> (TestServer, Arc<InMemoryReportStore>, Arc<FakeBlobStore>) {
        let store = Arc::new(InMemoryReportStore::default());
        let blobs = Arc::new(FakeBlobStore::default());
        let server = TestServer::new(app(store.clone(), blobs.clone())).unwrap();
        (server, store, blobs)
    }

    fn streetlight_form() -> MultipartForm {
        MultipartForm::new()
            .add_text("description", "Broken streetlight on 5th Ave")
            .add_text("location", "5th Ave & Main")
            .add_text("category", "lighting")
            .add_text("urgency", "medium")
    }

    #[tokio::test]
    async fn test_submit_report_created() {
        let (server, store, _) = server();

        let response = server.post("/api/reports").multipart(streetlight_form()).await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Report Submitted!");
        assert_eq!(body["data"]["nextView"], "feed");
        assert_eq!(body["data"]["report"]["status"], "pending");
        assert_eq!(body["data"]["report"]["votes"], 0);
        assert_eq!(body["data"]["report"]["imageUrl"], Value::Null);
        assert_eq!(body["data"]["report"]["categoryLabel"], "Street Lighting");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_report_with_image() {
        let (server, _, blobs) = server();

        let form = streetlight_form().add_part(
            "image",
            Part::bytes(vec![1u8, 2, 3])
                .file_name("lamp.png")
                .mime_type("image/png"),
        );
        let response = server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        let keys = blobs.uploaded_keys();
        assert_eq!(keys.len(), 1);
        let body: Value = response.json();
        assert_eq!(
            body["data"]["report"]["imageUrl"],
            format!("https://blobs.test/{}", keys[0])
        );
    }

    #[tokio::test]
    async fn test_submit_report_missing_category() {
        let (server, store, _) = server();

        let form = MultipartForm::new()
            .add_text("description", "Graffiti on the bridge")
            .add_text("location", "Old Bridge");
        let response = server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Please select a category");
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_submit_report_unknown_category_is_bad_request() {
        let (server, _, _) = server();

        let form = MultipartForm::new()
            .add_text("description", "Graffiti on the bridge")
            .add_text("location", "Old Bridge")
            .add_text("category", "graffiti");
        let response = server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_report_rejects_non_image() {
        let (server, store, blobs) = server();

        let form = streetlight_form().add_part(
            "image",
            Part::bytes(b"%PDF".to_vec())
                .file_name("doc.pdf")
                .mime_type("application/pdf"),
        );
        let response = server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(store.len(), 0);
        assert!(blobs.uploaded_keys().is_empty());
    }

    #[tokio::test]
    async fn test_list_reports_projection() {
        let (server, store, _) = server();
        store.insert(sample_report(ReportCategory::Noise, Some(ReportUrgency::Low), 5));
        store.insert(sample_report(
            ReportCategory::Noise,
            Some(ReportUrgency::Critical),
            50,
        ));
        store.insert(sample_report(ReportCategory::Waste, None, 1));

        let response = server
            .get("/api/reports")
            .add_query_param("category", "noise")
            .add_query_param("sort", "urgency")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let data = &body["data"];
        assert_eq!(data["total"], 2);
        assert_eq!(data["header"], "2 reports in Noise");
        assert_eq!(data["loading"], false);
        assert_eq!(data["reports"][0]["urgency"], "critical");
        assert_eq!(data["reports"][1]["urgency"], "low");
        assert_eq!(data["summary"].as_array().unwrap().len(), 2);
        assert_eq!(data["summary"][0]["category"], "noise");
        assert_eq!(data["summary"][0]["count"], 2);
        assert_eq!(body["meta"]["total"], 2);
    }

    #[tokio::test]
    async fn test_list_reports_unknown_sort_is_bad_request() {
        let (server, _, _) = server();

        let response = server
            .get("/api/reports")
            .add_query_param("sort", "votes")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submission_shows_up_in_feed() {
        let (server, _, _) = server();

        server
            .post("/api/reports")
            .multipart(streetlight_form())
            .await
            .assert_status(StatusCode::CREATED);

        let body: Value = server.get("/api/reports").await.json();
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(
            body["data"]["reports"][0]["status"],
            serde_json::to_value(ReportStatus::Pending).unwrap()
        );
    }

    #[tokio::test]
    async fn test_submit_report_over_body_limit_reports_image_size() {
        let store = Arc::new(InMemoryReportStore::default());
        let blobs = Arc::new(FakeBlobStore::default());
        let server = TestServer::new(
            app(store.clone(), blobs.clone()).layer(DefaultBodyLimit::max(2048)),
        )
        .unwrap();

        let form = streetlight_form().add_part(
            "image",
            Part::bytes(vec![0u8; 16 * 1024])
                .file_name("night.jpg")
                .mime_type("image/jpeg"),
        );
        let response = server.post("/api/reports").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Image must be less than 5MB");
        assert_eq!(store.len(), 0);
        assert!(blobs.uploaded_keys().is_empty());
    }

    fn stream_app(store: Arc<InMemoryReportStore>) -> (Router, Arc<LiveQuery>) {
        let live_query = Arc::new(LiveQuery::new(store.clone()));
        let state = ReportState {
            submission_service: Arc::new(SubmissionService::new(
                store,
                Arc::new(FakeBlobStore::default()),
                live_query.clone(),
            )),
            live_query: live_query.clone(),
        };

        let router = with_session(
            Router::new()
                .route("/api/reports/stream", get(stream_reports))
                .with_state(state),
        );
        (router, live_query)
    }

    /// Read SSE frames until the next `feed` event and return its payload
    async fn next_feed_event(body: &mut BodyDataStream, buffer: &mut String) -> Value {
        loop {
            if let Some(end) = buffer.find("\n\n") {
                let frame: String = buffer.drain(..end + 2).collect();
                if !frame.lines().any(|line| line == "event: feed") {
                    continue;
                }
                let data = frame
                    .lines()
                    .filter_map(|line| line.strip_prefix("data:"))
                    .map(str::trim_start)
                    .collect::<Vec<_>>()
                    .join("\n");
                return serde_json::from_str(&data).unwrap();
            }

            let chunk = tokio::time::timeout(Duration::from_secs(5), body.next())
                .await
                .expect("timed out waiting for a feed event")
                .expect("stream ended")
                .unwrap();
            buffer.push_str(std::str::from_utf8(&chunk).unwrap());
        }
    }

    #[tokio::test]
    async fn test_stream_emits_filtered_feed_on_connect_and_on_change() {
        let store = Arc::new(InMemoryReportStore::default());
        store.insert(sample_report(ReportCategory::Noise, Some(ReportUrgency::High), 30));
        store.insert(sample_report(ReportCategory::Waste, None, 10));
        let (router, live_query) = stream_app(store.clone());
        live_query.refresh().await;

        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/reports/stream?category=noise")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/event-stream");

        let mut body = response.into_body().into_data_stream();
        let mut buffer = String::new();

        let first = next_feed_event(&mut body, &mut buffer).await;
        assert_eq!(first["total"], 1);
        assert_eq!(first["reports"][0]["category"], "noise");
        assert_eq!(first["summary"].as_array().unwrap().len(), 2);

        store.insert(sample_report(ReportCategory::Noise, Some(ReportUrgency::Low), 1));
        store.insert(sample_report(ReportCategory::Waste, None, 1));
        live_query.refresh().await;

        let second = next_feed_event(&mut body, &mut buffer).await;
        assert_eq!(second["total"], 2);
        assert!(second["reports"]
            .as_array()
            .unwrap()
            .iter()
            .all(|report| report["category"] == "noise"));
        assert_eq!(second["header"], "2 reports in Noise");
    }
}
