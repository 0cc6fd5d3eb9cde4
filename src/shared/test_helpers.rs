//! Fixtures and in-memory collaborators shared by the unit tests.

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, response::Response, Router};
use chrono::{Duration, Utc};
use fake::faker::address::en::StreetName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use std::sync::Mutex;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::ai::clients::{ChatCompletion, ChatCompletionError, ChatRequest};
use crate::features::auth::model::Session;
use crate::features::reports::models::{
    CreateReport, Report, ReportCategory, ReportStatus, ReportUrgency,
};
use crate::features::reports::services::ReportStore;
use crate::modules::storage::BlobStore;

pub fn test_session() -> Session {
    Session {
        user_id: "test-user-id".to_string(),
        display_name: Some("Test Reporter".to_string()),
        email: Some("reporter@example.com".to_string()),
    }
}

async fn inject_session_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(test_session());
    next.run(request).await
}

/// Wrap a router so every request carries `test_session()`
pub fn with_session(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_session_middleware))
}

/// A stored report created `minutes_ago` minutes before now
pub fn sample_report(
    category: ReportCategory,
    urgency: Option<ReportUrgency>,
    minutes_ago: i64,
) -> Report {
    Report {
        id: Uuid::new_v4(),
        description: Sentence(3..8).fake(),
        location: StreetName().fake(),
        category,
        urgency,
        reporter_name: Name().fake(),
        reporter_email: "anonymous".to_string(),
        reporter_id: Uuid::new_v4().to_string(),
        status: ReportStatus::Pending,
        votes: 0,
        image_url: None,
        latitude: None,
        longitude: None,
        timestamp: Utc::now() - Duration::minutes(minutes_ago),
    }
}

/// Report store kept in a vector
#[derive(Default)]
pub struct InMemoryReportStore {
    reports: Mutex<Vec<Report>>,
    failing: bool,
}

impl InMemoryReportStore {
    /// A store whose every call fails
    pub fn failing() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn insert(&self, report: Report) {
        self.reports.lock().unwrap().push(report);
    }

    pub fn len(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            Err(AppError::Internal("report store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn create(&self, data: &CreateReport) -> Result<Report> {
        self.check()?;
        let report = Report {
            id: Uuid::new_v4(),
            description: data.description.clone(),
            location: data.location.clone(),
            category: data.category,
            urgency: Some(data.urgency),
            reporter_name: data.reporter_name.clone(),
            reporter_email: data.reporter_email.clone(),
            reporter_id: data.reporter_id.clone(),
            status: data.status,
            votes: data.votes,
            image_url: data.image_url.clone(),
            latitude: data.latitude,
            longitude: data.longitude,
            timestamp: Utc::now(),
        };
        self.insert(report.clone());
        Ok(report)
    }

    async fn list_newest_first(&self) -> Result<Vec<Report>> {
        self.check()?;
        let mut reports = self.reports.lock().unwrap().clone();
        reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(reports)
    }
}

/// Blob store that records keys and serves them from `https://blobs.test/`
#[derive(Default)]
pub struct FakeBlobStore {
    keys: Mutex<Vec<String>>,
    failing: bool,
}

impl FakeBlobStore {
    pub fn failing() -> Self {
        Self {
            keys: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn uploaded_keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for FakeBlobStore {
    async fn upload(
        &self,
        key: &str,
        _data: Vec<u8>,
        _content_type: &str,
    ) -> std::result::Result<String, AppError> {
        if self.failing {
            return Err(AppError::ExternalServiceError(
                "blob store unavailable".to_string(),
            ));
        }
        self.keys.lock().unwrap().push(key.to_string());
        Ok(format!("https://blobs.test/{}", key))
    }
}

/// Chat backend answering every request with the same canned reply
pub struct StubChatCompletion {
    reply: std::result::Result<String, ChatCompletionError>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubChatCompletion {
    pub fn new(reply: std::result::Result<String, ChatCompletionError>) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for StubChatCompletion {
    async fn complete(
        &self,
        _api_key: &str,
        request: &ChatRequest,
    ) -> std::result::Result<String, ChatCompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}
