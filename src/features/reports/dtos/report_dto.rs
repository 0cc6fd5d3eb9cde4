use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::reports::models::{Report, ReportCategory, ReportStatus, ReportUrgency};
use crate::features::reports::services::feed::format_relative_time;

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub description: String,
    pub location: String,
    pub category: ReportCategory,
    pub category_label: String,
    pub urgency: Option<ReportUrgency>,
    pub urgency_label: Option<String>,
    pub reporter_name: String,
    pub reporter_id: String,
    pub status: ReportStatus,
    pub votes: i32,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: DateTime<Utc>,
    /// Relative age for display, e.g. "5m ago"
    pub time_ago: String,
}

impl ReportResponseDto {
    pub fn from_report(report: &Report, now: DateTime<Utc>) -> Self {
        Self {
            id: report.id,
            description: report.description.clone(),
            location: report.location.clone(),
            category: report.category,
            category_label: report.category.label().to_string(),
            urgency: report.urgency,
            urgency_label: report.urgency.map(|u| u.label().to_string()),
            reporter_name: report.reporter_name.clone(),
            reporter_id: report.reporter_id.clone(),
            status: report.status,
            votes: report.votes,
            image_url: report.image_url.clone(),
            latitude: report.latitude,
            longitude: report.longitude,
            timestamp: report.timestamp,
            time_ago: format_relative_time(report.timestamp, now),
        }
    }
}

/// Per-category count over the unfiltered feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummaryDto {
    pub category: ReportCategory,
    pub label: String,
    pub count: usize,
}

/// Filtered and sorted projection of the live feed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponseDto {
    pub reports: Vec<ReportResponseDto>,
    pub summary: Vec<CategorySummaryDto>,
    /// Number of reports after filtering
    pub total: usize,
    pub header: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub loading: bool,
}

/// Filter and sort selection for the feed
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// `all` or a category value
    pub category: Option<String>,
    /// `newest`, `oldest` or `urgency`
    pub sort: Option<String>,
}

/// Created report plus the confirmation shown to the reporter
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportResponseDto {
    pub report: ReportResponseDto,
    pub message: String,
    /// View the client should navigate to next
    pub next_view: String,
}

/// Report submission form for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct SubmitReportFormDto {
    #[schema(example = "Broken streetlight on 5th Ave")]
    pub description: String,
    #[schema(example = "5th Ave & Main")]
    pub location: String,
    #[schema(example = "lighting")]
    pub category: String,
    /// Defaults to "medium"
    #[schema(example = "medium")]
    pub urgency: Option<String>,
    /// Defaults to the session display name
    pub reporter_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Photo, at most 5MB
    #[schema(format = Binary, content_media_type = "image/*")]
    pub image: Option<String>,
}
