use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::ai::{dtos as ai_dtos, handlers as ai_handlers, models as ai_models};
use crate::features::auth;
use crate::features::content::{dtos as content_dtos, handlers as content_handlers};
use crate::features::location::{
    dtos as location_dtos, handlers as location_handlers, models as location_models,
    services::LocationError,
};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Reports
        reports_handlers::submit_report,
        reports_handlers::list_reports,
        reports_handlers::stream_reports,
        // AI
        ai_handlers::classify,
        ai_handlers::extract_keywords,
        ai_handlers::analyze_sentiment,
        ai_handlers::get_suggestions,
        ai_handlers::get_status,
        // Location
        location_handlers::resolve_location,
        // Content (public)
        content_handlers::get_faq,
        content_handlers::get_info,
        content_handlers::get_taxonomy,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::dto::MeResponseDto,
            auth::model::Session,
            ApiResponse<auth::dto::MeResponseDto>,
            // Reports
            reports_models::ReportCategory,
            reports_models::ReportUrgency,
            reports_models::ReportStatus,
            reports_dtos::ReportResponseDto,
            reports_dtos::CategorySummaryDto,
            reports_dtos::FeedResponseDto,
            reports_dtos::SubmitReportFormDto,
            reports_dtos::SubmitReportResponseDto,
            ApiResponse<reports_dtos::FeedResponseDto>,
            ApiResponse<reports_dtos::SubmitReportResponseDto>,
            // AI
            ai_models::Classification,
            ai_models::ClassificationSource,
            ai_models::Sentiment,
            ai_dtos::TextInputDto,
            ai_dtos::KeywordsDto,
            ai_dtos::SuggestionDto,
            ai_dtos::AiStatusDto,
            ApiResponse<ai_models::Classification>,
            ApiResponse<ai_models::Sentiment>,
            ApiResponse<ai_dtos::KeywordsDto>,
            ApiResponse<ai_dtos::SuggestionDto>,
            ApiResponse<ai_dtos::AiStatusDto>,
            // Location
            LocationError,
            location_dtos::ResolveLocationDto,
            location_models::Coordinates,
            location_models::ResolvedLocation,
            ApiResponse<location_models::ResolvedLocation>,
            // Content
            content_dtos::FaqEntryDto,
            content_dtos::FaqResponseDto,
            content_dtos::InfoCardDto,
            content_dtos::InfoResponseDto,
            content_dtos::CategoryOptionDto,
            content_dtos::UrgencyOptionDto,
            content_dtos::TaxonomyResponseDto,
            ApiResponse<content_dtos::FaqResponseDto>,
            ApiResponse<content_dtos::InfoResponseDto>,
            ApiResponse<content_dtos::TaxonomyResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Current session"),
        (name = "reports", description = "Report submission and the live feed"),
        (name = "ai", description = "AI-assisted classification and writing hints"),
        (name = "location", description = "Device position to address"),
        (name = "content", description = "Help and onboarding content (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "SafeSpot API",
        version = "0.1.0",
        description = "API documentation for SafeSpot",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
