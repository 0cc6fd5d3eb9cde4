use axum::Json;

use crate::core::error::Result;
use crate::features::content::dtos::{
    CategoryOptionDto, FaqEntryDto, FaqResponseDto, InfoCardDto, InfoResponseDto,
    TaxonomyResponseDto, UrgencyOptionDto,
};
use crate::features::content::models::{
    FAQ, LIVE_CHAT_HOURS, PRIMARY_INFO_CARDS, SECONDARY_INFO_CARDS, SUPPORT_EMAIL,
};
use crate::features::reports::models::{ReportCategory, ReportUrgency};
use crate::shared::types::ApiResponse;

/// Help page FAQ and support contact
#[utoipa::path(
    get,
    path = "/api/content/faq",
    responses(
        (status = 200, description = "FAQ entries", body = ApiResponse<FaqResponseDto>),
    ),
    tag = "content"
)]
pub async fn get_faq() -> Result<Json<ApiResponse<FaqResponseDto>>> {
    let dto = FaqResponseDto {
        entries: FAQ.iter().map(FaqEntryDto::from).collect(),
        support_email: SUPPORT_EMAIL.to_string(),
        live_chat_hours: LIVE_CHAT_HOURS.to_string(),
    };

    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/content/info",
    responses(
        (status = 200, description = "Informational cards", body = ApiResponse<InfoResponseDto>),
    ),
    tag = "content"
)]
pub async fn get_info() -> Result<Json<ApiResponse<InfoResponseDto>>> {
    let dto = InfoResponseDto {
        primary: PRIMARY_INFO_CARDS.iter().map(InfoCardDto::from).collect(),
        secondary: SECONDARY_INFO_CARDS.iter().map(InfoCardDto::from).collect(),
    };

    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// Categories and urgencies in display order
#[utoipa::path(
    get,
    path = "/api/content/taxonomy",
    responses(
        (status = 200, description = "Selector options", body = ApiResponse<TaxonomyResponseDto>),
    ),
    tag = "content"
)]
pub async fn get_taxonomy() -> Result<Json<ApiResponse<TaxonomyResponseDto>>> {
    let dto = TaxonomyResponseDto {
        categories: ReportCategory::ALL
            .into_iter()
            .map(|c| CategoryOptionDto {
                value: c,
                label: c.label().to_string(),
            })
            .collect(),
        urgencies: ReportUrgency::ALL
            .into_iter()
            .map(|u| UrgencyOptionDto {
                value: u,
                label: u.label().to_string(),
                rank: u.rank(),
            })
            .collect(),
    };

    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}
