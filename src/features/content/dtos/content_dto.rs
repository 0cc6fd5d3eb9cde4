use serde::Serialize;
use utoipa::ToSchema;

use crate::features::content::models::{FaqEntry, InfoCard};
use crate::features::reports::models::{ReportCategory, ReportUrgency};

#[derive(Debug, Serialize, ToSchema)]
pub struct FaqEntryDto {
    pub id: u32,
    pub question: String,
    pub answer: String,
}

impl From<&FaqEntry> for FaqEntryDto {
    fn from(entry: &FaqEntry) -> Self {
        Self {
            id: entry.id,
            question: entry.question.to_string(),
            answer: entry.answer.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaqResponseDto {
    pub entries: Vec<FaqEntryDto>,
    pub support_email: String,
    pub live_chat_hours: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InfoCardDto {
    pub id: u32,
    pub title: String,
    pub description: String,
}

impl From<&InfoCard> for InfoCardDto {
    fn from(card: &InfoCard) -> Self {
        Self {
            id: card.id,
            title: card.title.to_string(),
            description: card.description.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InfoResponseDto {
    pub primary: Vec<InfoCardDto>,
    pub secondary: Vec<InfoCardDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryOptionDto {
    pub value: ReportCategory,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UrgencyOptionDto {
    pub value: ReportUrgency,
    pub label: String,
    /// Higher is more urgent
    pub rank: u8,
}

/// Options for the category and urgency selectors
#[derive(Debug, Serialize, ToSchema)]
pub struct TaxonomyResponseDto {
    pub categories: Vec<CategoryOptionDto>,
    pub urgencies: Vec<UrgencyOptionDto>,
}
