use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Free text to analyse
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TextInputDto {
    #[validate(length(max = 5000, message = "Text must not exceed 5000 characters"))]
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KeywordsDto {
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionDto {
    /// Absent when the model had nothing short and useful to add
    pub suggestion: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AiStatusDto {
    pub available: bool,
    pub model: String,
}
