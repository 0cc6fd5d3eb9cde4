mod ai_dto;

pub use ai_dto::{AiStatusDto, KeywordsDto, SuggestionDto, TextInputDto};
