mod content_dto;

pub use content_dto::{
    CategoryOptionDto, FaqEntryDto, FaqResponseDto, InfoCardDto, InfoResponseDto,
    TaxonomyResponseDto, UrgencyOptionDto,
};
