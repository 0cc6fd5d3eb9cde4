mod report_dto;

pub use report_dto::{
    CategorySummaryDto, FeedQuery, FeedResponseDto, ReportResponseDto, SubmitReportFormDto,
    SubmitReportResponseDto,
};
