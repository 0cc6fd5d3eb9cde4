pub mod feed;
mod live_query;
mod report_store;
mod submission_service;

pub use feed::ReportFeed;
pub use live_query::{FeedSnapshot, LiveQuery};
pub use report_store::{PgReportStore, ReportStore};
pub use submission_service::{
    ImageAttachment, ReportDraft, SubmissionService, IMAGE_TOO_LARGE_MESSAGE,
};
