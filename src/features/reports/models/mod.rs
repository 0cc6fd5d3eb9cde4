mod report;

pub use report::{
    urgency_rank, CreateReport, Report, ReportCategory, ReportStatus, ReportUrgency,
};
