pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod workers;

pub use services::{LiveQuery, PgReportStore, SubmissionService};
pub use workers::ChangeListener;
