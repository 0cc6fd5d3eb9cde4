use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, Report};

/// Column list shared by every query returning a full report row
const REPORT_COLUMNS: &str = r#"
    id, description, location, category, urgency,
    reporter_name, reporter_email, reporter_id,
    status, votes, image_url, latitude, longitude, timestamp
"#;

/// Document store holding report records
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Write one record; the store assigns `id` and `timestamp`
    async fn create(&self, data: &CreateReport) -> Result<Report>;

    /// Full record set ordered by `timestamp` descending
    async fn list_newest_first(&self) -> Result<Vec<Report>>;
}

/// Postgres-backed report store
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn create(&self, data: &CreateReport) -> Result<Report> {
        let sql = format!(
            r#"
            INSERT INTO reports (
                description, location, category, urgency,
                reporter_name, reporter_email, reporter_id,
                status, votes, image_url, latitude, longitude
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {REPORT_COLUMNS}
            "#
        );

        let report = sqlx::query_as::<_, Report>(&sql)
            .bind(&data.description)
            .bind(&data.location)
            .bind(data.category)
            .bind(data.urgency)
            .bind(&data.reporter_name)
            .bind(&data.reporter_email)
            .bind(&data.reporter_id)
            .bind(data.status)
            .bind(data.votes)
            .bind(&data.image_url)
            .bind(data.latitude)
            .bind(data.longitude)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create report: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Created report: {} ({}) by {}",
            report.id,
            report.category,
            report.reporter_id
        );

        Ok(report)
    }

    async fn list_newest_first(&self) -> Result<Vec<Report>> {
        let sql = format!("SELECT {REPORT_COLUMNS} FROM reports ORDER BY timestamp DESC");

        let reports = sqlx::query_as::<_, Report>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(reports)
    }
}
