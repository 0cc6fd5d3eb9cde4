use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

use crate::core::error::AppError;
use crate::features::auth::model::Session;
use crate::features::reports::models::{
    CreateReport, Report, ReportCategory, ReportStatus, ReportUrgency,
};
use crate::features::reports::services::{LiveQuery, ReportStore};
use crate::modules::storage::BlobStore;
use crate::shared::constants::{MAX_IMAGE_SIZE, REPORT_IMAGE_NAMESPACE};
use crate::shared::validation::sanitize_filename;

pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to submit report. Please try again.";
pub const IMAGE_TOO_LARGE_MESSAGE: &str = "Image must be less than 5MB";

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Bad user input, shown inline
    #[error("{0}")]
    Validation(String),

    /// Upload or store write failed; the reporter retries manually
    #[error("Failed to submit report. Please try again.")]
    Failed(#[source] AppError),
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Validation(msg) => AppError::Validation(msg),
            SubmissionError::Failed(source) => {
                tracing::error!("Report submission failed: {}", source);
                AppError::ExternalServiceError(SUBMISSION_FAILED_MESSAGE.to_string())
            }
        }
    }
}

/// Photo picked for a report
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Form state of a report being written
#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
    pub description: String,
    pub location: String,
    pub category: Option<ReportCategory>,
    pub urgency: ReportUrgency,
    pub reporter_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    image: Option<ImageAttachment>,
}

impl ReportDraft {
    /// Attach a photo, rejecting it up front if it is too large or not an image
    pub fn attach_image(&mut self, image: ImageAttachment) -> Result<(), SubmissionError> {
        if image.data.len() > MAX_IMAGE_SIZE {
            return Err(SubmissionError::Validation(
                IMAGE_TOO_LARGE_MESSAGE.to_string(),
            ));
        }
        if !image.content_type.starts_with("image/") {
            return Err(SubmissionError::Validation(
                "Please select an image file".to_string(),
            ));
        }

        self.image = Some(image);
        Ok(())
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    /// Check required fields in display order
    pub fn validate(&self) -> Result<ReportCategory, SubmissionError> {
        if self.description.trim().is_empty() {
            return Err(SubmissionError::Validation(
                "Please describe the issue".to_string(),
            ));
        }
        if self.location.trim().is_empty() {
            return Err(SubmissionError::Validation(
                "Please provide a location".to_string(),
            ));
        }
        self.category
            .ok_or_else(|| SubmissionError::Validation("Please select a category".to_string()))
    }

    /// Clear the form after a successful submission; the reporter name stays
    pub fn reset(&mut self) {
        *self = ReportDraft {
            reporter_name: std::mem::take(&mut self.reporter_name),
            ..ReportDraft::default()
        };
    }
}

/// Orchestrates one report submission: validate, upload, write, confirm.
pub struct SubmissionService {
    store: Arc<dyn ReportStore>,
    blobs: Arc<dyn BlobStore>,
    live_query: Arc<LiveQuery>,
}

impl SubmissionService {
    pub fn new(
        store: Arc<dyn ReportStore>,
        blobs: Arc<dyn BlobStore>,
        live_query: Arc<LiveQuery>,
    ) -> Self {
        Self {
            store,
            blobs,
            live_query,
        }
    }

    /// Submit the draft on behalf of `session`.
    ///
    /// On success `on_success` runs with the created record and the draft is
    /// reset. Nothing is retried.
    pub async fn submit<F>(
        &self,
        session: &Session,
        draft: &mut ReportDraft,
        on_success: F,
    ) -> Result<Report, SubmissionError>
    where
        F: FnOnce(&Report),
    {
        let category = draft.validate()?;

        let image_url = match draft.image() {
            Some(image) => Some(self.upload_image(image).await?),
            None => None,
        };

        let reporter_name = match draft.reporter_name.trim() {
            "" => session.reporter_name(),
            name => name.to_string(),
        };

        let data = CreateReport {
            description: draft.description.trim().to_string(),
            location: draft.location.trim().to_string(),
            category,
            urgency: draft.urgency,
            reporter_name,
            reporter_email: session.reporter_email(),
            reporter_id: session.reporter_id(),
            status: ReportStatus::Pending,
            votes: 0,
            image_url,
            latitude: draft.latitude,
            longitude: draft.longitude,
        };

        let report = self
            .store
            .create(&data)
            .await
            .map_err(SubmissionError::Failed)?;

        on_success(&report);
        draft.reset();
        self.live_query.refresh().await;

        Ok(report)
    }

    async fn upload_image(&self, image: &ImageAttachment) -> Result<String, SubmissionError> {
        let key = format!(
            "{}/{}_{}",
            REPORT_IMAGE_NAMESPACE,
            Utc::now().timestamp_millis(),
            sanitize_filename(&image.filename)
        );

        tracing::debug!("Uploading report image to {}", key);

        self.blobs
            .upload(&key, image.data.clone(), &image.content_type)
            .await
            .map_err(SubmissionError::Failed)
    }
}
