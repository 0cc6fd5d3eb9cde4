//! Storage module for report photos
//!
//! Provides the `BlobStore` seam and its MinIO/S3-compatible implementation.

mod minio_client;

use async_trait::async_trait;

use crate::core::error::AppError;

pub use minio_client::MinIOClient;

/// Upload-by-key blob storage that hands back a retrieval URL.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key` and return the URL it can be fetched from
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> Result<String, AppError>;
}
