/// Largest photo accepted for a report (5MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Blob-store namespace for report photos
pub const REPORT_IMAGE_NAMESPACE: &str = "reports";

/// Reporter fallbacks when the session carries no identity fields
pub const ANONYMOUS_REPORTER_NAME: &str = "Anonymous";
pub const ANONYMOUS_REPORTER_ID: &str = "anonymous";

// =============================================================================
// AI CLASSIFICATION
// =============================================================================

/// Shortest description (after trimming) worth sending for classification
pub const MIN_CLASSIFICATION_TEXT_LEN: usize = 5;

/// Inputs longer than this never get an improvement suggestion
pub const MAX_SUGGESTION_INPUT_LEN: usize = 200;

/// Suggestions at or above this length are discarded
pub const MAX_SUGGESTION_LEN: usize = 100;

/// Confidence reported for every successful model classification
pub const AI_CLASSIFICATION_CONFIDENCE: f64 = 0.9;

// =============================================================================
// LOCATION
// =============================================================================

/// Upper bound on a device position query
pub const GEOLOCATION_TIMEOUT_SECS: u64 = 10;
