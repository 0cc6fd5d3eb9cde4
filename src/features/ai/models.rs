use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::{ReportCategory, ReportUrgency};

/// Sentiment labels the model may answer with
pub const SENTIMENT_LABELS: [&str; 5] = ["angry", "concerned", "frustrated", "neutral", "positive"];

pub const NEUTRAL_SENTIMENT: &str = "neutral";
pub const DEFAULT_SENTIMENT_INTENSITY: f64 = 0.5;

/// Where a classification came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    Ai,
}

/// Category and urgency suggested for a report description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Classification {
    pub category: ReportCategory,
    pub urgency: ReportUrgency,
    pub confidence: f64,
    pub source: ClassificationSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sentiment {
    /// One of angry, concerned, frustrated, neutral, positive
    pub sentiment: String,
    /// 0.0 to 1.0
    pub intensity: f64,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self {
            sentiment: NEUTRAL_SENTIMENT.to_string(),
            intensity: DEFAULT_SENTIMENT_INTENSITY,
        }
    }
}
