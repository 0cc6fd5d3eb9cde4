use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Report category enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    Lighting,
    Vandalism,
    Noise,
    Waste,
    Infrastructure,
    Other,
}

impl ReportCategory {
    /// Canonical display order
    pub const ALL: [ReportCategory; 6] = [
        ReportCategory::Lighting,
        ReportCategory::Vandalism,
        ReportCategory::Noise,
        ReportCategory::Waste,
        ReportCategory::Infrastructure,
        ReportCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportCategory::Lighting => "lighting",
            ReportCategory::Vandalism => "vandalism",
            ReportCategory::Noise => "noise",
            ReportCategory::Waste => "waste",
            ReportCategory::Infrastructure => "infrastructure",
            ReportCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportCategory::Lighting => "Street Lighting",
            ReportCategory::Vandalism => "Vandalism",
            ReportCategory::Noise => "Noise",
            ReportCategory::Waste => "Waste & Litter",
            ReportCategory::Infrastructure => "Infrastructure",
            ReportCategory::Other => "Other",
        }
    }

    /// What the category covers, as explained to the classifier
    pub fn classifier_hint(self) -> &'static str {
        match self {
            ReportCategory::Lighting => "Streetlights, broken lights, dark areas",
            ReportCategory::Vandalism => "Graffiti, property damage, broken windows",
            ReportCategory::Noise => "Loud disturbances, construction noise, parties",
            ReportCategory::Waste => "Trash, illegal dumping, overflowing bins",
            ReportCategory::Infrastructure => {
                "Potholes, broken sidewalks, damaged roads, fallen trees"
            }
            ReportCategory::Other => "Anything else",
        }
    }

    /// Map any string onto the enumeration, falling back to `Other`
    pub fn coerce(value: &str) -> Self {
        value.parse().unwrap_or(ReportCategory::Other)
    }
}

impl FromStr for ReportCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report urgency enum matching database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "report_urgency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportUrgency {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl ReportUrgency {
    pub const ALL: [ReportUrgency; 4] = [
        ReportUrgency::Low,
        ReportUrgency::Medium,
        ReportUrgency::High,
        ReportUrgency::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportUrgency::Low => "low",
            ReportUrgency::Medium => "medium",
            ReportUrgency::High => "high",
            ReportUrgency::Critical => "critical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportUrgency::Low => "Low",
            ReportUrgency::Medium => "Medium",
            ReportUrgency::High => "High",
            ReportUrgency::Critical => "Critical",
        }
    }

    /// Sort rank, higher is more urgent
    pub fn rank(self) -> u8 {
        match self {
            ReportUrgency::Critical => 4,
            ReportUrgency::High => 3,
            ReportUrgency::Medium => 2,
            ReportUrgency::Low => 1,
        }
    }

    pub fn classifier_hint(self) -> &'static str {
        match self {
            ReportUrgency::Low => "Minor issue, not time-sensitive (graffiti, litter)",
            ReportUrgency::Medium => "Needs attention soon (broken light, potholes)",
            ReportUrgency::High => "Urgent, affects many people (dangerous road, flooding)",
            ReportUrgency::Critical => {
                "Immediate danger (exposed wires, gas leak, structural collapse)"
            }
        }
    }

    /// Map any string onto the enumeration, falling back to `Medium`
    pub fn coerce(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for ReportUrgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportUrgency::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| format!("Unknown urgency: {}", s))
    }
}

impl std::fmt::Display for ReportUrgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank of an urgency that may be missing from a record; unknown sorts last
pub fn urgency_rank(urgency: Option<ReportUrgency>) -> u8 {
    urgency.map_or(0, ReportUrgency::rank)
}

/// Report status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Approved,
    Rejected,
}

/// Database model for report
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub description: String,
    pub location: String,
    pub category: ReportCategory,
    pub urgency: Option<ReportUrgency>,
    pub reporter_name: String,
    pub reporter_email: String,
    pub reporter_id: String,
    pub status: ReportStatus,
    pub votes: i32,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Data for creating a new report
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub description: String,
    pub location: String,
    pub category: ReportCategory,
    pub urgency: ReportUrgency,
    pub reporter_name: String,
    pub reporter_email: String,
    pub reporter_id: String,
    pub status: ReportStatus,
    pub votes: i32,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_and_coerce() {
        assert_eq!(
            "waste".parse::<ReportCategory>(),
            Ok(ReportCategory::Waste)
        );
        assert!("Waste".parse::<ReportCategory>().is_err());
        assert_eq!(ReportCategory::coerce("pothole"), ReportCategory::Other);
        assert_eq!(ReportCategory::coerce("noise"), ReportCategory::Noise);
    }

    #[test]
    fn test_urgency_coerce_defaults_to_medium() {
        assert_eq!(ReportUrgency::coerce("urgent"), ReportUrgency::Medium);
        assert_eq!(ReportUrgency::coerce(""), ReportUrgency::Medium);
        assert_eq!(ReportUrgency::coerce("critical"), ReportUrgency::Critical);
    }

    #[test]
    fn test_urgency_rank_order() {
        assert_eq!(urgency_rank(Some(ReportUrgency::Critical)), 4);
        assert_eq!(urgency_rank(Some(ReportUrgency::High)), 3);
        assert_eq!(urgency_rank(Some(ReportUrgency::Medium)), 2);
        assert_eq!(urgency_rank(Some(ReportUrgency::Low)), 1);
        assert_eq!(urgency_rank(None), 0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ReportCategory::Lighting.label(), "Street Lighting");
        assert_eq!(ReportCategory::Waste.label(), "Waste & Litter");
        assert_eq!(ReportUrgency::Critical.label(), "Critical");
    }

    #[test]
    fn test_enum_wire_format_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReportCategory::Infrastructure).unwrap(),
            "\"infrastructure\""
        );
        assert_eq!(
            serde_json::to_string(&ReportStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
