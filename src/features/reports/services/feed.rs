//! Filtered, sorted and aggregated projection of the live report set.

use chrono::{DateTime, Datelike, Utc};
use std::str::FromStr;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    CategorySummaryDto, FeedQuery, FeedResponseDto, ReportResponseDto,
};
use crate::features::reports::models::{urgency_rank, Report, ReportCategory};
use crate::features::reports::services::FeedSnapshot;

/// Category filter: everything, or one exact category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedFilter {
    #[default]
    All,
    Category(ReportCategory),
}

impl FeedFilter {
    fn matches(self, report: &Report) -> bool {
        match self {
            FeedFilter::All => true,
            FeedFilter::Category(category) => report.category == category,
        }
    }
}

impl FromStr for FeedFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "all" {
            return Ok(FeedFilter::All);
        }
        s.parse::<ReportCategory>()
            .map(FeedFilter::Category)
            .map_err(|_| format!("Unknown category filter: {}", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedSort {
    #[default]
    Newest,
    Oldest,
    Urgency,
}

impl FromStr for FeedSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "newest" => Ok(FeedSort::Newest),
            "oldest" => Ok(FeedSort::Oldest),
            "urgency" => Ok(FeedSort::Urgency),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Parse the query string selection; missing values mean `all` / `newest`
pub fn parse_selection(query: &FeedQuery) -> Result<(FeedFilter, FeedSort)> {
    let filter = match query.category.as_deref() {
        None | Some("") => FeedFilter::default(),
        Some(value) => value.parse().map_err(AppError::BadRequest)?,
    };
    let sort = match query.sort.as_deref() {
        None | Some("") => FeedSort::default(),
        Some(value) => value.parse().map_err(AppError::BadRequest)?,
    };
    Ok((filter, sort))
}

/// Working set of one feed consumer plus its filter and sort selection.
///
/// The working set is only ever replaced wholesale by a new snapshot.
#[derive(Debug, Clone)]
pub struct ReportFeed {
    reports: Arc<Vec<Report>>,
    loading: bool,
    filter: FeedFilter,
    sort: FeedSort,
}

impl ReportFeed {
    pub fn new(filter: FeedFilter, sort: FeedSort) -> Self {
        Self {
            reports: Arc::new(Vec::new()),
            loading: true,
            filter,
            sort,
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: &FeedSnapshot) {
        if let Some(error) = &snapshot.error {
            tracing::warn!("Report feed subscription failed: {}", error);
            self.reports = Arc::new(Vec::new());
        } else {
            self.reports = Arc::clone(&snapshot.reports);
        }
        self.loading = snapshot.loading;
    }

    #[cfg(test)]
    pub fn set_filter(&mut self, filter: FeedFilter) {
        self.filter = filter;
    }

    #[cfg(test)]
    pub fn set_sort(&mut self, sort: FeedSort) {
        self.sort = sort;
    }

    /// Reports passing the filter, in the selected order.
    /// Ties keep the order of the underlying snapshot.
    pub fn visible(&self) -> Vec<&Report> {
        let mut visible: Vec<&Report> = self
            .reports
            .iter()
            .filter(|r| self.filter.matches(r))
            .collect();

        match self.sort {
            FeedSort::Newest => visible.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            FeedSort::Oldest => visible.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
            FeedSort::Urgency => {
                visible.sort_by(|a, b| urgency_rank(b.urgency).cmp(&urgency_rank(a.urgency)))
            }
        }

        visible
    }

    /// Per-category counts over the unfiltered set, canonical order, zeros omitted
    pub fn summary(&self) -> Vec<CategorySummaryDto> {
        ReportCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let count = self
                    .reports
                    .iter()
                    .filter(|r| r.category == category)
                    .count();
                (count > 0).then(|| CategorySummaryDto {
                    category,
                    label: category.label().to_string(),
                    count,
                })
            })
            .collect()
    }

    fn header(&self, count: usize) -> String {
        let noun = if count == 1 { "report" } else { "reports" };
        match self.filter {
            FeedFilter::All => format!("{} {}", count, noun),
            FeedFilter::Category(category) => {
                format!("{} {} in {}", count, noun, category.label())
            }
        }
    }

    fn empty_message(&self) -> String {
        match self.filter {
            FeedFilter::All => "Be the first to report a community issue!".to_string(),
            FeedFilter::Category(category) => {
                format!("No reports in {} yet.", category.label())
            }
        }
    }

    pub fn project(&self, now: DateTime<Utc>) -> FeedResponseDto {
        let reports: Vec<ReportResponseDto> = self
            .visible()
            .into_iter()
            .map(|r| ReportResponseDto::from_report(r, now))
            .collect();
        let total = reports.len();

        FeedResponseDto {
            summary: self.summary(),
            header: self.header(total),
            empty_message: (total == 0 && !self.loading).then(|| self.empty_message()),
            loading: self.loading,
            total,
            reports,
        }
    }
}

/// Human-friendly age of a timestamp relative to `now`
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - timestamp;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else if timestamp.year() != now.year() {
        timestamp.format("%b %-d, %Y").to_string()
    } else {
        timestamp.format("%b %-d").to_string()
    }
}
