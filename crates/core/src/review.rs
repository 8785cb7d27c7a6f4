//! Review-board filtering and status counts.

use serde::{Deserialize, Serialize};

use crate::application_status::ApplicationStatus;
use crate::types::DbId;

/// Status filter used by application lists: `all` or one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    /// Parse a query value. Absent, empty, and `"all"` mean no filter.
    pub fn parse(value: Option<&str>) -> Result<Self, String> {
        match value.map(str::trim) {
            None | Some("") | Some("all") => Ok(StatusFilter::All),
            Some(other) => other.parse().map(StatusFilter::Only),
        }
    }

    pub fn matches(self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// The fields of a review-board row that search looks at.
pub trait ReviewRow {
    fn id(&self) -> DbId;
    fn status(&self) -> ApplicationStatus;
    fn service_name(&self) -> &str;
    fn applicant_name(&self) -> &str;
}

/// Combined search and status filter for the review board.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub search: Option<String>,
    pub status: StatusFilter,
}

impl ReviewFilter {
    /// Search is a case-insensitive substring over the service name, the
    /// applicant name, and the decimal application id.
    pub fn matches<R: ReviewRow>(&self, row: &R) -> bool {
        if !self.status.matches(row.status()) {
            return false;
        }
        let term = match self.search.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(term) => term.to_lowercase(),
        };
        row.service_name().to_lowercase().contains(&term)
            || row.applicant_name().to_lowercase().contains(&term)
            || row.id().to_string().contains(&term)
    }

    pub fn apply<R: ReviewRow>(&self, rows: Vec<R>) -> Vec<R> {
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}

/// Case-insensitive search over a service name only (citizen list).
pub fn matches_service_name(service_name: &str, term: Option<&str>) -> bool {
    match term.map(str::trim) {
        None | Some("") => true,
        Some(term) => service_name.to_lowercase().contains(&term.to_lowercase()),
    }
}

/// Count of applications in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_review: usize,
    pub approved: usize,
    pub rejected: usize,
    pub completed: usize,
}

impl StatusCounts {
    /// One pass over the statuses.
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ApplicationStatus>,
    {
        let mut counts = Self::default();
        for status in statuses {
            counts.total += 1;
            match status {
                ApplicationStatus::Pending => counts.pending += 1,
                ApplicationStatus::InReview => counts.in_review += 1,
                ApplicationStatus::Approved => counts.approved += 1,
                ApplicationStatus::Rejected => counts.rejected += 1,
                ApplicationStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }
}
