//! Application status values and the workflow transition table.
//!
//! Discriminants match the seed order in the `application_statuses` lookup
//! table. The transition table is the single authority on which status
//! changes a reviewer may make; review-board buttons are derived from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending = 1,
    InReview = 2,
    Approved = 3,
    Rejected = 4,
    Completed = 5,
}

impl ApplicationStatus {
    /// Every status, in seed order.
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Pending,
        ApplicationStatus::InReview,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
        ApplicationStatus::Completed,
    ];

    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    pub fn from_id(id: StatusId) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::InReview => "in_review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Completed => "completed",
        }
    }

    /// Lower-case words, e.g. `"in review"`.
    pub fn words(self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Statuses a reviewer may move an application to from `self`.
    ///
    /// No status leads back to `pending` and no status leads to itself.
    /// `completed` is reachable only from `approved`.
    pub fn allowed_transitions(self) -> &'static [ApplicationStatus] {
        use ApplicationStatus::*;
        match self {
            Pending => &[InReview, Approved, Rejected],
            InReview => &[Approved, Rejected],
            Approved => &[InReview, Rejected, Completed],
            Rejected => &[InReview, Approved],
            Completed => &[InReview, Approved, Rejected],
        }
    }

    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Check a requested change against the table.
    pub fn validate_transition(self, next: ApplicationStatus) -> Result<(), CoreError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|st| st.as_str()).collect();
                format!("Invalid status '{s}'. Must be one of: {}", names.join(", "))
            })
    }
}

impl From<ApplicationStatus> for StatusId {
    fn from(value: ApplicationStatus) -> Self {
        value as StatusId
    }
}

/// Enabled state of each review-board action for one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewActions {
    pub mark_in_review: bool,
    pub approve: bool,
    pub reject: bool,
    pub complete: bool,
}

impl ReviewActions {
    pub fn for_status(current: ApplicationStatus) -> Self {
        Self {
            mark_in_review: current.can_transition_to(ApplicationStatus::InReview),
            approve: current.can_transition_to(ApplicationStatus::Approved),
            reject: current.can_transition_to(ApplicationStatus::Rejected),
            complete: current.can_transition_to(ApplicationStatus::Completed),
        }
    }
}

/// Citizen-facing wording for where an application stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub headline: &'static str,
    pub description: &'static str,
    /// Present once the application has been approved.
    pub final_step: Option<&'static str>,
}

impl ProgressSummary {
    pub fn for_status(status: ApplicationStatus) -> Self {
        let (headline, description) = match status {
            ApplicationStatus::Pending => (
                "Pending Review",
                "Your application is waiting to be reviewed",
            ),
            ApplicationStatus::InReview => (
                "Under Review",
                "Your application is being reviewed by our team",
            ),
            ApplicationStatus::Rejected => (
                "Application Rejected",
                "Your application has been rejected",
            ),
            ApplicationStatus::Approved | ApplicationStatus::Completed => (
                "Application Approved",
                "Your application has been approved",
            ),
        };
        let final_step = match status {
            ApplicationStatus::Completed => Some("Your application process has been completed"),
            ApplicationStatus::Approved => Some("Waiting for final processing"),
            _ => None,
        };
        Self {
            headline,
            description,
            final_step,
        }
    }
}
