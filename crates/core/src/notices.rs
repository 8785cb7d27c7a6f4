//! Wording of the notifications sent to applicants.

use crate::application_status::ApplicationStatus;

pub const SUBMITTED_TITLE: &str = "Application Submitted";

/// Title and message of a notification, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeText {
    pub title: String,
    pub message: String,
}

pub fn submitted(service_name: &str) -> NoticeText {
    NoticeText {
        title: SUBMITTED_TITLE.to_string(),
        message: format!(
            "Your application for {service_name} has been submitted successfully and is pending review."
        ),
    }
}

/// e.g. `"Application In review"` / `"Your application for X has been in review."`
pub fn status_changed(service_name: &str, status: ApplicationStatus) -> NoticeText {
    let words = status.words();
    NoticeText {
        title: format!("Application {}", capitalize(&words)),
        message: format!("Your application for {service_name} has been {words}."),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_notice_names_service() {
        let notice = submitted("Birth Certificate");
        assert_eq!(notice.title, "Application Submitted");
        assert_eq!(
            notice.message,
            "Your application for Birth Certificate has been submitted successfully and is pending review."
        );
    }

    #[test]
    fn status_notice_capitalizes_first_word_only() {
        let notice = status_changed("Property Tax", ApplicationStatus::InReview);
        assert_eq!(notice.title, "Application In review");
        assert_eq!(
            notice.message,
            "Your application for Property Tax has been in review."
        );
    }

    #[test]
    fn approved_notice() {
        let notice = status_changed("Income Certificate", ApplicationStatus::Approved);
        assert_eq!(notice.title, "Application Approved");
        assert!(notice.message.ends_with("has been approved."));
    }
}
