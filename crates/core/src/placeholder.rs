//! Hard-coded read data served while the store is unreachable.

use serde::Serialize;

use crate::application_status::ApplicationStatus;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderService {
    pub id: DbId,
    pub name: &'static str,
    pub description: &'static str,
    pub documents_required: Vec<&'static str>,
    pub fee: Option<f64>,
    pub processing_time: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderApplication {
    pub id: DbId,
    pub status: ApplicationStatus,
    pub notes: &'static str,
    pub documents: Vec<&'static str>,
    pub service: PlaceholderService,
}

pub const APPLICATION_NOTES: &str = "Application details are not available offline.";

/// The four seed services.
pub fn services() -> Vec<PlaceholderService> {
    vec![
        PlaceholderService {
            id: 1,
            name: "Birth Certificate",
            description: "Apply for a birth certificate for newborns or for those who do not have one.",
            documents_required: vec!["ID Proof", "Hospital Certificate"],
            fee: Some(100.0),
            processing_time: "7-10 days",
        },
        PlaceholderService {
            id: 2,
            name: "Death Certificate",
            description: "Apply for a death certificate for a deceased family member.",
            documents_required: vec!["ID Proof", "Medical Certificate"],
            fee: Some(100.0),
            processing_time: "7-10 days",
        },
        PlaceholderService {
            id: 3,
            name: "Property Tax",
            description: "Pay your property tax online.",
            documents_required: vec!["Property Documents", "Previous Tax Receipts"],
            fee: Some(0.0),
            processing_time: "Immediate",
        },
        PlaceholderService {
            id: 4,
            name: "Income Certificate",
            description: "Apply for an income certificate for various purposes.",
            documents_required: vec!["ID Proof", "Income Proof", "Residence Proof"],
            fee: Some(50.0),
            processing_time: "15 days",
        },
    ]
}

pub fn service(id: DbId) -> Option<PlaceholderService> {
    services().into_iter().find(|s| s.id == id)
}

/// Stand-in detail for any application id, attached to the first seed service.
pub fn application(id: DbId) -> PlaceholderApplication {
    let mut all = services();
    let service = all.remove(0);
    PlaceholderApplication {
        id,
        status: ApplicationStatus::Pending,
        notes: APPLICATION_NOTES,
        documents: vec!["ID Proof", "Address Proof"],
        service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_seed_services() {
        let names: Vec<&str> = services().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "Birth Certificate",
                "Death Certificate",
                "Property Tax",
                "Income Certificate"
            ]
        );
    }

    #[test]
    fn application_keeps_requested_id() {
        let app = application(42);
        assert_eq!(app.id, 42);
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(app.notes, APPLICATION_NOTES);
    }
}
