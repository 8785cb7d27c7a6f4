//! Domain rules for the E-Gram Panchayat portal.
//!
//! Everything here is pure: no database, no HTTP. The `db` and `api` crates
//! build on these types so the workflow rules live in exactly one place.

pub mod accounts;
pub mod application_status;
pub mod catalog;
pub mod connectivity;
pub mod dashboard;
pub mod error;
pub mod notices;
pub mod placeholder;
pub mod review;
pub mod roles;
pub mod submission;
pub mod types;
