//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where the table has one

pub mod application;
pub mod notification;
pub mod profile;
pub mod service;
pub mod session;
pub mod status;
