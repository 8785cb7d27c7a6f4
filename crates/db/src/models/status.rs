//! Serialization helpers for SMALLINT status columns.
//!
//! Rows carry the raw `status_id`; API payloads carry the status name.

use egram_core::application_status::{ApplicationStatus, StatusId};
use serde::Serializer;

/// Resolve a stored id. The FK to `application_statuses` keeps ids valid;
/// an unknown id reads as `pending`.
pub fn resolve(id: StatusId) -> ApplicationStatus {
    ApplicationStatus::from_id(id).unwrap_or(ApplicationStatus::Pending)
}

/// `serialize_with` target: writes `status_id` as the status name.
pub fn serialize_status<S: Serializer>(id: &StatusId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(resolve(*id).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_reads_as_pending() {
        assert_eq!(resolve(3), ApplicationStatus::Approved);
        assert_eq!(resolve(42), ApplicationStatus::Pending);
    }
}
