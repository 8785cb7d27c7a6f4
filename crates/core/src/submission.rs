//! Document upload slots for an application submission.
//!
//! A service's `documents_required` list defines one slot per entry. The
//! submission is accepted only when every slot has a chosen file.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One required-document slot, as presented on the submission form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSlot {
    pub name: String,
    pub file_name: Option<String>,
}

impl DocumentSlot {
    pub fn is_filled(&self) -> bool {
        self.file_name
            .as_deref()
            .is_some_and(|file| !file.trim().is_empty())
    }
}

/// A document attached by the client, matched to a slot by `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedDocument {
    pub name: String,
    pub file_name: Option<String>,
}

/// Empty slots for a service's required documents.
pub fn empty_slots(documents_required: &[String]) -> Vec<DocumentSlot> {
    documents_required
        .iter()
        .map(|name| DocumentSlot {
            name: name.clone(),
            file_name: None,
        })
        .collect()
}

/// Fill the slots from the submitted documents.
///
/// Submitted entries that name no required document are ignored.
pub fn fill_slots(documents_required: &[String], submitted: &[SubmittedDocument]) -> Vec<DocumentSlot> {
    documents_required
        .iter()
        .map(|name| DocumentSlot {
            name: name.clone(),
            file_name: submitted
                .iter()
                .find(|doc| doc.name == *name)
                .and_then(|doc| doc.file_name.clone()),
        })
        .collect()
}

/// Check that every slot has a file and return the document names to record.
pub fn validate_submission(slots: &[DocumentSlot]) -> Result<Vec<String>, CoreError> {
    let missing: Vec<&str> = slots
        .iter()
        .filter(|slot| !slot.is_filled())
        .map(|slot| slot.name.as_str())
        .collect();

    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "Please upload all required documents: {}",
            missing.join(", ")
        )));
    }

    Ok(slots.iter().map(|slot| slot.name.clone()).collect())
}
