//! Service catalog rules: search, document lists, fee checks, and the
//! two-step delete confirmation.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Case-insensitive substring match over a service's name or description.
///
/// An empty (or all-whitespace) term matches everything.
pub fn matches_search(name: &str, description: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&term) || description.to_lowercase().contains(&term)
}

/// Keep the items whose name or description contains `term`.
pub fn filter_by_search<T, F>(items: Vec<T>, term: Option<&str>, fields: F) -> Vec<T>
where
    F: Fn(&T) -> (&str, &str),
{
    match term {
        None => items,
        Some(term) => items
            .into_iter()
            .filter(|item| {
                let (name, description) = fields(item);
                matches_search(name, description, term)
            })
            .collect(),
    }
}

/// Required-document input accepted by catalog forms.
///
/// Admin forms send a comma-separated string; API clients may send a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DocumentListInput {
    List(Vec<String>),
    Csv(String),
}

impl DocumentListInput {
    /// Normalize to trimmed, non-empty names.
    pub fn into_names(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            DocumentListInput::List(items) => items,
            DocumentListInput::Csv(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|doc| doc.trim().to_string())
            .filter(|doc| !doc.is_empty())
            .collect()
    }
}

pub fn validate_fee(fee: Option<f64>) -> Result<(), CoreError> {
    match fee {
        Some(value) if !value.is_finite() || value < 0.0 => Err(CoreError::Validation(
            "Fee must be zero or a positive amount".into(),
        )),
        _ => Ok(()),
    }
}

/// Outcome of a delete request against the confirmation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDecision {
    /// First request for this row: nothing deleted, row is now armed.
    Armed,
    /// Second request for an armed row: the caller should delete it now.
    Confirmed,
}

/// Per-row delete confirmation flags for one admin.
///
/// Each row is armed independently; arming one row never disarms another.
#[derive(Debug, Default)]
pub struct DeleteArming {
    armed: HashMap<DbId, Timestamp>,
}

impl DeleteArming {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a delete request for `id` at `now`.
    ///
    /// Flags older than `ttl` count as unarmed.
    pub fn request(&mut self, id: DbId, now: Timestamp, ttl: chrono::Duration) -> DeleteDecision {
        match self.armed.get(&id) {
            Some(armed_at) if now - *armed_at <= ttl => {
                self.armed.remove(&id);
                DeleteDecision::Confirmed
            }
            _ => {
                self.armed.insert(id, now);
                DeleteDecision::Armed
            }
        }
    }

    pub fn is_armed(&self, id: DbId) -> bool {
        self.armed.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    /// Drop flags older than `ttl`.
    pub fn prune(&mut self, now: Timestamp, ttl: chrono::Duration) {
        self.armed.retain(|_, armed_at| now - *armed_at <= ttl);
    }
}
