//! Tri-state connectivity classification for the backing store.

use std::fmt;

use serde::Serialize;

/// Shown whenever a mutation is refused because the store is unreachable.
pub const UNAVAILABLE_MESSAGE: &str = "Cannot connect to the server. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    /// No probe has completed yet.
    #[default]
    Checking,
    Connected,
    Error,
}

impl ConnectivityState {
    pub fn from_probe(ok: bool) -> Self {
        if ok {
            ConnectivityState::Connected
        } else {
            ConnectivityState::Error
        }
    }

    /// Mutations are attempted only once a probe has succeeded.
    pub fn allows_mutations(self) -> bool {
        self == ConnectivityState::Connected
    }

    /// Reads fall back to placeholder data only after a failed probe.
    pub fn uses_placeholders(self) -> bool {
        self == ConnectivityState::Error
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectivityState::Checking => "checking",
            ConnectivityState::Connected => "connected",
            ConnectivityState::Error => "error",
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
