//! Profile entity model and DTOs.

use egram_core::roles::Role;
use egram_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `profiles` table.
///
/// Contains the password hash. NEVER serialize this to API responses
/// directly; use [`ProfileResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    /// Parsed role. The CHECK constraint keeps `role` valid; anything else
    /// is treated as the least-privileged role.
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Citizen)
    }
}

/// Safe profile representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: Timestamp,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            role: profile.role,
            phone: profile.phone,
            address: profile.address,
            created_at: profile.created_at,
        }
    }
}

pub struct CreateProfile {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Self-service fields. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
