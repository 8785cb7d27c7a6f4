//! Well-known role names and the capabilities each role carries.
//!
//! The names must match the CHECK constraint on `profiles.role` in
//! `20260301000001_create_profiles.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_CITIZEN: &str = "citizen";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_CITIZEN, ROLE_STAFF, ROLE_ADMIN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Citizen,
    Staff,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Citizen => ROLE_CITIZEN,
            Role::Staff => ROLE_STAFF,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Create, edit and delete catalog entries.
    pub fn can_manage_catalog(self) -> bool {
        self == Role::Admin
    }

    /// See every application and move it through the workflow.
    pub fn can_review_applications(self) -> bool {
        matches!(self, Role::Staff | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_CITIZEN => Ok(Role::Citizen),
            ROLE_STAFF => Ok(Role::Staff),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        for name in VALID_ROLES {
            let role: Role = name.parse().unwrap();
            assert_eq!(role.as_str(), *name);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert!(err.contains("Invalid role"));
    }

    #[test]
    fn only_admin_manages_catalog() {
        assert!(Role::Admin.can_manage_catalog());
        assert!(!Role::Staff.can_manage_catalog());
        assert!(!Role::Citizen.can_manage_catalog());
    }

    #[test]
    fn staff_and_admin_review() {
        assert!(Role::Admin.can_review_applications());
        assert!(Role::Staff.can_review_applications());
        assert!(!Role::Citizen.can_review_applications());
    }
}
