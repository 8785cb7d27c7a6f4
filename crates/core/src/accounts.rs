//! Account input DTOs and their validation rules.
//!
//! Messages are the ones shown to the user verbatim.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

pub const DUPLICATE_EMAIL: &str = "An account with this email already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpInput {
    #[validate(length(min = 1, message = "Please enter your name"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Please enter your email"),
        email(message = "Please enter a valid email")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInInput {
    #[validate(length(min = 1, message = "Please enter your email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter your password"))]
    pub password: String,
}

/// Self-service profile fields. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileUpdateInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl SignUpInput {
    /// Trim the name and lower-case the email, then validate.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let input = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password,
        };
        validate_input(&input)?;
        Ok(input)
    }
}

impl SignInInput {
    pub fn normalized(self) -> Result<Self, CoreError> {
        let input = Self {
            email: self.email.trim().to_lowercase(),
            password: self.password,
        };
        validate_input(&input)?;
        Ok(input)
    }
}

impl ProfileUpdateInput {
    pub fn normalized(self) -> Result<Self, CoreError> {
        let input = Self {
            name: self.name.map(|n| n.trim().to_string()),
            phone: self.phone.map(|p| p.trim().to_string()),
            address: self.address.map(|a| a.trim().to_string()),
        };
        validate_input(&input)?;
        Ok(input)
    }
}

/// Run the derived validation and flatten the first message of each field
/// into a `CoreError::Validation`, in field-name order.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(flatten(&errors)))
}

fn flatten(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn sign_up(name: &str, email: &str, password: &str) -> SignUpInput {
        SignUpInput {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn valid_sign_up_is_normalized() {
        let input = sign_up("  Asha ", " Asha@Example.com ", "secret1")
            .normalized()
            .unwrap();
        assert_eq!(input.name, "Asha");
        assert_eq!(input.email, "asha@example.com");
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = sign_up("   ", "a@b.com", "secret1").normalized().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Please enter your name");
    }

    #[test]
    fn short_password_is_rejected() {
        let err = sign_up("Asha", "a@b.com", "12345").normalized().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Password must be at least 6 characters long");
    }

    #[test]
    fn malformed_email_is_rejected() {
        let err = sign_up("Asha", "not-an-email", "secret1")
            .normalized()
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("valid email"));
    }

    #[test]
    fn sign_in_requires_password() {
        let err = SignInInput {
            email: "a@b.com".into(),
            password: String::new(),
        }
        .normalized()
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Please enter your password");
    }

    #[test]
    fn profile_update_rejects_blank_name_but_allows_absent() {
        let err = ProfileUpdateInput {
            name: Some("  ".into()),
            ..Default::default()
        }
        .normalized()
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Name is required");

        let ok = ProfileUpdateInput {
            phone: Some(" 98765 ".into()),
            ..Default::default()
        }
        .normalized()
        .unwrap();
        assert_eq!(ok.phone.as_deref(), Some("98765"));
        assert!(ok.name.is_none());
    }
}
