//! Request extractors for authentication, authorization, and the
//! connectivity gate.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token (optional form too).
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireReviewer`] -- requires a role that reviews applications.
//! - [`connectivity::RequireConnected`] -- refuses mutations while the store is unreachable.

pub mod auth;
pub mod connectivity;
pub mod rbac;
