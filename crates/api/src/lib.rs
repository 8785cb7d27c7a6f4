//! E-Gram Panchayat API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! connectivity monitor, request cache) so integration tests and the binary
//! entrypoint can both access them.

pub mod auth;
pub mod background;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod connectivity;
pub mod delete_confirm;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
