pub mod admin;
pub mod applications;
pub mod auth;
pub mod dashboard;
pub mod notifications;
pub mod profile;
pub mod review;
pub mod services;
