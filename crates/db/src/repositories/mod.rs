//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod service_repo;
pub mod session_repo;

pub use application_repo::ApplicationRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;
pub use service_repo::ServiceRepo;
pub use session_repo::SessionRepo;
