//! Repository for the `applications` table and its joined read models.

use egram_core::application_status::ApplicationStatus;
use egram_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::{
    Application, ApplicationWithService, CreateApplication, ReviewApplication, StaffActivity,
    StatusTransition,
};

const COLUMNS: &str =
    "id, user_id, service_id, status_id, notes, documents, processed_by, created_at, updated_at";

/// Application columns qualified with `a.`, plus the joined service fields.
const WITH_SERVICE_COLUMNS: &str = "a.id, a.user_id, a.service_id, a.status_id, a.notes, \
     a.documents, a.processed_by, a.created_at, a.updated_at, \
     s.name AS service_name, s.description AS service_description, \
     s.fee AS service_fee, s.processing_time AS service_processing_time";

const REVIEW_COLUMNS: &str = "a.id, a.user_id, a.service_id, a.status_id, a.notes, \
     a.documents, a.processed_by, a.created_at, a.updated_at, \
     s.name AS service_name, p.name AS applicant_name, p.email AS applicant_email";

/// Provides CRUD operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application in `pending` status.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications (user_id, service_id, status_id, notes, documents)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(input.user_id)
            .bind(input.service_id)
            .bind(ApplicationStatus::Pending.id())
            .bind(&input.notes)
            .bind(&input.documents)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find one of a user's own applications, joined with its service.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ApplicationWithService>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_SERVICE_COLUMNS}
             FROM applications a
             JOIN services s ON s.id = a.service_id
             WHERE a.id = $1 AND a.user_id = $2"
        );
        sqlx::query_as::<_, ApplicationWithService>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// A user's applications, newest first, optionally capped at `limit`.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<ApplicationWithService>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_SERVICE_COLUMNS}
             FROM applications a
             JOIN services s ON s.id = a.service_id
             WHERE a.user_id = $1
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ApplicationWithService>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Every application with service and applicant, newest first.
    pub async fn list_for_review(pool: &PgPool) -> Result<Vec<ReviewApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {REVIEW_COLUMNS}
             FROM applications a
             JOIN services s ON s.id = a.service_id
             JOIN profiles p ON p.id = a.user_id
             ORDER BY a.created_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, ReviewApplication>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_for_review(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReviewApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {REVIEW_COLUMNS}
             FROM applications a
             JOIN services s ON s.id = a.service_id
             JOIN profiles p ON p.id = a.user_id
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, ReviewApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a status change if the row still has the expected status.
    ///
    /// Returns `None` when the row is gone or another reviewer has already
    /// moved it.
    pub async fn transition(
        pool: &PgPool,
        input: &StatusTransition,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET
                status_id = $3,
                notes = COALESCE($4, notes),
                processed_by = $5
             WHERE id = $1 AND status_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(input.id)
            .bind(input.expected.id())
            .bind(input.next.id())
            .bind(&input.notes)
            .bind(input.processed_by)
            .fetch_optional(pool)
            .await
    }

    /// Applications a staff member has acted on, most recently updated first.
    pub async fn list_processed(pool: &PgPool) -> Result<Vec<StaffActivity>, sqlx::Error> {
        sqlx::query_as::<_, StaffActivity>(
            "SELECT a.id, a.status_id, s.name AS service_name, p.name AS applicant_name,
                    a.processed_by, COALESCE(staff.name, 'Unknown') AS staff_name, a.updated_at
             FROM applications a
             JOIN services s ON s.id = a.service_id
             JOIN profiles p ON p.id = a.user_id
             LEFT JOIN profiles staff ON staff.id = a.processed_by
             WHERE a.processed_by IS NOT NULL
             ORDER BY a.updated_at DESC, a.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Number of applications currently in `status`.
    pub async fn count_with_status(
        pool: &PgPool,
        status: ApplicationStatus,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE status_id = $1")
                .bind(status.id())
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
