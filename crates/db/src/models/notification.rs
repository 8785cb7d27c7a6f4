//! Notification entity model and DTOs.

use egram_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

pub struct CreateNotification {
    pub user_id: DbId,
    pub title: String,
    pub message: String,
}

impl CreateNotification {
    pub fn from_notice(user_id: DbId, notice: egram_core::notices::NoticeText) -> Self {
        Self {
            user_id,
            title: notice.title,
            message: notice.message,
        }
    }
}
