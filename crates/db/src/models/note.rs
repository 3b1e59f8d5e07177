use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use notes_core::types::{DbId, Timestamp};

/// A row from the `notes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// Validated title/content pair written on create and update.
///
/// `id` and `created_at` are owned by the database and never appear here.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}
