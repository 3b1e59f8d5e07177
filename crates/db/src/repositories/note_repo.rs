//! Repository for the `notes` table.

use sqlx::PgPool;
use notes_core::types::DbId;

use crate::models::note::{Note, NoteDraft};

/// Column list for notes queries.
const COLUMNS: &str = "id, title, content, created_at";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note, returning the row with its assigned id and timestamp.
    pub async fn create(pool: &PgPool, input: &NoteDraft) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (title, content)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// List every note, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Note>(&query).fetch_all(pool).await
    }

    /// Replace the title and content of a note, returning the updated row.
    ///
    /// Returns `None` when no note has the given id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NoteDraft,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET title = $2, content = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note. Returns `false` when no note has the given id.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
