//! Postgres storage
//!
//! Notes are documents in the `notes` table

use chrono::Utc;
use uuid::Uuid;

use crate::notes::Note;

use super::ConnectionHandle;
use super::CreateNoteValues;
use super::Error;
use super::Result;
use super::Storage;
use super::UpdateNoteValues;
use super::parse_id;

/// Postgres storage
#[derive(Clone, Debug)]
pub struct Postgres {
    /// Connection, possibly not established yet
    connection: ConnectionHandle,
}

impl Postgres {
    /// Create Postgres storage on top of a (future) connection
    pub fn new(connection: ConnectionHandle) -> Self {
        Self { connection }
    }
}

impl Storage for Postgres {
    async fn find_all_notes(&self) -> Result<Vec<Note>> {
        let pool = self.connection.pool()?;

        let notes = sqlx::query_as::<_, Note>(
            r"
            SELECT id, title, content, created_at, updated_at
            FROM notes
            ORDER BY created_at ASC
            ",
        )
        .fetch_all(pool)
        .await
        .map_err(connection_error)?;

        Ok(notes)
    }

    async fn find_single_note_by_id(&self, id: &str) -> Result<Option<Note>> {
        let pool = self.connection.pool()?;
        let id = parse_id(id)?;

        let note = sqlx::query_as::<_, Note>(
            r"
            SELECT id, title, content, created_at, updated_at
            FROM notes
            WHERE id = $1
            LIMIT 1
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(connection_error)?;

        Ok(note)
    }

    async fn create_note(&self, values: &CreateNoteValues<'_>) -> Result<Note> {
        let pool = self.connection.pool()?;
        let now = Utc::now();

        let note = sqlx::query_as::<_, Note>(
            r"
            INSERT INTO notes (id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, title, content, created_at, updated_at
            ",
        )
        .bind(Uuid::new_v4())
        .bind(values.title)
        .bind(values.content)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(connection_error)?;

        Ok(note)
    }

    async fn update_note(&self, id: &str, values: &UpdateNoteValues<'_>) -> Result<Option<Note>> {
        let pool = self.connection.pool()?;
        let id = parse_id(id)?;

        // `updated_at` strictly increases
        let note = sqlx::query_as::<_, Note>(
            r"
            UPDATE notes
            SET title = $1,
                content = $2,
                updated_at = GREATEST($3, updated_at + INTERVAL '1 microsecond')
            WHERE id = $4
            RETURNING id, title, content, created_at, updated_at
            ",
        )
        .bind(values.title)
        .bind(values.content)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(connection_error)?;

        Ok(note)
    }

    async fn delete_note(&self, id: &str) -> Result<Option<Note>> {
        let pool = self.connection.pool()?;
        let id = parse_id(id)?;

        let note = sqlx::query_as::<_, Note>(
            r"
            DELETE FROM notes
            WHERE id = $1
            RETURNING id, title, content, created_at, updated_at
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(connection_error)?;

        Ok(note)
    }
}

/// Convert `SQLx` to storage connection error
fn connection_error(err: sqlx::Error) -> Error {
    Error::Connection(err.to_string())
}
