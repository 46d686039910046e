//! Notes API endpoints

use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::notes::Note;
use crate::notes::ValidationError;
use crate::notes::validate_new_note;
use crate::notes::validate_note_update;
use crate::storage::CreateNoteValues;
use crate::storage::Storage;
use crate::storage::UpdateNoteValues;

use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;

/// Note response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoteResponse {
    fn from_note(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }

    fn from_note_multiple(notes: Vec<Note>) -> Vec<Self> {
        notes.into_iter().map(Self::from_note).collect::<Vec<Self>>()
    }
}

/// Title and content as sent by the user
///
/// Kept as raw JSON, presence and the cast to text are part of the validation
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteForm {
    title: Option<Value>,
    content: Option<Value>,
}

/// List all notes
///
/// Request:
/// ```sh
/// curl http://localhost:3000/notes
/// ```
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    let notes = storage
        .find_all_notes()
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(NoteResponse::from_note_multiple(notes)))
}

/// Get a single note
///
/// Request:
/// ```sh
/// curl http://localhost:3000/notes/:id
/// ```
pub async fn single<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(note_id): PathParameters<String>,
) -> Result<Success<NoteResponse>, Error> {
    storage
        .find_single_note_by_id(&note_id)
        .await
        .map_err(Error::internal_server_error)?
        .map_or_else(not_found, |note| Ok(Success::ok(NoteResponse::from_note(note))))
}

/// Create a note
///
/// Request:
/// ```sh
/// curl -X POST http://localhost:3000/notes \
///   -H 'Content-Type: application/json' \
///   -d '{ "title": "Groceries", "content": "Milk, eggs" }'
/// ```
pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<NoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let fields = validate_new_note(form.title.as_ref(), form.content.as_ref())
        .map_err(validation_error)?;

    let values = CreateNoteValues {
        title: &fields.title,
        content: &fields.content,
    };

    let note = storage
        .create_note(&values)
        .await
        .map_err(Error::internal_server_error)?;

    tracing::debug!("Created note {}", note.id);

    Ok(Success::created(NoteResponse::from_note(note)))
}

/// Update a note
///
/// Title and content are both replaced, their lengths are not checked
///
/// Request:
/// ```sh
/// curl -X PUT http://localhost:3000/notes/:id \
///   -H 'Content-Type: application/json' \
///   -d '{ "title": "Groceries", "content": "Milk, eggs, bread" }'
/// ```
pub async fn update<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(note_id): PathParameters<String>,
    Form(form): Form<NoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let fields = validate_note_update(form.title.as_ref(), form.content.as_ref())
        .map_err(validation_error)?;

    let values = UpdateNoteValues {
        title: &fields.title,
        content: &fields.content,
    };

    storage
        .update_note(&note_id, &values)
        .await
        .map_err(Error::internal_server_error)?
        .map_or_else(not_found, |note| Ok(Success::ok(NoteResponse::from_note(note))))
}

/// Delete a note
///
/// Responds with the note as it was before deletion
///
/// Request:
/// ```sh
/// curl -X DELETE http://localhost:3000/notes/:id
/// ```
pub async fn delete<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(note_id): PathParameters<String>,
) -> Result<Success<NoteResponse>, Error> {
    let note = storage
        .delete_note(&note_id)
        .await
        .map_err(Error::internal_server_error)?;

    match note {
        Some(note) => {
            tracing::debug!("Deleted note {}", note.id);

            Ok(Success::ok(NoteResponse::from_note(note)))
        }
        None => not_found(),
    }
}

/// Values without a text form fail like a storage cast would, with a 500
fn validation_error(err: ValidationError) -> Error {
    match err {
        ValidationError::NotText => Error::internal_server_error(err),
        ValidationError::MissingFields | ValidationError::LengthExceeded => {
            Error::bad_request(err)
        }
    }
}

fn not_found<V: Serialize>() -> Result<Success<V>, Error> {
    Err(Error::not_found("Note not found"))
}
