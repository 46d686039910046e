//! Notes, the only entity of the service

use core::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

/// Maximum length of a title, in UTF-16 code units
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length of the content, in UTF-16 code units
pub const MAX_CONTENT_LENGTH: usize = 1000;

/// A persisted note
///
/// `id`, `created_at` and `updated_at` are assigned by the storage
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reasons a title/content pair is refused
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Title or content is absent or falsy (`null`, `false`, `0`, `""`)
    MissingFields,

    /// Title or content is longer than allowed
    LengthExceeded,

    /// Title or content is an object or array, which has no text form
    NotText,
}

impl std::error::Error for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::MissingFields => write!(f, "Title and content are required."),
            ValidationError::LengthExceeded => write!(
                f,
                "Title and content should be within specified length limits."
            ),
            ValidationError::NotText => write!(f, "Title and content can not be cast to text."),
        }
    }
}

/// Validated title and content of a note
#[derive(Debug, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
}

/// Validate the fields of a note about to be created
///
/// Presence is checked first, then length, then the conversion to text
pub fn validate_new_note(
    title: Option<&Value>,
    content: Option<&Value>,
) -> Result<NoteFields, ValidationError> {
    let (title, content) = require_fields(title, content)?;

    if exceeds_length(title, MAX_TITLE_LENGTH) || exceeds_length(content, MAX_CONTENT_LENGTH) {
        return Err(ValidationError::LengthExceeded);
    }

    into_fields(title, content)
}

/// Validate the fields of a note update
///
/// Lengths are not checked on update
pub fn validate_note_update(
    title: Option<&Value>,
    content: Option<&Value>,
) -> Result<NoteFields, ValidationError> {
    let (title, content) = require_fields(title, content)?;

    into_fields(title, content)
}

fn require_fields<'a>(
    title: Option<&'a Value>,
    content: Option<&'a Value>,
) -> Result<(&'a Value, &'a Value), ValidationError> {
    match (title, content) {
        (Some(title), Some(content)) if is_truthy(title) && is_truthy(content) => {
            Ok((title, content))
        }
        _ => Err(ValidationError::MissingFields),
    }
}

/// Truthiness as the clients of this service see it
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Only values with a length are limited: strings and arrays
fn exceeds_length(value: &Value, max: usize) -> bool {
    match value {
        Value::String(text) => text_length(text) > max,
        Value::Array(items) => items.len() > max,
        _ => false,
    }
}

fn into_fields(title: &Value, content: &Value) -> Result<NoteFields, ValidationError> {
    Ok(NoteFields {
        title: into_text(title)?,
        content: into_text(content)?,
    })
}

/// Cast a scalar to its text form
fn into_text(value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(value) => Ok(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(ValidationError::NotText),
    }
}

/// Length as counted by the clients of this service (UTF-16 code units)
fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}
