//! All things related to the storage of notes

use core::fmt;
use std::future::Future;

use crate::notes::Note;

pub use connection::ConnectionHandle;
pub use connection::connect_with_retry;
#[cfg(test)]
pub use memory::Memory;
pub use postgres::Postgres;

mod connection;
#[cfg(test)]
mod memory;
mod postgres;

/// Setup the storage
///
/// The connection to the document store is made in the background, the
/// storage is usable right away but fails until that connection is ready
pub fn setup(database_url: String) -> Postgres {
    let connection = ConnectionHandle::new();

    connect_with_retry(connection.clone(), database_url);

    Postgres::new(connection)
}

/// Storage errors
#[derive(Debug)]
pub enum Error {
    /// No connection with the storage has been made (yet)
    Unavailable,

    /// A connection error with the storage
    Connection(String),

    /// The given ID is not a valid identifier for the storage
    MalformedId(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unavailable => write!(f, "Storage is not connected"),
            Error::Connection(error) => write!(f, "Connection error: {error}"),
            Error::MalformedId(id) => write!(f, "Malformed ID: {id}"),
        }
    }
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Values to create a Note
pub struct CreateNoteValues<'a> {
    /// Title of the note
    pub title: &'a str,

    /// Content of the note
    pub content: &'a str,
}

/// Values to update a Note
///
/// Both fields are replaced, `updated_at` is bumped by the storage
pub struct UpdateNoteValues<'a> {
    /// New title of the note
    pub title: &'a str,

    /// New content of the note
    pub content: &'a str,
}

/// Storage with all supported operations
///
/// Every operation is a single round-trip to the storage, IDs are passed as
/// received and parsed by the storage itself
pub trait Storage: Clone + Send + Sync + 'static {
    /// Find all notes, oldest first
    fn find_all_notes(&self) -> impl Future<Output = Result<Vec<Note>>> + Send;

    /// Find a single note by its ID
    fn find_single_note_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Note>>> + Send;

    /// Create a note
    fn create_note(
        &self,
        values: &CreateNoteValues<'_>,
    ) -> impl Future<Output = Result<Note>> + Send;

    /// Update a note, `None` when there is no note with this ID
    fn update_note(
        &self,
        id: &str,
        values: &UpdateNoteValues<'_>,
    ) -> impl Future<Output = Result<Option<Note>>> + Send;

    /// Delete a note, returns the note as it was before deletion
    fn delete_note(&self, id: &str) -> impl Future<Output = Result<Option<Note>>> + Send;
}

/// Parse an ID as given by the client into a storage ID
fn parse_id(id: &str) -> Result<uuid::Uuid> {
    uuid::Uuid::parse_str(id).map_err(|_| Error::MalformedId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(id, parse_id(&id.to_string()).unwrap());

        assert!(matches!(parse_id("some-id"), Err(Error::MalformedId(_))));
        assert!(matches!(parse_id(""), Err(Error::MalformedId(_))));
    }
}
