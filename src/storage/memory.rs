//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::sync::Arc;

use chrono::TimeDelta;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::notes::Note;

use super::CreateNoteValues;
use super::Result;
use super::Storage;
use super::UpdateNoteValues;
use super::parse_id;

/// An in-memory storage
///
/// Always available, there is no connection to wait for
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All notes in storage, in insertion order
    notes: Arc<Mutex<Vec<Note>>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for Memory {
    async fn find_all_notes(&self) -> Result<Vec<Note>> {
        Ok(self.notes.lock().await.clone())
    }

    async fn find_single_note_by_id(&self, id: &str) -> Result<Option<Note>> {
        let id = parse_id(id)?;

        Ok(self
            .notes
            .lock()
            .await
            .iter()
            .find(|note| note.id == id)
            .cloned())
    }

    async fn create_note(&self, values: &CreateNoteValues<'_>) -> Result<Note> {
        let now = Utc::now();

        let note = Note {
            id: Uuid::new_v4(),
            title: values.title.to_string(),
            content: values.content.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.notes.lock().await.push(note.clone());

        Ok(note)
    }

    async fn update_note(&self, id: &str, values: &UpdateNoteValues<'_>) -> Result<Option<Note>> {
        let id = parse_id(id)?;

        let mut notes = self.notes.lock().await;

        Ok(notes.iter_mut().find(|note| note.id == id).map(|note| {
            note.title = values.title.to_string();
            note.content = values.content.to_string();
            note.updated_at = Utc::now().max(note.updated_at + TimeDelta::nanoseconds(1));

            note.clone()
        }))
    }

    async fn delete_note(&self, id: &str) -> Result<Option<Note>> {
        let id = parse_id(id)?;

        let mut notes = self.notes.lock().await;
        let index = notes.iter().position(|note| note.id == id);

        Ok(index.map(|index| notes.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_lifecycle() {
        let storage = Memory::new();

        let values = CreateNoteValues {
            title: "A",
            content: "B",
        };
        let note = storage.create_note(&values).await.unwrap();
        assert_eq!(note.created_at, note.updated_at);

        let id = note.id.to_string();
        let found = storage.find_single_note_by_id(&id).await.unwrap();
        assert_eq!(Some(note.clone()), found);

        let values = UpdateNoteValues {
            title: "A2",
            content: "B2",
        };
        let updated = storage.update_note(&id, &values).await.unwrap().unwrap();
        assert_eq!("A2", updated.title);
        assert_eq!(note.created_at, updated.created_at);
        assert!(updated.updated_at > note.updated_at);

        let deleted = storage.delete_note(&id).await.unwrap();
        assert_eq!(Some(updated), deleted);

        assert_eq!(None, storage.find_single_note_by_id(&id).await.unwrap());
        assert_eq!(None, storage.delete_note(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_lists_in_insertion_order() {
        let storage = Memory::new();

        for title in ["one", "two", "three"] {
            let values = CreateNoteValues {
                title,
                content: "content",
            };
            storage.create_note(&values).await.unwrap();
        }

        let titles = storage
            .find_all_notes()
            .await
            .unwrap()
            .into_iter()
            .map(|note| note.title)
            .collect::<Vec<String>>();
        assert_eq!(vec!["one", "two", "three"], titles);

        // updates keep the position
        let second = storage.find_all_notes().await.unwrap()[1].id.to_string();
        let values = UpdateNoteValues {
            title: "two again",
            content: "content",
        };
        storage.update_note(&second, &values).await.unwrap();

        let titles = storage
            .find_all_notes()
            .await
            .unwrap()
            .into_iter()
            .map(|note| note.title)
            .collect::<Vec<String>>();
        assert_eq!(vec!["one", "two again", "three"], titles);
    }
}
