//! The list of notes currently shown to the user.
//!
//! The server owns every note; this list only mirrors what the client has
//! seen and splices in the results of its own create/edit/delete calls.

use crate::error::{CoreError, Result};
use crate::types::{Note, NoteDraft, NoteId};

/// Locally displayed notes, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteList {
    notes: Vec<Note>,
}

impl NoteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a fresh server listing
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Insert a newly created note at the top.
    ///
    /// Concurrent creates land in completion order, not submission order.
    pub fn prepend(&mut self, note: Note) {
        self.notes.insert(0, note);
    }

    /// Splice an accepted edit into the matching entry
    pub fn apply_edit(&mut self, id: &NoteId, draft: &NoteDraft) -> Result<&Note> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| CoreError::NoteNotFound(id.to_string()))?;
        note.title.clone_from(&draft.title);
        note.content.clone_from(&draft.content);
        Ok(note)
    }

    /// Drop a deleted note, returning it if it was present
    pub fn remove(&mut self, id: &NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|n| &n.id == id)?;
        Some(self.notes.remove(index))
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }
}
