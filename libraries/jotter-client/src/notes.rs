//! Note CRUD operations.

use crate::error::{ClientError, Result};
use crate::http::ApiRequest;
use crate::interceptor::SessionInterceptor;
use crate::types::{NoteEnvelope, NotesEnvelope};
use jotter_core::{validation, Note, NoteDraft, NoteId};
use tracing::debug;

/// Notes client for the signed-in user.
pub struct NotesApi<'a> {
    api: &'a SessionInterceptor,
}

impl<'a> NotesApi<'a> {
    pub(crate) fn new(api: &'a SessionInterceptor) -> Self {
        Self { api }
    }

    /// List every note of the signed-in user.
    pub async fn list(&self) -> Result<Vec<Note>> {
        let envelope: NotesEnvelope = self.api.execute_json(ApiRequest::get("/notes")).await?;
        let notes = envelope.into_notes();
        debug!(count = notes.len(), "Fetched notes");
        Ok(notes)
    }

    pub async fn create(&self, draft: &NoteDraft) -> Result<Note> {
        draft.validate()?;
        let envelope: NoteEnvelope = self
            .api
            .execute_json(ApiRequest::post_json("/notes", draft_body(draft)?))
            .await?;
        let note = envelope.into_note();
        debug!(note_id = %note.id, "Created note");
        Ok(note)
    }

    pub async fn update(&self, id: &NoteId, draft: &NoteDraft) -> Result<Note> {
        draft.validate()?;
        let envelope: NoteEnvelope = self
            .api
            .execute_json(ApiRequest::put_json(note_path(id)?, draft_body(draft)?))
            .await?;
        debug!(note_id = %id, "Updated note");
        Ok(envelope.into_note())
    }

    pub async fn delete(&self, id: &NoteId) -> Result<()> {
        self.api.execute(ApiRequest::delete(note_path(id)?)).await?;
        debug!(note_id = %id, "Deleted note");
        Ok(())
    }
}

/// `/notes/<id>` with the id escaped as a single segment
fn note_path(id: &NoteId) -> Result<String> {
    validation::validate_note_id(id.as_str())?;
    Ok(format!("/notes/{}", urlencoding::encode(id.as_str())))
}

fn draft_body(draft: &NoteDraft) -> Result<serde_json::Value> {
    serde_json::to_value(draft).map_err(|e| ClientError::ParseError(e.to_string()))
}
