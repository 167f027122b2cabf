/// Note domain types
use crate::error::{CoreError, Result};
use crate::types::NoteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A personal text note, owned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique note identifier
    #[serde(alias = "_id")]
    pub id: NoteId,

    /// Note title
    pub title: String,

    /// Note body
    pub content: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Title and content submitted when creating or editing a note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    /// Create a new draft
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Reject drafts with a blank title or blank content
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("title", "title cannot be empty"));
        }
        if self.content.trim().is_empty() {
            return Err(CoreError::validation("content", "content cannot be empty"));
        }
        Ok(())
    }
}
