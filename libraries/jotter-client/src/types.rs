//! Types for Jotter API requests and responses.

use crate::error::{ClientError, Result};
use jotter_core::{Note, User};
use serde::{Deserialize, Serialize};

/// Configuration for connecting to a notes backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://notes.example.com/api")
    pub url: String,

    /// User-Agent header; `Jotter/<version>` when unset
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_agent: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Check the URL without building a client
    pub fn validate(&self) -> Result<()> {
        self.normalized_url().map(|_| ())
    }

    /// Validate the URL and strip trailing slashes
    pub fn normalized_url(&self) -> Result<String> {
        let trimmed = self.url.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let parsed =
            url::Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        Ok(trimmed.trim_end_matches('/').to_string())
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("Jotter/{}", env!("CARGO_PKG_VERSION")))
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub name: &'a str,
    pub dob: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SigninRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyOtpRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

/// Acknowledgement returned by signup, signin and logout.
///
/// `success: false` is an expected business outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyOtpResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of submitting a one-time code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpVerification {
    /// Code accepted; the server has set the session cookie
    Verified(User),
    /// Wrong or expired code, with a message fit to show inline
    Rejected(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeResponse {
    pub user: User,
}

/// Google OAuth entry point.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAuthUrl {
    #[serde(default)]
    pub success: bool,
    pub auth_url: String,
}

// =============================================================================
// Note Types
// =============================================================================

/// `{ "note": {...} }` or a bare note
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum NoteEnvelope {
    Wrapped { note: Note },
    Bare(Note),
}

impl NoteEnvelope {
    pub fn into_note(self) -> Note {
        match self {
            NoteEnvelope::Wrapped { note } | NoteEnvelope::Bare(note) => note,
        }
    }
}

/// `{ "notes": [...] }` or a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum NotesEnvelope {
    Wrapped { notes: Vec<Note> },
    Bare(Vec<Note>),
}

impl NotesEnvelope {
    pub fn into_notes(self) -> Vec<Note> {
        match self {
            NotesEnvelope::Wrapped { notes } | NotesEnvelope::Bare(notes) => notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        assert!(ClientConfig::new("https://example.com").normalized_url().is_ok());
        assert!(ClientConfig::new("http://localhost:8080").normalized_url().is_ok());

        assert!(ClientConfig::new("").normalized_url().is_err());
        assert!(ClientConfig::new("not-a-url").normalized_url().is_err());
        assert!(ClientConfig::new("ftp://example.com").normalized_url().is_err());
    }

    #[test]
    fn test_url_normalization() {
        let url = ClientConfig::new("https://example.com/api///")
            .normalized_url()
            .unwrap();
        assert_eq!(url, "https://example.com/api");
    }

    #[test]
    fn test_user_agent() {
        let config = ClientConfig::new("https://example.com");
        assert!(config.validate().is_ok());
        assert!(config.user_agent().starts_with("Jotter/"));
        assert_eq!(config.with_user_agent("notes-bot/1").user_agent(), "notes-bot/1");
    }

    #[test]
    fn test_auth_ack_defaults() {
        let ack: AuthAck = serde_json::from_str("{}").unwrap();
        assert!(!ack.success);
        assert!(ack.message.is_none());
    }

    #[test]
    fn test_notes_envelope_shapes() {
        let note = serde_json::json!({
            "_id": "n1",
            "title": "t",
            "content": "c",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });

        let wrapped: NotesEnvelope =
            serde_json::from_value(serde_json::json!({ "notes": [note.clone()] })).unwrap();
        assert_eq!(wrapped.into_notes().len(), 1);

        let bare: NotesEnvelope = serde_json::from_value(serde_json::json!([note.clone()])).unwrap();
        assert_eq!(bare.into_notes().len(), 1);

        let single: NoteEnvelope = serde_json::from_value(note).unwrap();
        assert_eq!(single.into_note().id.as_str(), "n1");
    }
}
