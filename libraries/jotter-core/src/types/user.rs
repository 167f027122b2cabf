/// User domain type
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// Identity of the signed-in account.
///
/// Fetched from the server and never edited locally; a re-fetch replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    #[serde(alias = "_id")]
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Date of birth as sent by the server (ISO date)
    pub dob: String,

    /// Email address the one-time codes are sent to
    pub email: String,
}
