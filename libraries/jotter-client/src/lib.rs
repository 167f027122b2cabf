//! Jotter Client
//!
//! HTTP client library for the Jotter notes API.
//!
//! # Features
//!
//! - **Authentication**: sign-up and sign-in with emailed one-time codes
//! - **Session refresh**: a 401 triggers one coordinated refresh and replay
//! - **Session context**: the signed-in user, shared across views
//! - **Notes**: create, list, update and delete
//!
//! The session credential is an HttpOnly cookie held by the transport; no
//! call in this crate reads or attaches it.
//!
//! # Example
//!
//! ```ignore
//! use jotter_client::{ClientConfig, JotterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JotterClient::new(ClientConfig::new("https://notes.example.com/api"))?;
//!
//!     let session = client.session().initialize().await;
//!     println!("Guard: {}", session.guard().label());
//!
//!     let notes = client.notes().list().await?;
//!     println!("Found {} notes", notes.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod http;
mod interceptor;
mod notes;
mod session;
mod types;

// Re-export main types
pub use client::JotterClient;
pub use error::{ClientError, Result};
pub use http::{ApiRequest, HttpClient, Transport};
pub use interceptor::{SessionEvent, SessionInterceptor, IDENTITY_PATH, REFRESH_PATH};
pub use session::SessionContext;
pub use types::{AuthAck, ClientConfig, GoogleAuthUrl, OtpVerification};

// Re-export sub-clients for direct use if needed
pub use auth::AuthApi;
pub use notes::NotesApi;
