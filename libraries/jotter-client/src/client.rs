//! Main Jotter client.

use crate::auth::AuthApi;
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use crate::interceptor::{SessionEvent, SessionInterceptor};
use crate::notes::NotesApi;
use crate::session::SessionContext;
use crate::types::{ClientConfig, OtpVerification};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Main client for the notes API.
///
/// Owns the cookie-carrying transport, the refresh interceptor every call
/// goes through, and the session context.
///
/// # Example
///
/// ```ignore
/// use jotter_client::{ClientConfig, JotterClient, OtpVerification};
///
/// let client = JotterClient::new(ClientConfig::new("http://localhost:5000"))?;
/// client.session().initialize().await;
///
/// client.auth().signin("ada@example.com").await?;
/// if let OtpVerification::Verified(user) = client.verify_and_login("ada@example.com", "123456").await? {
///     println!("Hello {}", user.name);
/// }
///
/// for note in client.notes().list().await? {
///     println!("{}: {}", note.id, note.title);
/// }
/// ```
pub struct JotterClient {
    api: Arc<SessionInterceptor>,
    session: SessionContext,
}

impl JotterClient {
    /// Create a client talking HTTP to `config.url`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self::with_transport(Arc::new(http)))
    }

    /// Create a client over any transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        let api = Arc::new(SessionInterceptor::new(transport));
        let session = SessionContext::new(api.clone());
        Self { api, session }
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.api)
    }

    pub fn notes(&self) -> NotesApi<'_> {
        NotesApi::new(&self.api)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn interceptor(&self) -> &SessionInterceptor {
        &self.api
    }

    /// Session lifecycle signals (e.g. expiry) from the interceptor.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.api.subscribe()
    }

    /// Verify a code and, when accepted, record the user in the session.
    pub async fn verify_and_login(&self, email: &str, otp: &str) -> Result<OtpVerification> {
        let outcome = self.auth().verify_otp(email, otp).await?;
        if let OtpVerification::Verified(user) = &outcome {
            self.session.login(user.clone());
        }
        Ok(outcome)
    }
}
