//! Transparent recovery from an expired session.
//!
//! Every API call goes through [`SessionInterceptor::execute`]. When the
//! server answers 401, the interceptor refreshes the session cookie once and
//! replays the original request. Only one refresh may be in flight at a
//! time; a request that hits 401 while another refresh is running fails
//! straight away and is not queued or replayed later.

use crate::error::{ClientError, Result};
use crate::http::{ApiRequest, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Endpoint that exchanges the refresh cookie for a new session cookie
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Endpoint that returns the signed-in user
pub const IDENTITY_PATH: &str = "/auth/me";

const EVENT_CAPACITY: usize = 16;

/// Session lifecycle signals for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The refresh call failed; the user has to sign in again
    Expired,
}

/// Wraps a [`Transport`] with the 401 refresh-and-replay policy.
pub struct SessionInterceptor {
    transport: Arc<dyn Transport>,
    refreshing: AtomicBool,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionInterceptor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            transport,
            refreshing: AtomicBool::new(false),
            events,
        }
    }

    /// Receive [`SessionEvent`]s published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn refresh_in_progress(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    /// Send `request`, refreshing the session and replaying at most once on 401.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<Value> {
        loop {
            let err = match self.transport.send(&request).await {
                Ok(body) => return Ok(body),
                Err(err) => err,
            };
            self.recover(&mut request, err).await?;
            debug!(request = %request, "Replaying request after session refresh");
        }
    }

    /// [`execute`](Self::execute) and decode the body into `T`.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let label = request.to_string();
        let body = self.execute(request).await?;
        serde_json::from_value(body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse {} response: {}", label, e)))
    }

    /// Decide what to do with a failed response.
    ///
    /// `Ok(())` means the session was refreshed and `request` should be
    /// replayed; `Err` is the error to hand back to the caller.
    async fn recover(&self, request: &mut ApiRequest, err: ClientError) -> Result<()> {
        if !err.is_unauthorized() || is_session_endpoint(&request.path) || request.retried {
            return Err(err);
        }

        let Some(guard) = RefreshGuard::acquire(&self.refreshing) else {
            warn!(request = %request, "Session refresh already in progress, failing request");
            return Err(err);
        };

        request.retried = true;
        info!(request = %request, "Session expired, refreshing");

        let outcome = self.transport.send(&ApiRequest::post(REFRESH_PATH)).await;
        drop(guard);

        match outcome {
            Ok(_) => {
                info!("Session refresh successful");
                Ok(())
            }
            Err(refresh_err) => {
                warn!(error = %refresh_err, "Session refresh failed, sign-in required");
                // No subscribers is fine: nobody is showing a sign-in screen
                let _ = self.events.send(SessionEvent::Expired);
                Err(refresh_err)
            }
        }
    }
}

/// Refresh and identity calls are the credential check itself; retrying
/// them on 401 would recurse forever.
fn is_session_endpoint(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    path == REFRESH_PATH || path == IDENTITY_PATH
}

/// Holds the single-flight flag; released on drop, including when the
/// refreshing future is cancelled.
struct RefreshGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RefreshGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
