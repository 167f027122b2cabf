//! Process-wide session state.
//!
//! One [`SessionContext`] exists per client. It starts loading, resolves
//! once from `/auth/me`, and afterwards only changes through `login`,
//! `logout` or an expired-session signal.

use crate::auth::AuthApi;
use crate::interceptor::{SessionEvent, SessionInterceptor};
use jotter_core::{GuardState, Session, User};
use std::sync::Arc;
use tokio::sync::{watch, OnceCell};
use tracing::{info, warn};

/// Holder of the current user identity, shared with every view.
pub struct SessionContext {
    api: Arc<SessionInterceptor>,
    state: watch::Sender<Session>,
    initialized: OnceCell<()>,
}

impl SessionContext {
    pub fn new(api: Arc<SessionInterceptor>) -> Self {
        Self {
            api,
            state: watch::Sender::new(Session::initial()),
            initialized: OnceCell::new(),
        }
    }

    /// Resolve the session from the server.
    ///
    /// Runs the identity fetch once per context; concurrent and later calls
    /// wait for that single fetch and return the current session.
    pub async fn initialize(&self) -> Session {
        self.initialized
            .get_or_init(|| async {
                let session = match AuthApi::new(&self.api).me().await {
                    Ok(user) => {
                        info!(user_id = %user.id, "Restored session");
                        Session::resolved(Some(user))
                    }
                    Err(e) => {
                        info!(error = %e, "No active session");
                        Session::resolved(None)
                    }
                };
                self.state.send_replace(session);
            })
            .await;
        self.session()
    }

    /// Record a user that just verified their code. No network call.
    pub fn login(&self, user: User) {
        info!(user_id = %user.id, "Signed in");
        self.state.send_modify(|session| session.user = Some(user));
    }

    /// Sign out remotely if possible; local identity is always cleared.
    pub async fn logout(&self) {
        if let Err(e) = AuthApi::new(&self.api).logout().await {
            warn!(error = %e, "Logout request failed");
        }
        self.state.send_replace(Session::cleared());
        info!("Signed out");
    }

    /// React to a signal from the interceptor.
    pub fn apply(&self, event: SessionEvent) {
        match event {
            SessionEvent::Expired => self.expire(),
        }
    }

    /// Drop the local identity after the server refused to refresh it.
    pub fn expire(&self) {
        self.state.send_replace(Session::cleared());
        warn!("Session expired");
    }

    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn guard(&self) -> GuardState {
        self.state.borrow().guard()
    }

    /// Watch every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }
}
