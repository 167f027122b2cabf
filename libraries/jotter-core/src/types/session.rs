/// Session and route guard state
use crate::types::User;

/// Client-side view of the authenticated session.
///
/// Starts as `(None, loading)` and is resolved once by the identity fetch.
/// After that `is_loading` stays false for the rest of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Identity of the signed-in user, if any
    pub user: Option<User>,

    /// True until the startup identity fetch settles
    pub is_loading: bool,
}

impl Session {
    /// State at process start, before the identity fetch settles
    pub fn initial() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    /// State after the identity fetch settles
    pub fn resolved(user: Option<User>) -> Self {
        Self {
            user,
            is_loading: false,
        }
    }

    /// State after sign-out or session expiry
    pub fn cleared() -> Self {
        Self::resolved(None)
    }

    /// Derive the guard state for protected views
    pub fn guard(&self) -> GuardState {
        match (&self.user, self.is_loading) {
            (Some(user), _) => GuardState::Authorized(user.clone()),
            (None, true) => GuardState::Loading,
            (None, false) => GuardState::Unauthorized,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

/// What a protected view renders.
///
/// `Loading` moves to `Authorized` or `Unauthorized` exactly once per
/// process and is never re-entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Identity fetch still in flight
    Loading,
    /// A user is signed in
    Authorized(User),
    /// No user; show the blocking sign-in prompt
    Unauthorized,
}

impl GuardState {
    /// Short label for logs and prompts
    pub fn label(&self) -> &'static str {
        match self {
            GuardState::Loading => "loading",
            GuardState::Authorized(_) => "authorized",
            GuardState::Unauthorized => "unauthorized",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn user() -> User {
        User {
            id: UserId::new("1"),
            name: "A".into(),
            dob: "2000-01-01".into(),
            email: "a@x.com".into(),
        }
    }

    #[test]
    fn test_initial_session_is_loading() {
        let session = Session::initial();
        assert!(session.user.is_none());
        assert!(session.is_loading);
        assert_eq!(session.guard(), GuardState::Loading);
    }

    #[test]
    fn test_resolved_session_guard() {
        assert_eq!(
            Session::resolved(Some(user())).guard(),
            GuardState::Authorized(user())
        );
        assert_eq!(Session::resolved(None).guard(), GuardState::Unauthorized);
    }

    #[test]
    fn test_cleared_session() {
        let session = Session::cleared();
        assert_eq!(session, Session::resolved(None));
        assert!(!session.is_loading);
    }

    #[test]
    fn test_user_wins_over_loading_flag() {
        // login() can land before the startup fetch settles
        let session = Session {
            user: Some(user()),
            is_loading: true,
        };
        assert_eq!(session.guard().label(), "authorized");
    }
}
