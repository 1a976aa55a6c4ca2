//! Session state snapshots.

use jobboard_models::{Role, User};
use serde::Serialize;

/// Where the session is in its lifecycle.
///
/// `Uninitialized -> Checking -> {Authenticated, Anonymous}`; an
/// authenticated session drops to `Anonymous` on logout or expiry, and an
/// anonymous one goes back through `Checking` on login or register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Uninitialized,
    Checking,
    Authenticated,
    Anonymous,
}

/// Immutable view of the session published by the store.
///
/// Roles inside `user` are already normalized by [`Role::parse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub user: Option<User>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

impl SessionState {
    /// State before `initialize_auth`: loading, nobody signed in.
    pub fn initial() -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            user: None,
            token: None,
            is_authenticated: false,
            loading: true,
            error: None,
        }
    }

    /// An auth-determining request is in flight. `token` is the credential
    /// being checked, if any.
    pub fn checking(token: Option<String>) -> Self {
        Self {
            phase: SessionPhase::Checking,
            user: None,
            token,
            is_authenticated: false,
            loading: true,
            error: None,
        }
    }

    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            phase: SessionPhase::Authenticated,
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            loading: false,
            error: None,
        }
    }

    pub fn anonymous(error: Option<String>) -> Self {
        Self {
            phase: SessionPhase::Anonymous,
            user: None,
            token: None,
            is_authenticated: false,
            loading: false,
            error,
        }
    }

    /// Normalized role of the signed-in user.
    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().map(|u| &u.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(Role::is_admin)
    }

    /// True once the first auth check has settled.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Authenticated | SessionPhase::Anonymous
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_loading() {
        let state = SessionState::default();
        assert_eq!(state.phase, SessionPhase::Uninitialized);
        assert!(state.loading);
        assert!(!state.is_authenticated);
        assert!(!state.is_settled());
    }

    #[test]
    fn test_authenticated_carries_token() {
        let user = User::new("1", "a", "a@b.com", Role::parse("ADMIN"));
        let state = SessionState::authenticated(user, "tok1".to_string());

        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("tok1"));
        assert_eq!(state.role(), Some(&Role::Admin));
        assert!(state.is_admin());
    }

    #[test]
    fn test_serialized_state_omits_token() {
        let user = User::new("1", "a", "a@b.com", Role::User);
        let state = SessionState::authenticated(user, "secret".to_string());
        let json = serde_json::to_value(&state).unwrap();

        assert!(json.get("token").is_none());
        assert_eq!(json["phase"], "authenticated");
        assert_eq!(json["user"]["role"], "user");
    }
}
