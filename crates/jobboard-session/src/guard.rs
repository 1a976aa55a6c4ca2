//! Route guard.
//!
//! Unauthorized access never produces an error page here: an anonymous
//! visitor is sent to the login view and a signed-in user with the wrong
//! role is sent to their own default destination.

use jobboard_models::Role;

use crate::routes::Route;
use crate::state::SessionState;

/// What to do with a guarded route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still loading: show a placeholder, decide later.
    Pending,
    Redirect(Route),
    Allow,
}

/// Role-based gate over session state.
pub struct RouteGuard;

impl RouteGuard {
    pub fn evaluate(state: &SessionState, required_role: Option<&Role>) -> GuardDecision {
        if state.loading {
            return GuardDecision::Pending;
        }

        if !state.is_authenticated {
            return GuardDecision::Redirect(Route::Login);
        }

        let Some(required) = required_role else {
            return GuardDecision::Allow;
        };

        match state.role() {
            // Authenticated without a user record: nothing to match against.
            None => GuardDecision::Redirect(Route::Home),
            Some(role) if role == required => GuardDecision::Allow,
            Some(role) => GuardDecision::Redirect(default_destination(role)),
        }
    }
}

/// Where a user lands when a guarded route is not for their role.
pub fn default_destination(role: &Role) -> Route {
    match role {
        Role::Admin => Route::AdminDashboard,
        Role::User => Route::UserDashboard,
        _ => Route::Home,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionPhase;
    use jobboard_models::User;

    fn signed_in(role: &str) -> SessionState {
        SessionState::authenticated(User::new("7", "sam", "sam@x.io", Role::parse(role)), "t".into())
    }

    #[test]
    fn test_loading_is_pending_regardless_of_role() {
        let mut state = signed_in("admin");
        state.loading = true;

        assert_eq!(RouteGuard::evaluate(&state, Some(&Role::Admin)), GuardDecision::Pending);
        assert_eq!(RouteGuard::evaluate(&state, None), GuardDecision::Pending);
        assert_eq!(
            RouteGuard::evaluate(&SessionState::initial(), Some(&Role::User)),
            GuardDecision::Pending
        );
    }

    #[test]
    fn test_anonymous_redirects_to_login() {
        let state = SessionState::anonymous(None);
        assert_eq!(
            RouteGuard::evaluate(&state, None),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(
            RouteGuard::evaluate(&state, Some(&Role::Admin)),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_user_on_admin_route_goes_to_user_dashboard() {
        assert_eq!(
            RouteGuard::evaluate(&signed_in("user"), Some(&Role::Admin)),
            GuardDecision::Redirect(Route::UserDashboard)
        );
    }

    #[test]
    fn test_wrong_role_redirects_by_actual_role() {
        assert_eq!(
            RouteGuard::evaluate(&signed_in("ADMIN"), Some(&Role::User)),
            GuardDecision::Redirect(Route::AdminDashboard)
        );
        assert_eq!(
            RouteGuard::evaluate(&signed_in("employer"), Some(&Role::Admin)),
            GuardDecision::Redirect(Route::Home)
        );
        assert_eq!(
            RouteGuard::evaluate(&signed_in("recruiter"), Some(&Role::User)),
            GuardDecision::Redirect(Route::Home)
        );
    }

    #[test]
    fn test_matching_role_is_case_insensitive() {
        assert_eq!(
            RouteGuard::evaluate(&signed_in("Admin"), Some(&Role::parse("ADMIN"))),
            GuardDecision::Allow
        );
        assert_eq!(RouteGuard::evaluate(&signed_in("employer"), None), GuardDecision::Allow);
    }

    #[test]
    fn test_authenticated_without_user_goes_home_for_role_routes() {
        let state = SessionState {
            phase: SessionPhase::Authenticated,
            user: None,
            token: Some("t".to_string()),
            is_authenticated: true,
            loading: false,
            error: None,
        };

        assert_eq!(
            RouteGuard::evaluate(&state, Some(&Role::Admin)),
            GuardDecision::Redirect(Route::Home)
        );
        assert_eq!(RouteGuard::evaluate(&state, None), GuardDecision::Allow);
    }
}
