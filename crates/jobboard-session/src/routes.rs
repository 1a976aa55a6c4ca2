//! Client routes and their access rules.

use std::fmt;

use jobboard_models::Role;

use crate::guard::{GuardDecision, RouteGuard};
use crate::state::SessionState;

/// Every route the client can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    Jobs,
    JobDetail(u64),
    Profile,
    AdminOnly,
    AdminDashboard,
    UserDashboard,
    ApplyJob(u64),
    MyApplications,
    PostJob,
    MyJobs,
    EditJob(u64),
    NotFound,
}

/// Who may see a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Role(Role),
}

impl Route {
    /// Parse a client path. Query strings and trailing slashes are ignored;
    /// anything unrecognized is [`Route::NotFound`].
    pub fn parse(path: &str) -> Self {
        let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["forgot-password"] => Route::ForgotPassword,
            ["reset-password"] => Route::ResetPassword,
            ["jobs"] => Route::Jobs,
            ["jobs", id] => parse_id(id).map_or(Route::NotFound, Route::JobDetail),
            ["jobs", id, "apply"] => parse_id(id).map_or(Route::NotFound, Route::ApplyJob),
            ["profile"] => Route::Profile,
            ["admin-only"] => Route::AdminOnly,
            // Older links used the misspelled path.
            ["admin-dashboard"] | ["adminDashbord"] => Route::AdminDashboard,
            ["user-dashboard"] => Route::UserDashboard,
            ["applications", "me"] => Route::MyApplications,
            ["admin", "post-job"] => Route::PostJob,
            ["admin", "my-jobs"] => Route::MyJobs,
            ["admin", "jobs", id, "edit"] => parse_id(id).map_or(Route::NotFound, Route::EditJob),
            _ => Route::NotFound,
        }
    }

    /// Canonical path.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::ResetPassword => "/reset-password".to_string(),
            Route::Jobs => "/jobs".to_string(),
            Route::JobDetail(id) => format!("/jobs/{}", id),
            Route::Profile => "/profile".to_string(),
            Route::AdminOnly => "/admin-only".to_string(),
            Route::AdminDashboard => "/admin-dashboard".to_string(),
            Route::UserDashboard => "/user-dashboard".to_string(),
            Route::ApplyJob(id) => format!("/jobs/{}/apply", id),
            Route::MyApplications => "/applications/me".to_string(),
            Route::PostJob => "/admin/post-job".to_string(),
            Route::MyJobs => "/admin/my-jobs".to_string(),
            Route::EditJob(id) => format!("/admin/jobs/{}/edit", id),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Home
            | Route::Login
            | Route::Register
            | Route::ForgotPassword
            | Route::ResetPassword
            | Route::Jobs
            | Route::JobDetail(_)
            | Route::NotFound => Access::Public,
            Route::Profile => Access::Authenticated,
            Route::AdminOnly
            | Route::AdminDashboard
            | Route::PostJob
            | Route::MyJobs
            | Route::EditJob(_) => Access::Role(Role::Admin),
            Route::UserDashboard | Route::ApplyJob(_) | Route::MyApplications => {
                Access::Role(Role::User)
            }
        }
    }

    /// Role the guard requires, if the route is role-restricted.
    pub fn required_role(&self) -> Option<Role> {
        match self.access() {
            Access::Role(role) => Some(role),
            Access::Public | Access::Authenticated => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_id(segment: &str) -> Option<u64> {
    segment.parse().ok()
}

/// Where a view sends the user after a successful login or registration.
pub fn landing_route(role: Option<&Role>) -> Route {
    match role {
        Some(Role::User) => Route::Jobs,
        Some(Role::Admin) => Route::AdminDashboard,
        _ => Route::Home,
    }
}

/// Outcome of resolving a path against the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    /// The session is still loading; show a placeholder.
    Pending,
    Redirect(Route),
}

/// Resolves paths to routes and applies the guard to protected ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct Router;

impl Router {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, path: &str, state: &SessionState) -> Navigation {
        self.resolve_route(Route::parse(path), state)
    }

    pub fn resolve_route(&self, route: Route, state: &SessionState) -> Navigation {
        if route.access() == Access::Public {
            return Navigation::Render(route);
        }

        let required = route.required_role();
        match RouteGuard::evaluate(state, required.as_ref()) {
            GuardDecision::Allow => Navigation::Render(route),
            GuardDecision::Pending => Navigation::Pending,
            GuardDecision::Redirect(target) => Navigation::Redirect(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_models::User;

    fn signed_in(role: &str) -> SessionState {
        SessionState::authenticated(User::new("1", "a", "a@b.com", Role::parse(role)), "tok".into())
    }

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/jobs/42"), Route::JobDetail(42));
        assert_eq!(Route::parse("/jobs/42/apply"), Route::ApplyJob(42));
        assert_eq!(Route::parse("/admin/jobs/7/edit"), Route::EditJob(7));
        assert_eq!(Route::parse("/applications/me/"), Route::MyApplications);
        assert_eq!(Route::parse("/reset-password?token=abc"), Route::ResetPassword);
        assert_eq!(Route::parse("/adminDashbord"), Route::AdminDashboard);
    }

    #[test]
    fn test_parse_unknown_is_not_found() {
        assert_eq!(Route::parse("/jobs/abc"), Route::NotFound);
        assert_eq!(Route::parse("/nowhere"), Route::NotFound);
        assert_eq!(Route::parse("/admin"), Route::NotFound);
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        for route in [
            Route::Home,
            Route::Profile,
            Route::JobDetail(3),
            Route::ApplyJob(3),
            Route::EditJob(3),
            Route::MyJobs,
            Route::UserDashboard,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_access_rules() {
        assert_eq!(Route::Jobs.access(), Access::Public);
        assert_eq!(Route::Profile.access(), Access::Authenticated);
        assert_eq!(Route::PostJob.access(), Access::Role(Role::Admin));
        assert_eq!(Route::ApplyJob(1).access(), Access::Role(Role::User));
    }

    #[test]
    fn test_landing_route_by_role() {
        assert_eq!(landing_route(Some(&Role::User)), Route::Jobs);
        assert_eq!(landing_route(Some(&Role::Admin)), Route::AdminDashboard);
        assert_eq!(landing_route(Some(&Role::Employer)), Route::Home);
        assert_eq!(landing_route(None), Route::Home);
    }

    #[test]
    fn test_router_public_routes_render_while_loading() {
        let router = Router::new();
        let loading = SessionState::initial();

        assert_eq!(router.resolve("/jobs", &loading), Navigation::Render(Route::Jobs));
        assert_eq!(router.resolve("/missing", &loading), Navigation::Render(Route::NotFound));
        assert_eq!(router.resolve("/profile", &loading), Navigation::Pending);
    }

    #[test]
    fn test_router_guards_protected_routes() {
        let router = Router::new();
        let anonymous = SessionState::anonymous(None);

        assert_eq!(
            router.resolve("/admin/post-job", &anonymous),
            Navigation::Redirect(Route::Login)
        );
        assert_eq!(
            router.resolve("/admin/post-job", &signed_in("user")),
            Navigation::Redirect(Route::UserDashboard)
        );
        assert_eq!(
            router.resolve("/admin/post-job", &signed_in("Admin")),
            Navigation::Render(Route::PostJob)
        );
        assert_eq!(
            router.resolve("/profile", &signed_in("employer")),
            Navigation::Render(Route::Profile)
        );
    }
}
