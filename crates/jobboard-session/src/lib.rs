//! Client-side session management for JobBoard.
//!
//! - [`SessionStore`]: the authentication state machine shared by every view
//! - [`RouteGuard`] and [`Router`]: role-based gating of client routes
//! - [`AuthApi`]: the seam between the store and the auth endpoints

pub mod config;
pub mod error;
pub mod guard;
pub mod routes;
pub mod state;
pub mod store;


pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use guard::{default_destination, GuardDecision, RouteGuard};
pub use routes::{landing_route, Access, Navigation, Route, Router};
pub use state::{SessionPhase, SessionState};
pub use store::{AuthApi, SessionStore};
