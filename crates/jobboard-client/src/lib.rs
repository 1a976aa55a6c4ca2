//! REST API client for the JobBoard backend.
//!
//! This crate provides:
//! - A shared transport that attaches the persisted bearer token and reacts
//!   to expired sessions
//! - Persisted token storage (file-backed and in-memory)
//! - Typed resource clients for auth, jobs, applications and admin endpoints
//! - Request metrics

pub mod admin;
pub mod applications;
pub mod auth;
pub mod config;
pub mod error;
pub mod jobs;
pub mod metrics;
pub mod navigator;
pub mod token_store;
pub mod transport;


pub use admin::AdminClient;
pub use applications::ApplicationsClient;
pub use auth::AuthClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use jobs::JobsClient;
pub use navigator::{LogNavigator, Navigator, NoopNavigator, LOGIN_PATH};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, ACCESS_TOKEN_KEY};
pub use transport::{ApiClient, TransportEvent, UnauthorizedPolicy};
