//! Shared data models for the JobBoard client.
//!
//! This crate provides Serde-serializable types for:
//! - Users and normalized roles
//! - Auth request/response envelopes
//! - Jobs, job filters and listings
//! - Job applications and resume uploads
//! - Client-side validation of form input

pub mod application;
pub mod auth;
pub mod error;
pub mod job;
pub mod role;
pub mod user;
pub mod utils;

// Re-export common types
pub use application::{
    Application, ApplicationResponse, ApplicationStatus, ApplicationsResponse,
    UpdateApplicationRequest, UpdateApplicationStatusRequest, ResumeUpload,
};
pub use auth::{
    AuthResponse, CurrentUserResponse, ForgotPasswordRequest, LoginRequest, MessageResponse,
    RegisterRequest, ResetPasswordRequest, TokenResponse,
};
pub use error::{ModelError, ModelResult};
pub use job::{CreateJobRequest, Job, JobFilters, JobResponse, JobsResponse, UpdateJobRequest};
pub use role::Role;
pub use user::{UpdateRoleRequest, User, UsersResponse};
pub use utils::validate_form;
