//! Auth endpoints (`/auth/*`).

use jobboard_models::{
    validate_form, AuthResponse, CurrentUserResponse, ForgotPasswordRequest, LoginRequest,
    MessageResponse, RegisterRequest, ResetPasswordRequest, TokenResponse, User,
};
use reqwest::Method;

use crate::error::ClientResult;
use crate::transport::ApiClient;

/// Client for account and session endpoints.
#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Create an account. Form validation runs before any request is sent.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        validate_form(request)?;
        self.api
            .post_credentials("auth_register", "/auth/register", request)
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        validate_form(request)?;
        self.api.post_credentials("auth_login", "/auth/login", request).await
    }

    /// Invalidate the server-side session.
    pub async fn logout(&self) -> ClientResult<()> {
        self.api
            .send_discard("auth_logout", Method::POST, "/auth/logout")
            .await
    }

    /// `GET /auth/me`, unwrapping the `{ user }` envelope.
    pub async fn current_user(&self) -> ClientResult<User> {
        let response: CurrentUserResponse = self.api.get("auth_me", "/auth/me").await?;
        Ok(response.user)
    }

    /// Rotate the access token.
    pub async fn refresh_token(&self) -> ClientResult<TokenResponse> {
        self.api.post_empty("auth_refresh", "/auth/refresh").await
    }

    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> ClientResult<MessageResponse> {
        validate_form(request)?;
        self.api
            .post_credentials("auth_forgot_password", "/auth/forgot-password", request)
            .await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> ClientResult<MessageResponse> {
        validate_form(request)?;
        self.api
            .post_credentials("auth_reset_password", "/auth/reset-password", request)
            .await
    }
}
