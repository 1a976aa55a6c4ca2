//! Login, registration, logout, profile and password reset views.

use anyhow::{Context, Result};

use jobboard_models::{ForgotPasswordRequest, RegisterRequest, ResetPasswordRequest};
use jobboard_session::{landing_route, Route};

use crate::app::App;

pub async fn login(app: &App, email: &str, password: &str) -> Result<()> {
    app.session.initialize_auth().await;
    let user = app.session.login(email, password).await?;

    println!("User logged in successfully! Welcome back, {}.", user.username);
    println!("Continue at {}", landing_route(Some(&user.role)));
    Ok(())
}

pub async fn register(
    app: &App,
    username: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<()> {
    let request = RegisterRequest {
        username,
        email,
        password,
        confirm_password,
    };

    app.session.initialize_auth().await;
    let user = app.session.register(&request).await?;

    println!("Registration successful! Welcome aboard, {}.", user.username);
    println!("Continue at {}", landing_route(Some(&user.role)));
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.session.logout().await;
    println!("Logged out.");
    Ok(())
}

/// Profile view.
pub async fn whoami(app: &App, json: bool) -> Result<()> {
    if !app.enter(Route::Profile).await {
        return Ok(());
    }

    let state = app.session.state();
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    match &state.user {
        Some(user) => {
            println!("Username: {}", user.username);
            println!("Email:    {}", user.email);
            println!("Role:     {}", user.role);
        }
        None => println!("Signed in."),
    }
    Ok(())
}

pub async fn forgot_password(app: &App, email: String) -> Result<()> {
    let request = ForgotPasswordRequest { email };
    let response = app
        .auth
        .forgot_password(&request)
        .await
        .context("Failed to send reset email")?;

    if response.message.is_empty() {
        println!("Password reset email sent! Check your inbox.");
    } else {
        println!("{}", response.message);
    }
    Ok(())
}

pub async fn reset_password(
    app: &App,
    token: String,
    new_password: String,
    confirm_password: String,
) -> Result<()> {
    let request = ResetPasswordRequest {
        token,
        new_password,
        confirm_password,
    };
    app.auth
        .reset_password(&request)
        .await
        .context("Failed to reset password")?;

    println!("Password reset successfully! You can now log in.");
    Ok(())
}
