//! Views: one function per subcommand.

pub mod admin;
pub mod applications;
pub mod auth;
pub mod jobs;
pub mod open;
pub mod render;

use anyhow::Result;

use crate::app::App;
use crate::cli::Command;

/// Run a parsed command.
pub async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => auth::login(app, &email, &password).await,
        Command::Register {
            username,
            email,
            password,
            confirm_password,
        } => auth::register(app, username, email, password, confirm_password).await,
        Command::Logout => auth::logout(app).await,
        Command::Whoami { json } => auth::whoami(app, json).await,
        Command::ForgotPassword { email } => auth::forgot_password(app, email).await,
        Command::ResetPassword {
            token,
            password,
            confirm_password,
        } => auth::reset_password(app, token, password, confirm_password).await,
        Command::Jobs { command } => jobs::run(app, command).await,
        Command::Apply {
            job_id,
            resume,
            cover_letter,
        } => applications::apply(app, job_id, &resume, &cover_letter).await,
        Command::Applications { command } => applications::run(app, command).await,
        Command::Admin { command } => admin::run(app, command).await,
        Command::Open { path } => open::open(app, &path).await,
    }
}
