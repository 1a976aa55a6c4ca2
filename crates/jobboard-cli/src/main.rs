//! JobBoard command-line client binary.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use jobboard_cli::views::{self, render::error_message};
use jobboard_cli::{logging, App, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();

    let app = match App::from_env() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to configure client: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match views::run(&app, cli.command).await {
        Ok(()) if app.login_required() => ExitCode::FAILURE,
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", error_message(&e));
            if app.navigator.take().is_some() {
                eprintln!("Your session has ended. Run `jobboard login` to sign in again.");
            } else {
                eprintln!("Please try again.");
            }
            ExitCode::FAILURE
        }
    }
}
