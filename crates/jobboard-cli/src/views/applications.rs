//! Apply and "my applications" views.

use std::path::Path;

use anyhow::{Context, Result};

use jobboard_models::ResumeUpload;
use jobboard_session::Route;

use crate::app::App;
use crate::cli::ApplicationsCommand;
use crate::views::render::application_line;

pub async fn run(app: &App, command: ApplicationsCommand) -> Result<()> {
    match command {
        ApplicationsCommand::List => list(app).await,
        ApplicationsCommand::Withdraw { id } => withdraw(app, id).await,
    }
}

pub async fn apply(app: &App, job_id: u64, resume: &Path, cover_letter: &str) -> Result<()> {
    if !app.enter(Route::ApplyJob(job_id)).await {
        return Ok(());
    }

    let bytes = tokio::fs::read(resume)
        .await
        .with_context(|| format!("Failed to read resume {}", resume.display()))?;
    let file_name = resume
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let upload = ResumeUpload::new(file_name, bytes)?;

    let response = app
        .applications
        .apply(job_id, upload, cover_letter)
        .await
        .context("Failed to submit application")?;

    println!("Applied successfully!");
    println!("{}", application_line(&response.application));
    Ok(())
}

async fn list(app: &App) -> Result<()> {
    if !app.enter(Route::MyApplications).await {
        return Ok(());
    }

    let response = app
        .applications
        .mine()
        .await
        .context("Failed to load applications")?;

    if response.applications.is_empty() {
        println!("You have not applied to any jobs yet.");
        return Ok(());
    }
    for application in &response.applications {
        println!("{}", application_line(application));
    }
    Ok(())
}

async fn withdraw(app: &App, id: u64) -> Result<()> {
    if !app.enter(Route::MyApplications).await {
        return Ok(());
    }

    app.applications
        .withdraw(id)
        .await
        .context("Failed to withdraw application")?;
    println!("Application withdrawn successfully!");
    Ok(())
}
