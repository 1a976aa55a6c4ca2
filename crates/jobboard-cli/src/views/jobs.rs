//! Job browsing and management views.

use anyhow::{Context, Result};

use jobboard_models::{CreateJobRequest, JobFilters, UpdateJobRequest};
use jobboard_session::Route;

use crate::app::App;
use crate::cli::JobsCommand;
use crate::views::render::{job_line, page_footer, print_job};

/// Page size when the filters do not set one.
const PAGE_SIZE: u32 = 10;

pub async fn run(app: &App, command: JobsCommand) -> Result<()> {
    match command {
        JobsCommand::List {
            page,
            search,
            location,
            company,
        } => {
            let mut filters = JobFilters::public_page(page);
            filters.search = search;
            filters.location = location;
            filters.company = company;
            list(app, &filters).await
        }
        JobsCommand::Show { id } => show(app, id).await,
        JobsCommand::Mine => mine(app).await,
        JobsCommand::Post {
            title,
            description,
            company,
            location,
        } => {
            let request = CreateJobRequest {
                title,
                description,
                company,
                location,
            };
            post(app, &request).await
        }
        JobsCommand::Edit {
            id,
            title,
            description,
            company,
            location,
        } => {
            let request = UpdateJobRequest {
                title,
                description,
                company,
                location,
            };
            edit(app, id, &request).await
        }
        JobsCommand::Delete { id } => delete(app, id).await,
    }
}

async fn list(app: &App, filters: &JobFilters) -> Result<()> {
    if !app.enter(Route::Jobs).await {
        return Ok(());
    }

    let response = app.jobs.list(filters).await.context("Failed to load jobs")?;
    if response.jobs.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    for job in &response.jobs {
        println!("{}", job_line(job));
    }
    let page = filters.page.unwrap_or(1);
    let limit = filters.limit.unwrap_or(PAGE_SIZE);
    if let Some(footer) = page_footer(page, response.total_pages(limit)) {
        println!("\n{}", footer);
    }
    Ok(())
}

async fn show(app: &App, id: u64) -> Result<()> {
    if !app.enter(Route::JobDetail(id)).await {
        return Ok(());
    }

    let response = app.jobs.get(id).await.context("Failed to load job details")?;
    print_job(&response.job);
    println!("\nApply with: jobboard apply {} --resume <FILE>", id);
    Ok(())
}

async fn mine(app: &App) -> Result<()> {
    if !app.enter(Route::MyJobs).await {
        return Ok(());
    }

    let response = app.jobs.mine().await.context("Failed to load your jobs")?;
    if response.jobs.is_empty() {
        println!("You have not posted any jobs yet.");
    }
    for job in &response.jobs {
        println!("{}", job_line(job));
    }
    Ok(())
}

async fn post(app: &App, request: &CreateJobRequest) -> Result<()> {
    if !app.enter(Route::PostJob).await {
        return Ok(());
    }

    let response = app.jobs.create(request).await.context("Failed to post job")?;
    println!("Job posted successfully! (#{})", response.job.id);
    if !response.job.is_approved {
        println!("It will be listed once an administrator approves it.");
    }
    Ok(())
}

async fn edit(app: &App, id: u64, request: &UpdateJobRequest) -> Result<()> {
    if !app.enter(Route::EditJob(id)).await {
        return Ok(());
    }

    let response = app
        .jobs
        .update(id, request)
        .await
        .context("Failed to update job")?;
    println!("Job updated.");
    println!("{}", job_line(&response.job));
    Ok(())
}

async fn delete(app: &App, id: u64) -> Result<()> {
    if !app.enter(Route::MyJobs).await {
        return Ok(());
    }

    app.jobs.delete(id).await.context("Failed to delete job")?;
    println!("Job deleted successfully!");
    Ok(())
}
