//! Admin dashboard views: job approval and user management.

use anyhow::{bail, Context, Result};

use jobboard_models::Role;
use jobboard_session::Route;

use crate::app::App;
use crate::cli::AdminCommand;
use crate::views::render::{job_line, user_line};

/// Shown by the admin-only page to anyone who is not an administrator.
pub const ACCESS_DENIED: &str = "You do not have access to this page.";

pub async fn run(app: &App, command: AdminCommand) -> Result<()> {
    if let AdminCommand::Whoami = command {
        return admin_only(app).await;
    }

    if !app.enter(Route::AdminDashboard).await {
        return Ok(());
    }

    match command {
        AdminCommand::Pending => {
            let response = app
                .admin
                .unapproved_jobs()
                .await
                .context("Failed to load unapproved jobs")?;
            if response.jobs.is_empty() {
                println!("No jobs waiting for approval.");
            }
            for job in &response.jobs {
                println!("{}", job_line(job));
            }
        }
        AdminCommand::Approved => {
            let response = app
                .admin
                .approved_jobs()
                .await
                .context("Failed to load approved jobs")?;
            for job in &response.jobs {
                println!("{}", job_line(job));
            }
        }
        AdminCommand::Approve { job_id } => {
            app.admin
                .approve_job(job_id)
                .await
                .context("Failed to approve job")?;
            println!("Job approved successfully!");
        }
        AdminCommand::Users => {
            let response = app.admin.users().await.context("Failed to load users")?;
            for user in &response.users {
                println!("{}", user_line(user));
            }
        }
        AdminCommand::DeleteUser { user_id } => {
            app.admin
                .delete_user(&user_id)
                .await
                .context("Failed to delete user")?;
            println!("User deleted successfully!");
        }
        AdminCommand::SetRole { user_id, role } => {
            let role = assignable_role(&role)?;
            app.admin
                .update_user_role(&user_id, role.clone())
                .await
                .context("Failed to update user role")?;
            println!("User role updated to {}!", role);
        }
        AdminCommand::Whoami => {}
    }
    Ok(())
}

/// The admin-only page checks the role itself, on top of the route guard.
async fn admin_only(app: &App) -> Result<()> {
    if !app.enter(Route::AdminOnly).await {
        return Ok(());
    }

    let state = app.session.state();
    match state.user.as_ref().filter(|user| user.is_admin()) {
        Some(user) => {
            println!("Admin area");
            println!("Signed in as {} <{}>", user.username, user.email);
        }
        None => println!("{}", ACCESS_DENIED),
    }
    Ok(())
}

fn assignable_role(raw: &str) -> Result<Role> {
    let role = Role::parse(raw);
    if !Role::assignable().contains(&role) {
        bail!("Unknown role '{}'. Expected one of: user, employer, admin", raw);
    }
    Ok(role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignable_role_normalizes() {
        assert_eq!(assignable_role("ADMIN").unwrap(), Role::Admin);
        assert_eq!(assignable_role(" Employer ").unwrap(), Role::Employer);
        assert!(assignable_role("superuser").is_err());
    }
}
